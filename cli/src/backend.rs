//! `reqwest` transport for the admin auth and resource endpoints.

use reqwest::Method;
use serde_json::Value;
use session::backend::{self, AuthBackend, LoginGrant, PasswordChange};
use session::{AdminResource, BackendError, Credentials};

#[derive(Clone, Debug)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestBackend {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("stem-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url: base_url.into() })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        backend::endpoint(&self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), BackendError> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| BackendError::Decode(e.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "backend replied");
        Ok((status, body))
    }

    /// Issue a JSON request against a resource path and decode the reply.
    ///
    /// # Errors
    ///
    /// Any [`BackendError`] from the transport or the reply classification.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, BackendError> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, session::model::bearer(token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let (status, text) = self.send(request).await?;
        backend::decode_json(status, &text)
    }

    /// `GET /api/{resource}`.
    ///
    /// # Errors
    ///
    /// See [`ReqwestBackend::request`].
    pub async fn list(&self, resource: AdminResource) -> Result<Value, BackendError> {
        self.request(Method::GET, &resource.path(), None, None).await
    }

    /// `GET /api/{resource}/{id}`.
    ///
    /// # Errors
    ///
    /// See [`ReqwestBackend::request`].
    pub async fn get(&self, resource: AdminResource, id: &str) -> Result<Value, BackendError> {
        self.request(Method::GET, &resource.item_path(id), None, None).await
    }

    /// `POST /api/{resource}` with the bearer token.
    ///
    /// # Errors
    ///
    /// See [`ReqwestBackend::request`].
    pub async fn create(&self, resource: AdminResource, token: &str, body: &Value) -> Result<Value, BackendError> {
        self.request(Method::POST, &resource.path(), Some(token), Some(body)).await
    }

    /// `PUT /api/{resource}/{id}` with the bearer token.
    ///
    /// # Errors
    ///
    /// See [`ReqwestBackend::request`].
    pub async fn update(
        &self,
        resource: AdminResource,
        id: &str,
        token: &str,
        body: &Value,
    ) -> Result<Value, BackendError> {
        self.request(Method::PUT, &resource.item_path(id), Some(token), Some(body)).await
    }

    /// `DELETE /api/{resource}/{id}` with the bearer token.
    ///
    /// # Errors
    ///
    /// See [`ReqwestBackend::request`].
    pub async fn delete(&self, resource: AdminResource, id: &str, token: &str) -> Result<Value, BackendError> {
        self.request(Method::DELETE, &resource.item_path(id), Some(token), None).await
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

impl AuthBackend for ReqwestBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, BackendError> {
        let request = self.client.post(self.url(backend::LOGIN_ENDPOINT)).json(credentials);
        let (status, body) = self.send(request).await?;
        backend::decode_login_response(status, &body)
    }

    async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<Option<String>, BackendError> {
        let request = self
            .client
            .put(self.url(backend::CHANGE_PASSWORD_ENDPOINT))
            .header(reqwest::header::AUTHORIZATION, session::model::bearer(token))
            .json(change);
        let (status, body) = self.send(request).await?;
        backend::decode_message_response(status, &body)
    }
}
