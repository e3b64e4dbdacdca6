//! REST API helpers for communicating with the content backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Status/body classification is delegated to `session::backend` so the
//! browser and the CLI interpret backend replies identically. Page-facing
//! helpers return `Result<_, String>` ready for an inline banner.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;
use session::backend::{AuthBackend, LoginGrant, PasswordChange};
use session::{AdminResource, BackendError, Credentials};

/// Backend base URL baked in at build time; empty means same origin.
pub const BACKEND_URL: &str = match option_env!("STEM_BACKEND_URL") {
    Some(url) => url,
    None => "",
};

#[cfg(not(feature = "hydrate"))]
const NOT_AVAILABLE: &str = "not available on server";

/// `gloo-net` transport for the admin auth endpoints.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Backend configured from `STEM_BACKEND_URL` at build time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(BACKEND_URL)
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        session::backend::endpoint(&self.base_url, path)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::from_build_env()
    }
}

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn read_reply(resp: gloo_net::http::Response) -> Result<(u16, String), BackendError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| BackendError::Decode(e.to_string()))?;
    Ok((status, body))
}

impl AuthBackend for HttpBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, BackendError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.url(session::backend::LOGIN_ENDPOINT))
                .json(credentials)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, body) = read_reply(resp).await?;
            session::backend::decode_login_response(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(BackendError::Transport(NOT_AVAILABLE.to_owned()))
        }
    }

    async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<Option<String>, BackendError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::put(&self.url(session::backend::CHANGE_PASSWORD_ENDPOINT))
                .header("Authorization", &session::model::bearer(token))
                .json(change)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let (status, body) = read_reply(resp).await?;
            session::backend::decode_message_response(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, change);
            Err(BackendError::Transport(NOT_AVAILABLE.to_owned()))
        }
    }
}

/// Normalize a collection reply: arrays as-is, `null` as empty, a single
/// document as a one-item list.
#[must_use]
pub fn items_from_value(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Banner text for a failed resource call.
#[must_use]
pub fn resource_error_message(resource: AdminResource, err: &BackendError) -> String {
    match err {
        BackendError::Rejected { message: Some(message), .. } => message.clone(),
        BackendError::Rejected { status: 401 | 403, message: None } => {
            "Your session is no longer accepted. Log out and sign in again.".to_owned()
        }
        BackendError::Rejected { status, message: None } => {
            format!("{} request failed: {status}", resource.name())
        }
        BackendError::Transport(_) | BackendError::Decode(_) => {
            format!("Could not reach the server for {}.", resource.name())
        }
    }
}

/// Fetch every item of `resource` (`GET /api/{resource}`, unauthenticated).
///
/// # Errors
///
/// Returns banner text when the request fails or is rejected.
pub async fn fetch_items(backend: &HttpBackend, resource: AdminResource) -> Result<Vec<Value>, String> {
    #[cfg(feature = "hydrate")]
    {
        let result = async {
            let resp = gloo_net::http::Request::get(&backend.url(&resource.path()))
                .send()
                .await
                .map_err(transport)?;
            let (status, body) = read_reply(resp).await?;
            session::backend::decode_json(status, &body)
        }
        .await;
        result
            .map(items_from_value)
            .map_err(|e| resource_error_message(resource, &e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (backend, resource);
        Err(NOT_AVAILABLE.to_owned())
    }
}

/// Delete one item (`DELETE /api/{resource}/{id}`) with the bearer token.
///
/// # Errors
///
/// Returns banner text when the request fails or is rejected.
pub async fn delete_item(backend: &HttpBackend, resource: AdminResource, id: &str, token: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let result = async {
            let resp = gloo_net::http::Request::delete(&backend.url(&resource.item_path(id)))
                .header("Authorization", &session::model::bearer(token))
                .send()
                .await
                .map_err(transport)?;
            let (status, body) = read_reply(resp).await?;
            session::backend::decode_json(status, &body)
        }
        .await;
        result
            .map(|_| ())
            .map_err(|e| resource_error_message(resource, &e))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (backend, resource, id, token);
        Err(NOT_AVAILABLE.to_owned())
    }
}
