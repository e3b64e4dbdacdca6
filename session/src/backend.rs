//! Credential-check backend seam and shared response decoding.
//!
//! ARCHITECTURE
//! ============
//! Transports (`gloo-net` in the browser, `reqwest` in the CLI) only move
//! bytes: they hand the status code and raw body to the `decode_*` functions
//! here, so both clients classify responses identically.
//!
//! ERROR HANDLING
//! ==============
//! A non-2xx JSON body becomes [`BackendError::Rejected`] carrying its
//! `message`. A body that is not JSON at all becomes [`BackendError::Decode`],
//! which the provider reports the same way as a transport failure.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendError;
use crate::model::{AdminIdentity, Credentials, Session};

/// Credential-check endpoint.
pub const LOGIN_ENDPOINT: &str = "/api/admin/login";
/// Password change endpoint (bearer-authenticated).
pub const CHANGE_PASSWORD_ENDPOINT: &str = "/api/admin/change-password";

/// Successful login payload: `{token, admin}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub admin: AdminIdentity,
}

impl From<LoginGrant> for Session {
    fn from(grant: LoginGrant) -> Self {
        Self { token: grant.token, admin: grant.admin }
    }
}

/// Body of `PUT /api/admin/change-password`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

/// Transport for the admin auth endpoints.
///
/// Futures are not required to be `Send`: the browser implementation awaits
/// `gloo-net` futures on the single-threaded event loop.
pub trait AuthBackend {
    /// `POST /api/admin/login` with `{email, password}`.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<LoginGrant, BackendError>>;

    /// `PUT /api/admin/change-password` with a bearer token.
    ///
    /// Resolves to the backend's `message`, if it sent one.
    fn change_password(
        &self,
        token: &str,
        change: &PasswordChange,
    ) -> impl Future<Output = Result<Option<String>, BackendError>>;
}

/// Join a backend base URL and an absolute API path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn message_field(value: &Value) -> Option<String> {
    value.get("message").and_then(Value::as_str).map(ToOwned::to_owned)
}

/// Parse any JSON response, mapping non-2xx to [`BackendError::Rejected`].
///
/// An empty 2xx body decodes as `Value::Null`.
///
/// # Errors
///
/// [`BackendError::Decode`] when the body is not JSON,
/// [`BackendError::Rejected`] when the status is not 2xx.
pub fn decode_json(status: u16, body: &str) -> Result<Value, BackendError> {
    let value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(body).map_err(|e| BackendError::Decode(e.to_string()))?
    };
    if !is_success(status) {
        return Err(BackendError::Rejected { status, message: message_field(&value) });
    }
    Ok(value)
}

/// Auth endpoints always answer with a JSON document, so an empty body is a
/// decode failure whatever the status, unlike collection calls.
fn decode_auth_json(status: u16, body: &str) -> Result<Value, BackendError> {
    if body.trim().is_empty() {
        return Err(BackendError::Decode(format!("empty response body (status {status})")));
    }
    decode_json(status, body)
}

/// Classify a credential-check response.
///
/// # Errors
///
/// See [`decode_json`]; additionally [`BackendError::Decode`] when the body
/// is empty or a 2xx body lacks `token` or `admin`.
pub fn decode_login_response(status: u16, body: &str) -> Result<LoginGrant, BackendError> {
    let value = decode_auth_json(status, body)?;
    serde_json::from_value::<LoginGrant>(value).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Classify a `{message}` response such as the password change result.
///
/// # Errors
///
/// See [`decode_json`]; additionally [`BackendError::Decode`] when the body
/// is empty.
pub fn decode_message_response(status: u16, body: &str) -> Result<Option<String>, BackendError> {
    decode_auth_json(status, body).map(|value| message_field(&value))
}
