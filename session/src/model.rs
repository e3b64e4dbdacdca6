//! Session data model.
//!
//! DESIGN
//! ======
//! `token` and `admin` are only ever written and cleared together, so they
//! live in one [`Session`] value and "no session" is `Option::None`. The
//! present-iff-present invariant then holds by construction.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile object returned by the backend on login.
///
/// The shape is owned by the backend; the client only stores and displays it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminIdentity(pub Value);

impl AdminIdentity {
    /// Best-effort display label: `name`, then `email`, then `"admin"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        ["name", "email"]
            .iter()
            .find_map(|key| {
                self.0
                    .get(*key)
                    .and_then(Value::as_str)
                    .filter(|value| !value.trim().is_empty())
            })
            .unwrap_or("admin")
    }
}

/// An authenticated admin session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// Opaque bearer token issued by the backend.
    pub token: String,
    /// Identity returned alongside the token.
    pub admin: AdminIdentity,
}

impl Session {
    /// `Authorization` header value for mutating requests.
    #[must_use]
    pub fn bearer(&self) -> String {
        bearer(&self.token)
    }
}

/// Format a bearer credential header value.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Email + password pair submitted by the login form.
///
/// Serializes to the `{email, password}` body of the credential check.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
