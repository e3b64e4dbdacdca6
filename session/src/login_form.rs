//! Login Form model: input validation and the post-login navigation policy.
//!
//! A successful login is followed by a full document load of the admin
//! landing route rather than an in-app transition, so the next page starts
//! from freshly restored session state.

#[cfg(test)]
#[path = "login_form_test.rs"]
mod login_form_test;

use std::fmt;

use crate::backend::AuthBackend;
use crate::catalog::ADMIN_LANDING_ROUTE;
use crate::provider::{AuthProvider, LoginOutcome};
use crate::storage::KeyValueStorage;

/// Shown when either field is empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// Validate raw form input, returning the values to submit.
///
/// Only a literally empty field is refused; both values are submitted
/// exactly as typed.
///
/// # Errors
///
/// Returns [`MISSING_FIELDS_MESSAGE`] when either field is empty.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Where the form goes after a submit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Replace the whole document with this route.
    HardRedirect(&'static str),
    /// Stay on the form; `error` holds the message to show.
    Stay,
}

/// Login form input state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("error", &self.error)
            .finish()
    }
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into(), error: None }
    }

    /// Validate, run the provider login and record the result.
    ///
    /// On failure the inputs are left as typed for a retry.
    pub async fn submit<S, B>(&mut self, provider: &AuthProvider<S, B>) -> SubmitOutcome
    where
        S: KeyValueStorage,
        B: AuthBackend,
    {
        let (email, password) = match validate_login_input(&self.email, &self.password) {
            Ok(values) => values,
            Err(message) => {
                self.error = Some(message.to_owned());
                return SubmitOutcome::Stay;
            }
        };
        self.error = None;

        let outcome = provider.login(&email, &password).await;
        self.apply(outcome)
    }

    /// Fold a login outcome into the form.
    pub fn apply(&mut self, outcome: LoginOutcome) -> SubmitOutcome {
        match outcome {
            LoginOutcome::Success => {
                self.password.clear();
                self.error = None;
                SubmitOutcome::HardRedirect(ADMIN_LANDING_ROUTE)
            }
            LoginOutcome::Failure { message } => {
                self.error = Some(message);
                SubmitOutcome::Stay
            }
        }
    }
}
