use super::*;
use crate::backend::{LoginGrant, PasswordChange};
use crate::error::BackendError;
use crate::model::{AdminIdentity, Credentials};
use crate::storage::MemoryStorage;

/// Accepts exactly one email/password pair.
struct FixedBackend;

impl AuthBackend for FixedBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, BackendError> {
        if credentials.email == "a@x.com" && credentials.password == "pw" {
            Ok(LoginGrant { token: "T".to_owned(), admin: AdminIdentity(serde_json::json!({ "id": 1 })) })
        } else {
            Err(BackendError::Rejected { status: 401, message: Some("Invalid credentials".to_owned()) })
        }
    }

    async fn change_password(&self, _token: &str, _change: &PasswordChange) -> Result<Option<String>, BackendError> {
        Ok(None)
    }
}

// =============================================================
// validate_login_input
// =============================================================

#[test]
fn validate_submits_input_as_typed() {
    assert_eq!(
        validate_login_input("  a@x.com ", " pw "),
        Ok(("  a@x.com ".to_owned(), " pw ".to_owned()))
    );
}

#[test]
fn validate_requires_both_fields() {
    assert_eq!(validate_login_input("", "pw"), Err(MISSING_FIELDS_MESSAGE));
    assert_eq!(validate_login_input("   ", "pw"), Ok(("   ".to_owned(), "pw".to_owned())));
    assert_eq!(validate_login_input("a@x.com", ""), Err(MISSING_FIELDS_MESSAGE));
}

// =============================================================
// submit
// =============================================================

#[tokio::test]
async fn empty_fields_never_reach_backend() {
    let provider = AuthProvider::start(MemoryStorage::new(), FixedBackend);
    let seen = std::sync::Arc::new(std::sync::Mutex::new(0_usize));
    let sink = std::sync::Arc::clone(&seen);
    provider.subscribe(move |_| *sink.lock().unwrap() += 1);

    let mut form = LoginForm::new("", "pw");
    assert_eq!(form.submit(&provider).await, SubmitOutcome::Stay);
    assert_eq!(form.error.as_deref(), Some(MISSING_FIELDS_MESSAGE));
    assert_eq!(*seen.lock().unwrap(), 0);
}

#[tokio::test]
async fn success_hard_redirects_to_dashboard() {
    let provider = AuthProvider::start(MemoryStorage::new(), FixedBackend);
    let mut form = LoginForm::new("a@x.com", "pw");

    assert_eq!(form.submit(&provider).await, SubmitOutcome::HardRedirect("/admin-dashboard"));
    assert!(form.error.is_none());
    assert!(form.password.is_empty());
    assert!(provider.snapshot().is_authenticated());
}

#[tokio::test]
async fn failure_keeps_inputs_and_shows_message() {
    let provider = AuthProvider::start(MemoryStorage::new(), FixedBackend);
    let mut form = LoginForm::new("a@x.com", "wrong");

    assert_eq!(form.submit(&provider).await, SubmitOutcome::Stay);
    assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(form.email, "a@x.com");
    assert_eq!(form.password, "wrong");

    form.password = "pw".to_owned();
    assert_eq!(form.submit(&provider).await, SubmitOutcome::HardRedirect("/admin-dashboard"));
    assert!(form.error.is_none());
}

#[test]
fn debug_redacts_password() {
    let form = LoginForm::new("a@x.com", "hunter2");
    assert!(!format!("{form:?}").contains("hunter2"));
}
