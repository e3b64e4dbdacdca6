use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::oneshot;

use super::*;
use crate::backend::LoginGrant;
use crate::error::StorageError;
use crate::storage::MemoryStorage;
use crate::store::{ADMIN_KEY, TOKEN_KEY};

// =============================================================
// Test backends
// =============================================================

type LoginReply = Result<LoginGrant, BackendError>;
type PasswordReply = Result<Option<String>, BackendError>;

/// Replies to each call with the next queued result.
#[derive(Default)]
struct ScriptedBackend {
    logins: Mutex<VecDeque<LoginReply>>,
    password_changes: Mutex<VecDeque<PasswordReply>>,
    login_calls: AtomicUsize,
    seen_tokens: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn with_logins(replies: Vec<LoginReply>) -> Self {
        Self { logins: Mutex::new(replies.into()), ..Self::default() }
    }

    fn with_password_changes(replies: Vec<PasswordReply>) -> Self {
        Self { password_changes: Mutex::new(replies.into()), ..Self::default() }
    }
}

impl AuthBackend for ScriptedBackend {
    async fn login(&self, _credentials: &Credentials) -> LoginReply {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.logins
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".to_owned())))
    }

    async fn change_password(&self, token: &str, _change: &PasswordChange) -> PasswordReply {
        self.seen_tokens.lock().unwrap().push(token.to_owned());
        self.password_changes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Transport("no scripted reply".to_owned())))
    }
}

/// Each login waits for its own gate, letting tests choose resolution order.
struct GatedBackend {
    gates: Mutex<VecDeque<oneshot::Receiver<LoginReply>>>,
}

impl AuthBackend for GatedBackend {
    async fn login(&self, _credentials: &Credentials) -> LoginReply {
        let gate = self.gates.lock().unwrap().pop_front().expect("gate available");
        gate.await.unwrap_or_else(|_| Err(BackendError::Transport("gate dropped".to_owned())))
    }

    async fn change_password(&self, _token: &str, _change: &PasswordChange) -> PasswordReply {
        Ok(None)
    }
}

/// Storage whose writes always fail.
struct ReadOnlyStorage;

impl KeyValueStorage for ReadOnlyStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_owned()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_owned()))
    }
}

fn grant(token: &str, id: i64) -> LoginGrant {
    LoginGrant { token: token.to_owned(), admin: AdminIdentity(serde_json::json!({ "id": id })) }
}

fn record_states<S: KeyValueStorage, B: AuthBackend>(provider: &AuthProvider<S, B>) -> Arc<Mutex<Vec<AuthSnapshot>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    provider.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.clone()));
    seen
}

// =============================================================
// Start-up
// =============================================================

#[test]
fn start_with_empty_storage_is_anonymous() {
    let provider = AuthProvider::start(MemoryStorage::new(), ScriptedBackend::default());
    let snapshot = provider.snapshot();
    assert_eq!(snapshot.phase(), AuthPhase::Anonymous);
    assert!(!snapshot.loading);
    assert!(snapshot.token().is_none());
    assert!(snapshot.admin().is_none());
}

#[test]
fn start_restores_persisted_session_without_backend_call() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "T").unwrap();
    storage.set_item(ADMIN_KEY, r#"{"id":1}"#).unwrap();

    let provider = AuthProvider::start(storage, ScriptedBackend::default());
    assert_eq!(provider.phase(), AuthPhase::Authenticated);
    assert_eq!(provider.token().as_deref(), Some("T"));
    assert_eq!(provider.backend().login_calls.load(Ordering::SeqCst), 0);
}

// =============================================================
// login
// =============================================================

#[tokio::test]
async fn login_success_persists_and_survives_restart() {
    let storage = MemoryStorage::new();
    let provider = AuthProvider::start(storage.clone(), ScriptedBackend::with_logins(vec![Ok(grant("T", 1))]));

    let outcome = provider.login("a@x.com", "pw").await;
    assert_eq!(outcome, LoginOutcome::Success);
    assert_eq!(provider.phase(), AuthPhase::Authenticated);
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("T"));
    assert_eq!(storage.get_item(ADMIN_KEY).unwrap().as_deref(), Some(r#"{"id":1}"#));

    drop(provider);
    let restarted = AuthProvider::start(storage, ScriptedBackend::default());
    let snapshot = restarted.snapshot();
    assert_eq!(snapshot.phase(), AuthPhase::Authenticated);
    assert_eq!(snapshot.token(), Some("T"));
    assert_eq!(snapshot.admin(), Some(&AdminIdentity(serde_json::json!({ "id": 1 }))));
}

#[tokio::test]
async fn login_raises_then_lowers_loading() {
    let provider = AuthProvider::start(MemoryStorage::new(), ScriptedBackend::with_logins(vec![Ok(grant("T", 1))]));
    let seen = record_states(&provider);

    provider.login("a@x.com", "pw").await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].phase(), AuthPhase::Authenticating);
    assert!(seen[0].session.is_none());
    assert!(!seen[1].loading);
    assert_eq!(seen[1].token(), Some("T"));
}

#[tokio::test]
async fn login_rejection_returns_backend_message_and_changes_nothing() {
    let storage = MemoryStorage::new();
    let backend = ScriptedBackend::with_logins(vec![Err(BackendError::Rejected {
        status: 401,
        message: Some("Invalid credentials".to_owned()),
    })]);
    let provider = AuthProvider::start(storage.clone(), backend);
    let seen = record_states(&provider);

    let outcome = provider.login("a@x.com", "wrong").await;
    assert_eq!(outcome, LoginOutcome::Failure { message: "Invalid credentials".to_owned() });
    assert_eq!(outcome.message(), Some("Invalid credentials"));
    assert_eq!(provider.snapshot(), AuthSnapshot::default());
    assert!(storage.is_empty());

    let seen = seen.lock().unwrap();
    assert!(seen[0].loading);
    assert!(!seen.last().unwrap().loading);
}

#[tokio::test]
async fn login_rejection_without_message_uses_fallback() {
    let backend = ScriptedBackend::with_logins(vec![Err(BackendError::Rejected { status: 500, message: None })]);
    let provider = AuthProvider::start(MemoryStorage::new(), backend);
    let outcome = provider.login("a@x.com", "pw").await;
    assert_eq!(outcome.message(), Some(LOGIN_FAILED_MESSAGE));
}

#[tokio::test]
async fn login_transport_failure_is_generic_server_error() {
    let backend = ScriptedBackend::with_logins(vec![Err(BackendError::Transport("connection refused".to_owned()))]);
    let storage = MemoryStorage::new();
    let provider = AuthProvider::start(storage.clone(), backend);

    let outcome = provider.login("a@x.com", "pw").await;
    assert_eq!(outcome, LoginOutcome::Failure { message: SERVER_ERROR_MESSAGE.to_owned() });
    assert!(!provider.snapshot().loading);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn login_decode_failure_is_generic_server_error() {
    let backend = ScriptedBackend::with_logins(vec![Err(BackendError::Decode("expected value".to_owned()))]);
    let provider = AuthProvider::start(MemoryStorage::new(), backend);
    let outcome = provider.login("a@x.com", "pw").await;
    assert_eq!(outcome.message(), Some(SERVER_ERROR_MESSAGE));
}

#[tokio::test]
async fn failed_login_keeps_existing_session() {
    let storage = MemoryStorage::new();
    let backend = ScriptedBackend::with_logins(vec![
        Ok(grant("T", 1)),
        Err(BackendError::Rejected { status: 401, message: Some("nope".to_owned()) }),
    ]);
    let provider = AuthProvider::start(storage.clone(), backend);

    assert!(provider.login("a@x.com", "pw").await.is_success());
    assert!(!provider.login("a@x.com", "bad").await.is_success());
    assert_eq!(provider.phase(), AuthPhase::Authenticated);
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("T"));
}

#[tokio::test]
async fn login_succeeds_in_memory_when_persistence_fails() {
    let provider = AuthProvider::start(ReadOnlyStorage, ScriptedBackend::with_logins(vec![Ok(grant("T", 1))]));
    assert!(provider.login("a@x.com", "pw").await.is_success());
    assert_eq!(provider.token().as_deref(), Some("T"));
}

#[tokio::test]
async fn sequential_logins_toggle_loading_once_per_request() {
    let backend = ScriptedBackend::with_logins(vec![
        Err(BackendError::Transport("offline".to_owned())),
        Ok(grant("T", 1)),
    ]);
    let provider = AuthProvider::start(MemoryStorage::new(), backend);
    let seen = record_states(&provider);

    provider.login("a@x.com", "pw").await;
    provider.login("a@x.com", "pw").await;

    let loading: Vec<bool> = seen.lock().unwrap().iter().map(|s| s.loading).collect();
    assert_eq!(loading, vec![true, false, true, false]);
    assert_eq!(provider.backend().login_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn overlapping_logins_last_response_wins() {
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    let backend = GatedBackend { gates: Mutex::new(VecDeque::from([first_rx, second_rx])) };
    let storage = MemoryStorage::new();
    let provider = AuthProvider::start(storage.clone(), backend);

    let driver = async {
        tokio::task::yield_now().await;
        second_tx.send(Ok(grant("second", 2))).unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        first_tx.send(Ok(grant("first", 1))).unwrap();
    };

    let (first, second, ()) = tokio::join!(
        provider.login("a@x.com", "pw"),
        provider.login("a@x.com", "pw"),
        driver
    );

    assert!(first.is_success());
    assert!(second.is_success());
    let snapshot = provider.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.token(), Some("first"));
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("first"));
}

// =============================================================
// logout
// =============================================================

#[tokio::test]
async fn logout_clears_memory_and_storage() {
    let storage = MemoryStorage::new();
    let provider = AuthProvider::start(storage.clone(), ScriptedBackend::with_logins(vec![Ok(grant("T", 1))]));
    provider.login("a@x.com", "pw").await;

    provider.logout();
    assert_eq!(provider.phase(), AuthPhase::Anonymous);
    assert!(!storage.contains_key(TOKEN_KEY));
    assert!(!storage.contains_key(ADMIN_KEY));

    let restarted = AuthProvider::start(storage, ScriptedBackend::default());
    assert_eq!(restarted.phase(), AuthPhase::Anonymous);
}

#[test]
fn logout_when_anonymous_is_harmless() {
    let provider = AuthProvider::start(MemoryStorage::new(), ScriptedBackend::default());
    provider.logout();
    assert_eq!(provider.snapshot(), AuthSnapshot::default());
}

#[test]
fn logout_tolerates_storage_failure() {
    let provider = AuthProvider::start(ReadOnlyStorage, ScriptedBackend::default());
    provider.logout();
    assert_eq!(provider.phase(), AuthPhase::Anonymous);
}

#[test]
fn clones_share_state() {
    let provider = AuthProvider::start(MemoryStorage::new(), ScriptedBackend::default());
    let seen = record_states(&provider);
    provider.clone().logout();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

// =============================================================
// change_password
// =============================================================

#[tokio::test]
async fn change_password_requires_session() {
    let provider = AuthProvider::start(MemoryStorage::new(), ScriptedBackend::default());
    let outcome = provider.change_password("old", "new").await;
    assert_eq!(outcome, PasswordChangeOutcome::Failed { message: NOT_AUTHENTICATED_MESSAGE.to_owned() });
    assert!(provider.backend().seen_tokens.lock().unwrap().is_empty());
}

#[tokio::test]
async fn change_password_sends_current_token() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "T").unwrap();
    storage.set_item(ADMIN_KEY, "{}").unwrap();
    let backend = ScriptedBackend::with_password_changes(vec![Ok(Some("Password updated".to_owned())), Ok(None)]);
    let provider = AuthProvider::start(storage, backend);

    let outcome = provider.change_password("old", "new").await;
    assert_eq!(outcome, PasswordChangeOutcome::Changed { message: "Password updated".to_owned() });
    assert_eq!(provider.change_password("old", "new").await.message(), PASSWORD_CHANGED_MESSAGE);
    assert_eq!(*provider.backend().seen_tokens.lock().unwrap(), vec!["T".to_owned(), "T".to_owned()]);
}

#[tokio::test]
async fn change_password_failures_are_messages() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "T").unwrap();
    storage.set_item(ADMIN_KEY, "{}").unwrap();
    let backend = ScriptedBackend::with_password_changes(vec![
        Err(BackendError::Rejected { status: 400, message: Some("Current password is incorrect".to_owned()) }),
        Err(BackendError::Rejected { status: 401, message: None }),
        Err(BackendError::Transport("offline".to_owned())),
    ]);
    let provider = AuthProvider::start(storage, backend);

    assert_eq!(
        provider.change_password("bad", "new").await,
        PasswordChangeOutcome::Failed { message: "Current password is incorrect".to_owned() }
    );
    assert_eq!(provider.change_password("old", "new").await.message(), PASSWORD_CHANGE_FAILED_MESSAGE);
    assert_eq!(provider.change_password("old", "new").await.message(), PASSWORD_CHANGE_FAILED_MESSAGE);
}
