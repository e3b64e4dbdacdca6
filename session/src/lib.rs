//! Admin session core shared by the browser client and the operator CLI.
//!
//! This crate owns the session data model, the two-key persisted layout, the
//! auth provider state machine and the route-guard decision. It performs no
//! I/O of its own: storage and the credential-check transport are injected
//! through [`KeyValueStorage`] and [`AuthBackend`], so the same provider runs
//! against `localStorage` + `gloo-net` in the browser and a JSON file +
//! `reqwest` on the command line.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod guard;
pub mod login_form;
pub mod model;
pub mod provider;
pub mod storage;
pub mod store;

pub use backend::{AuthBackend, LoginGrant, PasswordChange};
pub use catalog::{AdminResource, AdminSection, SiteRoute};
pub use error::{BackendError, StorageError};
pub use guard::GuardDecision;
pub use login_form::{LoginForm, SubmitOutcome};
pub use model::{AdminIdentity, Credentials, Session};
pub use provider::{AuthPhase, AuthProvider, AuthSnapshot, LoginOutcome, PasswordChangeOutcome};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::SessionStore;
