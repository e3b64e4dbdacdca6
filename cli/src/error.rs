use session::{BackendError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not logged in; run `stem-admin login` first")]
    NotLoggedIn,
    #[error("no home directory; pass --session-file or set STEM_SESSION_FILE")]
    NoSessionFile,
    #[error("{0}")]
    Failed(String),
    #[error("backend request failed: {0}")]
    Backend(#[from] BackendError),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
}
