//! Error types for storage and backend collaborators.

/// Failure reported by a [`crate::KeyValueStorage`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The durable storage area could not be reached (no window, quota, private mode).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing the backing file failed.
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The persisted document is not valid JSON.
    #[error("storage payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by a [`crate::AuthBackend`] call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with a non-2xx status and a JSON body.
    #[error("backend rejected request ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the error body, when present.
        message: Option<String>,
    },
    /// The request never produced a response (DNS, connect, CORS, offline).
    #[error("transport failed: {0}")]
    Transport(String),
    /// A response arrived but its body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),
}
