pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors produced by bucket operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend rejected or failed the request (network, auth, server
    /// error). Safe to retry.
    #[error("backend error: {message}")]
    Backend { message: String },

    /// The caller's cancellation token fired before the call completed.
    #[error("operation cancelled")]
    Cancelled,
}
