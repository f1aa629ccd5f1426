use strata_storage::StorageError;

use crate::name::NameRule;

pub type Result<T> = std::result::Result<T, DirViewError>;

/// Errors produced by directory views.
#[derive(Debug, thiserror::Error)]
pub enum DirViewError {
    /// A name fails the validator's rules for the calling operation's
    /// required classification. Always a caller bug; never retried.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: NameRule },

    /// The backend listing call failed. The cached contents are untouched
    /// and the whole operation is safe to retry.
    #[error("listing failed: {0}")]
    Listing(#[from] StorageError),

    /// The backend returned a name that violates the naming contract for
    /// the requested prefix. The refresh was aborted with the cached
    /// contents untouched; retrying will not help until the backend is
    /// fixed.
    #[error("backend returned illegal name {name:?}: {detail}")]
    BackendInvariant { name: String, detail: NameRule },
}
