use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::StorageError;
use crate::object::Object;

/// One delimiter-grouped listing of a directory prefix: the objects directly
/// under the prefix plus the immediate sub-prefixes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub objects: Vec<Object>,
    pub subdirs: Vec<String>,
}

/// Listing interface onto an object-storage bucket.
///
/// The trait is intentionally small so it can be implemented for different
/// backends. `list_dir` groups object names by the `/` delimiter: it returns
/// only the objects whose names sit directly under `prefix`, plus each
/// immediate sub-prefix, never a recursive listing. A placeholder object
/// whose name equals `prefix` itself is returned verbatim; filtering it out
/// is the caller's business.
///
/// Implementations should return [`StorageError::Cancelled`] promptly once
/// `cancel` fires and must not require the token to ever fire.
#[async_trait]
pub trait Bucket: Send + Sync {
    async fn list_dir(
        &self,
        prefix: &str,
        cancel: CancellationToken,
    ) -> Result<Listing, StorageError>;
}
