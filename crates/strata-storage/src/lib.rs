//! Storage backend seam for strata.
//!
//! The rest of the system talks to object storage through the [`Bucket`]
//! trait, which exposes exactly one capability: a delimiter-grouped listing
//! of a directory prefix. Implementations wrap a real backend;
//! [`MemoryBucket`] is an in-process implementation used by tests.

mod bucket;
mod error;
mod memory;
mod object;

pub use bucket::{Bucket, Listing};
pub use error::{Result, StorageError};
pub use memory::MemoryBucket;
pub use object::Object;
