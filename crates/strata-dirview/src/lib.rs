//! Cached, consistency-patched directory views over an object store.
//!
//! Object storage has no real directories: a "directory" is an object-name
//! prefix that ends in `/` (or the empty prefix, for the root), and listing
//! one is a network call with no read-your-writes guarantee: a just-created
//! or just-deleted object may be reported wrong by the very next listing.
//!
//! [`DirView`] papers over both problems for a single directory:
//! - it caches each listing for a short TTL, absorbing quick follow-up
//!   reads (a readdir followed by a lookup per child);
//! - it journals recent local additions and removals and replays them on
//!   top of every listing for a much longer TTL, so the caller's own writes
//!   stay visible while the backend catches up.
//!
//! A view owns its state exclusively and performs no locking; callers that
//! share one across tasks must serialize access themselves.

mod entry;
mod error;
mod journal;
mod name;
mod view;

pub use entry::Entry;
pub use error::{DirViewError, Result};
pub use name::{is_dir_prefix, validate_object_name, validate_subdir_name, NameRule};
pub use view::{DirView, DirViewOptions, LISTING_CACHE_TTL, MODIFICATION_MEMORY_TTL};
