use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bucket::{Bucket, Listing};
use crate::error::StorageError;
use crate::object::Object;

/// An in-memory [`Bucket`] with real delimiter grouping.
///
/// Objects live in a name-ordered map, so listings come back sorted the way
/// a real bucket returns them. Intended for tests: [`MemoryBucket::list_calls`]
/// counts the listings actually served so cache-reuse behavior can be
/// asserted, and [`MemoryBucket::fail_next_list`] injects a one-shot error.
#[derive(Debug, Default)]
pub struct MemoryBucket {
    objects: Mutex<BTreeMap<String, Object>>,
    list_calls: AtomicUsize,
    fail_next: Mutex<Option<StorageError>>,
}

impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or overwrites an object.
    pub fn insert(&self, object: Object) {
        let mut objects = self.objects.lock().expect("bucket mutex poisoned");
        objects.insert(object.name.clone(), object);
    }

    /// Deletes an object, returning it if it existed.
    pub fn remove(&self, name: &str) -> Option<Object> {
        let mut objects = self.objects.lock().expect("bucket mutex poisoned");
        objects.remove(name)
    }

    /// Number of listings served so far. Injected failures and cancelled
    /// calls are not counted.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Makes the next `list_dir` call fail with `error` instead of listing.
    pub fn fail_next_list(&self, error: StorageError) {
        let mut fail_next = self.fail_next.lock().expect("bucket mutex poisoned");
        *fail_next = Some(error);
    }
}

#[async_trait]
impl Bucket for MemoryBucket {
    async fn list_dir(
        &self,
        prefix: &str,
        cancel: CancellationToken,
    ) -> Result<Listing, StorageError> {
        if cancel.is_cancelled() {
            return Err(StorageError::Cancelled);
        }

        if let Some(error) = self.fail_next.lock().expect("bucket mutex poisoned").take() {
            return Err(error);
        }

        let objects = self.objects.lock().expect("bucket mutex poisoned");
        let mut listing = Listing::default();
        let mut subdirs = BTreeSet::new();
        for (name, object) in
            objects.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        {
            if !name.starts_with(prefix) {
                break;
            }

            // A name whose remainder crosses a `/` contributes only the
            // sub-prefix up to and including that slash. The remainder may
            // be empty: that is the directory's own placeholder object,
            // which a real backend reports as a direct child.
            let remainder = &name[prefix.len()..];
            match remainder.find('/') {
                None => listing.objects.push(object.clone()),
                Some(idx) => {
                    subdirs.insert(format!("{prefix}{}", &remainder[..=idx]));
                }
            }
        }
        listing.subdirs = subdirs.into_iter().collect();

        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            target = "strata.storage",
            prefix,
            objects = listing.objects.len(),
            subdirs = listing.subdirs.len(),
            "served in-memory listing"
        );
        Ok(listing)
    }
}
