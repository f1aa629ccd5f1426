use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use strata_core::Clock;
use strata_storage::{Bucket, Object};

use crate::entry::Entry;
use crate::error::{DirViewError, Result};
use crate::journal::Journal;
use crate::name::{self, NameRule};

/// How long a directory listing is trusted before the bucket is asked
/// again.
///
/// Absorbs quick follow-up reads, e.g. a readdir followed by a lookup for
/// each child. The cost is that foreign writes to a recently listed
/// directory take up to this long to show up here.
pub const LISTING_CACHE_TTL: Duration = Duration::from_secs(10);

/// How long a local addition or removal keeps overriding what the bucket
/// reports.
///
/// Masks the backend's lack of list-your-own-writes consistency: a
/// just-created or just-deleted object may be listed wrong for a while, and
/// a listing that got it right once may get it wrong again. Must exceed
/// [`LISTING_CACHE_TTL`], or the override would not survive a refresh. The
/// cost is that foreign modifications to a recently locally-modified name
/// stay hidden for up to this long.
pub const MODIFICATION_MEMORY_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL knobs for a [`DirView`].
///
/// The defaults are the production constants; overriding them is mainly
/// intended for tests.
#[derive(Debug, Clone, Copy)]
pub struct DirViewOptions {
    pub listing_cache_ttl: Duration,
    pub modification_memory_ttl: Duration,
}

impl Default for DirViewOptions {
    fn default() -> Self {
        Self {
            listing_cache_ttl: LISTING_CACHE_TTL,
            modification_memory_ttl: MODIFICATION_MEMORY_TTL,
        }
    }
}

/// A cached, consistency-patched view of one "directory" in an object
/// store.
///
/// A directory is an object-name prefix that is empty (the root) or ends
/// with `/`. The view holds the bucket's last listing of its direct
/// children for [`LISTING_CACHE_TTL`], and overlays locally noted additions
/// and removals on every listing for [`MODIFICATION_MEMORY_TTL`], so the
/// caller's own writes stay visible while the backend's listings catch up.
///
/// Not safe for concurrent use: all state is owned by the instance and
/// methods take `&mut self`. Callers sharing a view across tasks must wrap
/// it in their own lock.
pub struct DirView {
    bucket: Arc<dyn Bucket>,
    clock: Arc<dyn Clock>,
    options: DirViewOptions,

    /// Directory identity. `name::is_dir_prefix` holds for the lifetime of
    /// the view.
    prefix: String,

    /// Best known contents: the last validated listing with the journal
    /// replayed on top, patched in place by later modifications. Keys are
    /// full names; `expiration` stays `None` until the first successful
    /// refresh.
    contents: HashMap<String, Entry>,
    expiration: Option<Instant>,

    journal: Journal,
}

impl std::fmt::Debug for DirView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirView")
            .field("options", &self.options)
            .field("prefix", &self.prefix)
            .field("contents", &self.contents)
            .field("expiration", &self.expiration)
            .field("journal", &self.journal)
            .finish_non_exhaustive()
    }
}

impl DirView {
    /// Creates a view of the directory identified by `prefix`, using
    /// `clock` for all TTL decisions.
    ///
    /// Fails with [`DirViewError::InvalidName`] if `prefix` is not a
    /// directory identity. The view starts stale: the first `list` call
    /// asks the bucket.
    pub fn new(
        bucket: Arc<dyn Bucket>,
        clock: Arc<dyn Clock>,
        prefix: impl Into<String>,
    ) -> Result<Self> {
        Self::with_options(bucket, clock, prefix, DirViewOptions::default())
    }

    pub fn with_options(
        bucket: Arc<dyn Bucket>,
        clock: Arc<dyn Clock>,
        prefix: impl Into<String>,
        options: DirViewOptions,
    ) -> Result<Self> {
        let prefix = prefix.into();
        if !name::is_dir_prefix(&prefix) {
            return Err(DirViewError::InvalidName {
                name: prefix,
                reason: NameRule::NotADirPrefix,
            });
        }

        Ok(Self {
            bucket,
            clock,
            options,
            prefix,
            contents: HashMap::new(),
            expiration: None,
            journal: Journal::new(),
        })
    }

    /// The directory prefix this view was configured with.
    pub fn name(&self) -> &str {
        &self.prefix
    }

    /// Lists the directory: the objects directly within it and the
    /// immediate sub-directory prefixes, all fully named.
    ///
    /// Reflects everything noted via [`Self::note_new_object`],
    /// [`Self::note_new_subdir`], and [`Self::note_removal`]. Ordering is
    /// unspecified; callers wanting deterministic output must sort.
    pub async fn list(
        &mut self,
        cancel: CancellationToken,
    ) -> Result<(Vec<Object>, Vec<String>)> {
        self.ensure_fresh(cancel).await?;

        let mut objects = Vec::new();
        let mut subdirs = Vec::new();
        for entry in self.contents.values() {
            match entry {
                Entry::Object(object) => objects.push(object.clone()),
                Entry::Subdir(name) => subdirs.push(name.clone()),
            }
        }
        Ok((objects, subdirs))
    }

    /// Notes that `object` was just created in this directory, overriding
    /// any earlier addition or removal of the same name.
    ///
    /// For the modification-memory window, [`Self::list`] reports the
    /// object even when the bucket's listings do not.
    pub fn note_new_object(&mut self, object: Object) -> Result<()> {
        name::validate_object_name(&self.prefix, &object.name).map_err(|reason| {
            DirViewError::InvalidName {
                name: object.name.clone(),
                reason,
            }
        })?;

        let name = object.name.clone();
        self.record(name, Some(Entry::Object(object)));
        Ok(())
    }

    /// Notes that the sub-directory `name` was just created in this
    /// directory, overriding any earlier addition or removal of the same
    /// name.
    pub fn note_new_subdir(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        name::validate_subdir_name(&self.prefix, &name).map_err(|reason| {
            DirViewError::InvalidName {
                name: name.clone(),
                reason,
            }
        })?;

        self.record(name.clone(), Some(Entry::Subdir(name)));
        Ok(())
    }

    /// Notes that the object or sub-directory `name` was just removed from
    /// this directory, overriding any earlier addition or removal.
    ///
    /// For the modification-memory window, [`Self::list`] omits the name
    /// even when the bucket's listings still carry it.
    pub fn note_removal(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let classified = if name::is_dir_prefix(&name) {
            name::validate_subdir_name(&self.prefix, &name)
        } else {
            name::validate_object_name(&self.prefix, &name)
        };
        classified.map_err(|reason| DirViewError::InvalidName {
            name: name.clone(),
            reason,
        })?;

        self.record(name, None);
        Ok(())
    }

    /// Journals a modification, applies it to the current contents (fresh
    /// or stale, so the next `list` sees it without a refresh), and trims
    /// expired records.
    fn record(&mut self, name: String, entry: Option<Entry>) {
        let now = self.clock.now();
        let expiration = now + self.options.modification_memory_ttl;
        let record = self.journal.put(name, entry, expiration);
        record.apply_to(&mut self.contents);
        self.journal.prune(now);
    }

    /// Regenerates the contents from the bucket if the cached listing has
    /// expired; does nothing otherwise.
    ///
    /// The refresh is all-or-nothing: no stored state changes until every
    /// name the bucket returned has been validated, so a failed, cancelled,
    /// or invalid listing leaves the previous contents and expiration in
    /// place.
    async fn ensure_fresh(&mut self, cancel: CancellationToken) -> Result<()> {
        if let Some(expiration) = self.expiration {
            if self.clock.now() < expiration {
                return Ok(());
            }
        }

        let listing = self.bucket.list_dir(&self.prefix, cancel).await?;

        let mut contents =
            HashMap::with_capacity(listing.objects.len() + listing.subdirs.len());
        for object in listing.objects {
            // A placeholder object for the directory itself shows up in the
            // listing; it is not a child.
            if object.name == self.prefix {
                continue;
            }

            name::validate_object_name(&self.prefix, &object.name).map_err(|detail| {
                DirViewError::BackendInvariant {
                    name: object.name.clone(),
                    detail,
                }
            })?;
            contents.insert(object.name.clone(), Entry::Object(object));
        }
        for subdir in listing.subdirs {
            name::validate_subdir_name(&self.prefix, &subdir).map_err(|detail| {
                DirViewError::BackendInvariant {
                    name: subdir.clone(),
                    detail,
                }
            })?;

            // Re-check strict descent independently of the validator.
            if !(subdir.starts_with(&self.prefix) && subdir != self.prefix) {
                return Err(DirViewError::BackendInvariant {
                    name: subdir,
                    detail: NameRule::NotADescendant,
                });
            }
            contents.insert(subdir.clone(), Entry::Subdir(subdir));
        }

        let now = self.clock.now();
        self.journal.prune(now);

        tracing::debug!(
            target = "strata.dirview",
            prefix = %self.prefix,
            entries = contents.len(),
            overrides = self.journal.len(),
            "refreshed directory listing"
        );

        self.contents = contents;
        self.expiration = Some(now + self.options.listing_cache_ttl);
        self.journal.replay(&mut self.contents);

        Ok(())
    }

    /// Panics if any internal invariant is broken.
    ///
    /// Purely diagnostic: nothing on the production path calls this. Tests
    /// run it after every mutation to catch state corruption at the
    /// operation that caused it.
    pub fn check_invariants(&self) {
        assert!(
            name::is_dir_prefix(&self.prefix),
            "illegal directory prefix: {:?}",
            self.prefix
        );

        for (key, entry) in &self.contents {
            assert!(
                key.starts_with(&self.prefix) && key != &self.prefix,
                "contents key {key:?} is not a strict descendant of {:?}",
                self.prefix
            );
            match entry {
                Entry::Object(object) => {
                    assert_eq!(
                        &object.name, key,
                        "object indexed under the wrong name"
                    );
                    if let Err(rule) = name::validate_object_name(&self.prefix, &object.name) {
                        panic!("illegal object name {:?} in contents: {rule}", object.name);
                    }
                }
                Entry::Subdir(subdir) => {
                    assert_eq!(
                        subdir, key,
                        "sub-directory indexed under the wrong name"
                    );
                    if let Err(rule) = name::validate_subdir_name(&self.prefix, subdir) {
                        panic!("illegal sub-directory name {subdir:?} in contents: {rule}");
                    }
                }
            }
        }

        self.journal.check_invariants();
        for record in self.journal.records() {
            match &record.entry {
                None => assert!(
                    !self.contents.contains_key(&record.name),
                    "contents still holds {:?} despite a pending removal",
                    record.name
                ),
                Some(entry) => assert_eq!(
                    self.contents.get(&record.name),
                    Some(entry),
                    "contents disagrees with the journaled addition of {:?}",
                    record.name
                ),
            }
        }
    }
}
