use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use crate::entry::Entry;

/// A recent local addition or removal that overrides backend listings until
/// it expires.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Modification {
    pub name: String,
    pub expiration: Instant,
    /// `None` records a removal; `Some` records an addition or override.
    pub entry: Option<Entry>,
}

impl Modification {
    /// Applies this record to a contents map: removals delete the name,
    /// additions insert or overwrite it.
    pub fn apply_to(&self, contents: &mut HashMap<String, Entry>) {
        match &self.entry {
            None => {
                contents.remove(&self.name);
            }
            Some(entry) => {
                contents.insert(self.name.clone(), entry.clone());
            }
        }
    }
}

/// Insertion-ordered journal of recent local modifications, with a name
/// index for direct supersede and removal.
///
/// Records are keyed by a monotonically increasing sequence number, so
/// iterating the map visits them in insertion order; the index maps each
/// name to its current sequence slot. At most one record exists per name.
#[derive(Debug, Default)]
pub(crate) struct Journal {
    records: BTreeMap<u64, Modification>,
    index: HashMap<String, u64>,
    next_seq: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `name` was locally added (`Some`) or removed (`None`),
    /// superseding any earlier record for the same name. Returns the new
    /// record so the caller can apply it immediately.
    pub fn put(&mut self, name: String, entry: Option<Entry>, expiration: Instant) -> &Modification {
        if let Some(seq) = self.index.remove(&name) {
            self.records.remove(&seq);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(name.clone(), seq);
        self.records.entry(seq).or_insert(Modification {
            name,
            expiration,
            entry,
        })
    }

    /// Drops expired records, scanning oldest-first and stopping at the
    /// first record that is still live.
    ///
    /// Insertion order tracks expiration order because the TTL is a
    /// per-view constant. With a non-monotonic clock, expired records past
    /// the stop point linger until a later prune; that only stretches the
    /// masking window, it never corrupts the cache. If per-record TTLs are
    /// ever introduced this must become a full scan or a priority queue.
    pub fn prune(&mut self, now: Instant) {
        while let Some(entry) = self.records.first_entry() {
            if now < entry.get().expiration {
                break;
            }
            let record = entry.remove();
            self.index.remove(&record.name);
        }
    }

    /// Applies every record to `contents`, oldest first. Names are unique,
    /// so order only affects determinism, not the outcome.
    pub fn replay(&self, contents: &mut HashMap<String, Entry>) {
        for record in self.records.values() {
            record.apply_to(contents);
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &Modification> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Panics if the record sequence and the name index disagree.
    ///
    /// Size equality plus every record being indexed at its own slot makes
    /// the two structures a bijection, which also rules out duplicate
    /// names.
    pub fn check_invariants(&self) {
        assert_eq!(
            self.records.len(),
            self.index.len(),
            "journal index size disagrees with the record sequence"
        );
        for (seq, record) in &self.records {
            match self.index.get(&record.name) {
                Some(indexed) => assert_eq!(
                    indexed, seq,
                    "journal record {:?} indexed under the wrong slot",
                    record.name
                ),
                None => panic!("journal record {:?} missing from the index", record.name),
            }
        }
    }
}
