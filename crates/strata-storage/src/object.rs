use serde::{Deserialize, Serialize};

/// Metadata for a single object in a bucket.
///
/// The directory-view layer only ever inspects `name`; the remaining fields
/// are an opaque payload carried through for consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    /// Full object name. Never relative to a directory prefix.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Backend generation number; changes on every overwrite.
    pub generation: i64,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            generation: 0,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_generation(mut self, generation: i64) -> Self {
        self.generation = generation;
        self
    }
}
