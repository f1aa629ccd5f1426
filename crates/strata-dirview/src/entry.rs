use strata_storage::Object;

/// A single child of a directory: either an object or an immediate
/// sub-directory prefix.
///
/// Both variants carry the full name the entry is indexed under; a
/// sub-directory carries nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Object(Object),
    Subdir(String),
}

impl Entry {
    /// The full name this entry is indexed under.
    pub fn name(&self) -> &str {
        match self {
            Entry::Object(object) => &object.name,
            Entry::Subdir(name) => name,
        }
    }
}
