//! Naming rules for directory children.
//!
//! Given a directory prefix `P`, the contents of `P` are:
//! - objects named `N` where `P` is a strict prefix of `N` and the
//!   remainder contains no `/`;
//! - sub-directories `P'` where `P'` is itself a directory prefix, `P` is a
//!   strict prefix of `P'`, and the remainder contains exactly one `/`, at
//!   its end.
//!
//! These are pure, total functions; the view applies them to caller input
//! and to everything the backend returns.

use std::fmt;

/// Why a name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// An object name is required, but the name is a directory prefix.
    NotAnObjectName,
    /// A directory prefix is required (empty or `/`-terminated).
    NotADirPrefix,
    /// The name does not start with the directory prefix, or equals it.
    NotADescendant,
    /// The remainder after the prefix crosses another `/`.
    NotADirectChild,
}

impl fmt::Display for NameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            NameRule::NotAnObjectName => "not an object name",
            NameRule::NotADirPrefix => "not a directory prefix",
            NameRule::NotADescendant => "not a strict descendant of the directory",
            NameRule::NotADirectChild => "not a direct child of the directory",
        };
        f.write_str(message)
    }
}

/// Returns whether `name` identifies a directory: the empty string (the
/// root) or any `/`-terminated prefix.
pub fn is_dir_prefix(name: &str) -> bool {
    name.is_empty() || name.ends_with('/')
}

/// Checks that `name` is a legal object name directly under `prefix`.
pub fn validate_object_name(prefix: &str, name: &str) -> Result<(), NameRule> {
    if is_dir_prefix(name) {
        return Err(NameRule::NotAnObjectName);
    }
    let remainder = name.strip_prefix(prefix).ok_or(NameRule::NotADescendant)?;
    if remainder.contains('/') {
        return Err(NameRule::NotADirectChild);
    }
    Ok(())
}

/// Checks that `name` is a legal immediate sub-directory prefix of `prefix`.
pub fn validate_subdir_name(prefix: &str, name: &str) -> Result<(), NameRule> {
    if !is_dir_prefix(name) {
        return Err(NameRule::NotADirPrefix);
    }
    let remainder = name.strip_prefix(prefix).ok_or(NameRule::NotADescendant)?;
    if remainder.is_empty() {
        return Err(NameRule::NotADescendant);
    }
    match remainder.find('/') {
        Some(idx) if idx == remainder.len() - 1 => Ok(()),
        _ => Err(NameRule::NotADirectChild),
    }
}
