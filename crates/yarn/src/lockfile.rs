//! Extracted lockfile model: entries, their satisfied ranges, and dependency edges.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Type alias for concrete version strings.
pub type Version = String;

/// Type alias for version requirement strings in canonical alias form.
pub type VersionReq = String;

/// Lockfile dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YarnLockVersion {
    /// Yarn classic (`# yarn lockfile v1`).
    #[default]
    V1,
    /// Yarn Berry (v2 and later, with a `__metadata` stanza).
    V2,
}

impl fmt::Display for YarnLockVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

/// A parsed `yarn.lock` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockFile {
    /// Dialect the entries were read from.
    pub version: YarnLockVersion,

    /// Entries in source order.
    pub entries: Vec<Entry>,
}

impl LockFile {
    /// Returns the first entry with the given name.
    #[must_use]
    pub fn find_entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the entry whose `satisfied` set contains `specifier` for `name`.
    ///
    /// The specifier is normalized before the lookup.
    #[must_use]
    pub fn find_satisfying(&self, name: &str, specifier: &str) -> Option<&Entry> {
        let specifier = crate::version::normalize_version(specifier);
        self.entries
            .iter()
            .find(|e| e.name == name && e.satisfied.contains(&specifier))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lockfile has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One resolved package stanza.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Package name, with its leading `@` when scoped.
    pub name: String,

    /// Every range this stanza claims to satisfy, in canonical alias form.
    pub satisfied: BTreeSet<VersionReq>,

    /// Resolved concrete version.
    pub version: Version,

    /// Source URL of the resolved tarball, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,

    /// Integrity hash (`integrity` in v1, `checksum` in v2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,

    /// Runtime dependencies in source order.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Optional dependencies in source order.
    #[serde(default)]
    pub optional_dependencies: Vec<Dependency>,
}

impl Entry {
    /// `name@version` identifier of this entry.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Whether the entry claims to satisfy `specifier` (normalized first).
    #[must_use]
    pub fn satisfies(&self, specifier: &str) -> bool {
        self.satisfied
            .contains(&crate::version::normalize_version(specifier))
    }
}

/// A dependency edge declared by an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Name of the dependency.
    pub name: String,

    /// Requested range in canonical alias form.
    pub version_specifier: VersionReq,
}

impl Dependency {
    /// Creates a dependency, normalizing the specifier.
    #[must_use]
    pub fn new(name: impl Into<String>, specifier: &str) -> Self {
        Self {
            name: name.into(),
            version_specifier: crate::version::normalize_version(specifier),
        }
    }
}
