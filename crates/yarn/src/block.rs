//! Generic key/value tree produced by the [`BlockReader`](crate::BlockReader).

use crate::lockfile::YarnLockVersion;
use indexmap::IndexMap;
use serde::Serialize;

/// One titled, indented unit of a lockfile.
///
/// `values` keeps insertion order so that dependency listings and diagnostics
/// follow the source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Stanza title without its trailing `:`.
    pub title: String,

    /// Scalar `key value` pairs in source order.
    pub values: IndexMap<String, String>,

    /// Nested blocks in source order.
    pub children: Vec<Block>,
}

impl Block {
    /// Creates an empty block with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            values: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Adds a value. The first value for a key wins.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    /// Appends a child block.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Looks up a value by exact key.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Looks up a value by key, ignoring ASCII case.
    #[must_use]
    pub fn value_ignore_case(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first direct child whose title matches `title`, ignoring ASCII case.
    #[must_use]
    pub fn child(&self, title: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|c| c.title.eq_ignore_ascii_case(title))
    }
}

/// Reader output: the detected dialect and the top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockFile {
    /// Detected lockfile dialect.
    pub version: YarnLockVersion,

    /// The Berry `__metadata` stanza, which is not a package.
    pub metadata: Option<Block>,

    /// Top-level stanzas in source order.
    pub blocks: Vec<Block>,
}

impl BlockFile {
    /// Creates a block file from already-built blocks.
    #[must_use]
    pub fn new(version: YarnLockVersion, blocks: Vec<Block>) -> Self {
        Self {
            version,
            metadata: None,
            blocks,
        }
    }

    /// Iterates over the top-level blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a BlockFile {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
