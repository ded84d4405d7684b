//! Interprets [`Block`]s as package [`Entry`]s.

use crate::block::{Block, BlockFile};
use crate::diagnostics::{FailureRecorder, Logger};
use crate::error::{Error, Result};
use crate::lockfile::{Dependency, Entry, LockFile, YarnLockVersion};
use crate::version::normalize_version;

const VERSION: &str = "version";
const RESOLVED: &str = "resolved";
const INTEGRITY: &str = "integrity";
const CHECKSUM: &str = "checksum";
const DEPENDENCIES: &str = "dependencies";
const OPTIONAL_DEPENDENCIES: &str = "optionalDependencies";

/// Dialects [`YarnLockParser`] can extract entries from.
pub const SUPPORTED_VERSIONS: &[YarnLockVersion] = &[YarnLockVersion::V1, YarnLockVersion::V2];

/// Outcome of splitting one title member into name and specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMember {
    /// The member had the shape `name@specifier`.
    Parsed {
        /// Package name, scoped names keep their `@`.
        name: String,
        /// Raw specifier, not yet normalized.
        specifier: String,
    },
    /// The member could not be split into exactly two parts.
    Rejected,
}

impl TitleMember {
    /// Splits a `name@specifier` title member.
    ///
    /// ```
    /// use lockgraph_yarn::TitleMember;
    ///
    /// assert_eq!(
    ///     TitleMember::parse("\"@babel/core@^7.0.0\":"),
    ///     TitleMember::Parsed {
    ///         name: "@babel/core".to_string(),
    ///         specifier: "^7.0.0".to_string(),
    ///     }
    /// );
    /// assert_eq!(TitleMember::parse("left-pad"), TitleMember::Rejected);
    /// ```
    #[must_use]
    pub fn parse(member: &str) -> Self {
        let working = member.trim_end_matches(':').trim_matches('"');
        let (scoped, working) = match working.strip_prefix('@') {
            Some(rest) => (true, rest.trim_start_matches('@')),
            None => (false, working),
        };

        let parts: Vec<&str> = working.split('@').collect();
        let [name, specifier] = parts.as_slice() else {
            return Self::Rejected;
        };

        let at = if scoped { "@" } else { "" };
        Self::Parsed {
            name: format!("{at}{name}"),
            specifier: (*specifier).to_string(),
        }
    }
}

/// Appends the block's own `version` to a title member that carries none.
///
/// Stanzas such as
///
/// ```text
/// nyc:
///   version "10.0.0"
/// ```
///
/// are read as `nyc@10.0.0`. A leading `@` (scoped name) does not count as a
/// separator. When the block has no `version` the member is returned unchanged.
#[must_use]
pub fn normalize_title_member(member: &str, block: &Block, logger: &dyn Logger) -> String {
    let unquoted = member.trim_matches('"');
    if unquoted.chars().skip(1).any(|c| c == '@') {
        return member.to_string();
    }

    match block.value_ignore_case(VERSION) {
        Some(version) => format!("{unquoted}@{version}"),
        None => {
            logger.warning(&format!(
                "Block '{}' has a title member without a version and no version value",
                block.title
            ));
            member.to_string()
        }
    }
}

/// Extracts [`LockFile`] entries from blocks read out of a `yarn.lock`.
///
/// Content problems never fail the parse: unparseable titles are logged and
/// skipped, and stanzas without a `version` are logged and sent to the
/// [`FailureRecorder`].
#[derive(Debug, Default, Clone, Copy)]
pub struct YarnLockParser;

impl YarnLockParser {
    /// Creates a parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether entries can be extracted from the given dialect.
    #[must_use]
    pub fn can_parse(&self, version: YarnLockVersion) -> bool {
        SUPPORTED_VERSIONS.contains(&version)
    }

    /// Extracts entries from `blocks` in source order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBlockFile`] when `blocks` is `None`. Every other
    /// problem is reported through `logger` or `recorder`.
    pub fn parse(
        &self,
        recorder: &dyn FailureRecorder,
        blocks: Option<&BlockFile>,
        logger: &dyn Logger,
    ) -> Result<LockFile> {
        let file = blocks.ok_or(Error::MissingBlockFile)?;

        let entries: Vec<Entry> = file
            .iter()
            .filter_map(|block| extract_entry(block, recorder, logger))
            .collect();

        tracing::debug!(
            version = %file.version,
            blocks = file.blocks.len(),
            entries = entries.len(),
            "Extracted yarn.lock entries"
        );

        Ok(LockFile {
            version: file.version,
            entries,
        })
    }
}

fn extract_entry(
    block: &Block,
    recorder: &dyn FailureRecorder,
    logger: &dyn Logger,
) -> Option<Entry> {
    let mut entry = Entry::default();

    for member in block.title.split(',').map(str::trim) {
        let member = normalize_title_member(member, block, logger);
        let TitleMember::Parsed { name, specifier } = TitleMember::parse(&member) else {
            logger.verbose(&format!(
                "Skipping title member '{member}' of block '{}'",
                block.title
            ));
            continue;
        };

        if entry.name.is_empty() {
            entry.name = name;
        }
        entry.satisfied.insert(normalize_version(&specifier));
    }

    if entry.name.trim().is_empty() {
        logger.warning(&format!(
            "Failed to read a name for block {}. The entry will be skipped.",
            block.title
        ));
        return None;
    }

    let Some(version) = block.value(VERSION) else {
        logger.warning(&format!(
            "Failed to read a version for {}. The entry will be skipped.",
            entry.name
        ));
        recorder.register_package_parse_failure(&entry.name);
        return None;
    };

    entry.version = version.to_string();
    entry.resolved = block.value(RESOLVED).map(str::to_string);
    entry.integrity = block
        .value(INTEGRITY)
        .or_else(|| block.value(CHECKSUM))
        .map(str::to_string);

    if let Some(child) = block.child(DEPENDENCIES) {
        entry.dependencies = dependencies_of(child);
    }
    if let Some(child) = block.child(OPTIONAL_DEPENDENCIES) {
        entry.optional_dependencies = dependencies_of(child);
    }

    Some(entry)
}

fn dependencies_of(block: &Block) -> Vec<Dependency> {
    block
        .values
        .iter()
        .map(|(name, specifier)| Dependency::new(name.as_str(), specifier))
        .collect()
}
