//! Yarn lockfile reading and entry extraction for lockgraph.
//!
//! Parsing happens in two stages:
//!
//! - [`BlockReader`] turns the indentation-based `yarn.lock` text into a
//!   [`BlockFile`]: the detected dialect plus a tree of generic [`Block`]s.
//! - [`YarnLockParser`] interprets those blocks as package [`Entry`]s, with the
//!   ranges each stanza satisfies and its dependency edges.
//!
//! Both Yarn classic (`# yarn lockfile v1`) and Yarn Berry (`__metadata`)
//! files are understood. Every version specifier that leaves the parser is in
//! the canonical `npm:` alias form produced by [`normalize_version`].
//!
//! # Failure handling
//!
//! A malformed line or stanza never aborts the parse. Soft problems go to a
//! [`Logger`]; stanzas that name a package but lack a `version` are also
//! reported to a [`FailureRecorder`]. The only errors returned are a missing
//! block file, an unreadable file, and an unsupported dialect.
//!
//! # Example
//!
//! ```
//! use lockgraph_yarn::{BlockReader, FailureLog, TracingLogger, YarnLockParser};
//!
//! let text = r#"# yarn lockfile v1
//!
//! lodash@^4.0.0, lodash@^4.17.0:
//!   version "4.17.21"
//!   resolved "https://registry.example/lodash-4.17.21.tgz#abc"
//! "#;
//!
//! let logger = TracingLogger;
//! let blocks = BlockReader::default().read(text, &logger);
//! let recorder = FailureLog::new();
//! let lockfile = YarnLockParser::new().parse(&recorder, Some(&blocks), &logger)?;
//!
//! let entry = &lockfile.entries[0];
//! assert_eq!(entry.name, "lodash");
//! assert!(entry.satisfied.contains("npm:^4.17.0"));
//! assert_eq!(entry.version, "4.17.21");
//! # Ok::<(), lockgraph_yarn::Error>(())
//! ```
//!
//! # Feature flags
//!
//! - `graph` (default) - [`DependencyGraph`] over a parsed lockfile, backed by `petgraph`

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod block;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod lockfile;
pub mod parser;
pub mod path;
pub mod reader;
pub mod version;

#[cfg(feature = "graph")]
pub mod graph;

#[cfg(test)]
mod test_support;

pub use block::{Block, BlockFile};
pub use detector::{LOCKFILE_NAME, YarnLockDetector};
pub use diagnostics::{FailureLog, FailureRecorder, Logger, TracingLogger};
pub use error::{Error, Result};
pub use lockfile::{Dependency, Entry, LockFile, Version, VersionReq, YarnLockVersion};
pub use parser::{SUPPORTED_VERSIONS, TitleMember, YarnLockParser, normalize_title_member};
pub use path::PathResolver;
pub use reader::{BlockReader, ReaderOptions, detect_version};
pub use version::{ALIAS_PREFIX, normalize_version};

#[cfg(feature = "graph")]
pub use graph::{DependencyGraph, DependencyKind, UnresolvedDependency};
