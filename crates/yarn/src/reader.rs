//! Turns raw `yarn.lock` text into a [`BlockFile`].
//!
//! The grammar is indentation based:
//!
//! ```text
//! # yarn lockfile v1
//!
//! "@babel/code-frame@^7.0.0", "@babel/code-frame@^7.10.4":
//!   version "7.12.13"
//!   dependencies:
//!     "@babel/highlight" "^7.12.13"
//! ```
//!
//! Zero-indentation lines ending in `:` open a stanza. Deeper lines are either
//! `key value` pairs (`key: value` in Berry files) or nested block headers
//! ending in `:`. Lines that do not fit are skipped with a warning; the reader
//! never gives up on the whole file.

use crate::block::{Block, BlockFile};
use crate::diagnostics::Logger;
use crate::lockfile::YarnLockVersion;

/// Comment fragment that marks a Yarn classic lockfile.
pub const V1_PRAGMA: &str = "yarn lockfile v1";

/// Title of the Berry metadata stanza.
pub const METADATA_TITLE: &str = "__metadata";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Options controlling how lockfile text is tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Number of spaces per nesting level.
    pub indent_width: usize,

    /// Forces a dialect instead of detecting it from the file header.
    pub dialect: Option<YarnLockVersion>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            dialect: None,
        }
    }
}

impl ReaderOptions {
    /// Sets the indentation width. Zero is treated as one.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width.max(1);
        self
    }

    /// Forces a dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: YarnLockVersion) -> Self {
        self.dialect = Some(dialect);
        self
    }
}

/// Reads lockfile text into blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockReader {
    options: ReaderOptions,
}

impl BlockReader {
    /// Creates a reader with the given options.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// The options this reader was built with.
    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Reads `text` into a [`BlockFile`], reporting skipped lines to `logger`.
    ///
    /// A leading byte-order mark is ignored.
    pub fn read(&self, text: &str, logger: &dyn Logger) -> BlockFile {
        let text = strip_bom(text).replace("\r\n", "\n");
        let version = self
            .options
            .dialect
            .unwrap_or_else(|| detect_version(&text));
        let indent_width = self.options.indent_width.max(1);

        let mut state = ReadState::default();

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let leading = &line[..line.len() - trimmed.len()];
            if leading.contains('\t') {
                logger.warning(&format!(
                    "Line {line_number}: tab indentation is not supported, skipping line"
                ));
                continue;
            }

            if leading.is_empty() {
                state.close_stanza(logger);
                match stanza_title(trimmed) {
                    Some(title) => {
                        state.open.push(Block::new(title));
                        state.resyncing = false;
                    }
                    None => {
                        logger.warning(&format!(
                            "Line {line_number}: expected a stanza header ending in ':', skipping until the next stanza"
                        ));
                        state.resyncing = true;
                    }
                }
                continue;
            }

            if state.resyncing {
                logger.verbose(&format!(
                    "Line {line_number}: skipped while resynchronizing"
                ));
                continue;
            }

            if state.open.is_empty() {
                logger.warning(&format!(
                    "Line {line_number}: indented line outside of any stanza, skipping line"
                ));
                continue;
            }

            if leading.len() % indent_width != 0 {
                logger.warning(&format!(
                    "Line {line_number}: indentation of {} is not a multiple of {indent_width}, skipping line",
                    leading.len()
                ));
                continue;
            }

            let level = leading.len() / indent_width;
            if level > state.open.len() {
                logger.warning(&format!(
                    "Line {line_number}: unexpected indentation (level {level} under level {}), skipping line",
                    state.open.len() - 1
                ));
                continue;
            }

            state.close_to(level);
            let Some(parent) = state.open.last_mut() else {
                continue;
            };

            if let Some(header) = trimmed.strip_suffix(':') {
                let title = unquote(header.trim());
                state.open.push(Block::new(title));
                continue;
            }

            match split_scalar(trimmed, version) {
                Some((key, value)) => {
                    if parent.values.contains_key(&key) {
                        logger.warning(&format!(
                            "Line {line_number}: duplicate key '{key}' in '{}', keeping the first value",
                            parent.title
                        ));
                    } else {
                        parent.values.insert(key, value);
                    }
                }
                None => {
                    logger.warning(&format!(
                        "Line {line_number}: missing value for '{trimmed}', skipping line"
                    ));
                }
            }
        }

        state.close_stanza(logger);

        tracing::debug!(
            version = %version,
            blocks = state.blocks.len(),
            has_metadata = state.metadata.is_some(),
            "Read yarn.lock blocks"
        );

        BlockFile {
            version,
            metadata: state.metadata,
            blocks: state.blocks,
        }
    }
}

#[derive(Default)]
struct ReadState {
    open: Vec<Block>,
    blocks: Vec<Block>,
    metadata: Option<Block>,
    resyncing: bool,
}

impl ReadState {
    /// Folds open nested blocks into their parents until `depth` remain.
    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth.max(1) {
            if let Some(child) = self.open.pop()
                && let Some(parent) = self.open.last_mut()
            {
                parent.children.push(child);
            }
        }
    }

    fn close_stanza(&mut self, logger: &dyn Logger) {
        self.close_to(1);
        let Some(block) = self.open.pop() else {
            return;
        };

        if block.title != METADATA_TITLE {
            self.blocks.push(block);
        } else if self.metadata.is_some() {
            logger.warning("Ignoring a repeated __metadata stanza, keeping the first one");
        } else {
            if block.value("version").is_none() || block.value("cacheKey").is_none() {
                logger.warning("The __metadata stanza is missing 'version' or 'cacheKey'");
            }
            self.metadata = Some(block);
        }
    }
}

/// Detects the dialect from the leading comment pragma or the metadata stanza.
///
/// Defaults to [`YarnLockVersion::V1`] when neither marker is found.
#[must_use]
pub fn detect_version(text: &str) -> YarnLockVersion {
    for line in strip_bom(text).lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            if trimmed.contains(V1_PRAGMA) {
                return YarnLockVersion::V1;
            }
            continue;
        }
        if trimmed.strip_suffix(':').map(unquote) == Some(METADATA_TITLE.to_string()) {
            return YarnLockVersion::V2;
        }
        break;
    }
    YarnLockVersion::V1
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text)
}

fn stanza_title(line: &str) -> Option<String> {
    let title = line.strip_suffix(':')?.trim_end();
    if title.is_empty() {
        return None;
    }
    Some(title.to_string())
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}

/// Splits `key value` (v1) or `key: value` (v2) into its parts.
fn split_scalar(line: &str, version: YarnLockVersion) -> Option<(String, String)> {
    let (key, rest) = if let Some(quoted) = line.strip_prefix('"') {
        let end = quoted.find('"')?;
        (quoted[..end].to_string(), &quoted[end + 1..])
    } else {
        let end = match version {
            YarnLockVersion::V1 => line.find(char::is_whitespace)?,
            YarnLockVersion::V2 => line.find(": ")?,
        };
        (line[..end].to_string(), &line[end..])
    };

    let rest = match version {
        YarnLockVersion::V1 => {
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            rest
        }
        YarnLockVersion::V2 => rest.trim_start().strip_prefix(':')?,
    };

    let value = rest.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, unquote(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingLogger;

    fn read(text: &str) -> (BlockFile, RecordingLogger) {
        let logger = RecordingLogger::default();
        let file = BlockReader::default().read(text, &logger);
        (file, logger)
    }

    #[test]
    fn reads_basic_v1_file() {
        let text = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


left-pad@^1.3.0:
  version "1.3.0"
  resolved "https://registry.yarnpkg.com/left-pad/-/left-pad-1.3.0.tgz"
  integrity sha512-test123

react@^18.0.0:
  version "18.2.0"
  dependencies:
    loose-envify "^1.1.0"
"#;

        let (file, logger) = read(text);
        assert_eq!(file.version, YarnLockVersion::V1);
        assert!(logger.warnings().is_empty());
        assert_eq!(file.blocks.len(), 2);

        let left_pad = &file.blocks[0];
        assert_eq!(left_pad.title, "left-pad@^1.3.0");
        assert_eq!(left_pad.value("version"), Some("1.3.0"));
        assert_eq!(left_pad.value("integrity"), Some("sha512-test123"));
        assert!(left_pad.children.is_empty());

        let react = &file.blocks[1];
        assert_eq!(react.children.len(), 1);
        assert_eq!(react.children[0].title, "dependencies");
        assert_eq!(react.children[0].value("loose-envify"), Some("^1.1.0"));
    }

    #[test]
    fn keeps_quoted_multi_member_titles_verbatim() {
        let text = r#"
"@babel/core@^7.0.0", "@babel/core@^7.1.0":
  version "7.22.5"
  dependencies:
    "@babel/code-frame" "^7.22.5"
"#;

        let (file, _) = read(text);
        assert_eq!(
            file.blocks[0].title,
            r#""@babel/core@^7.0.0", "@babel/core@^7.1.0""#
        );
        assert_eq!(
            file.blocks[0].children[0].value("@babel/code-frame"),
            Some("^7.22.5")
        );
    }

    #[test]
    fn nested_block_closes_on_dedent() {
        let text = r"a@1:
  version 1.0.0
  dependencies:
    b ^1.0.0
  optionalDependencies:
    c ^2.0.0
  resolved https://example/a-1.0.0.tgz
";

        let (file, logger) = read(text);
        assert!(logger.warnings().is_empty());

        let block = &file.blocks[0];
        assert_eq!(block.children.len(), 2);
        assert_eq!(block.children[0].title, "dependencies");
        assert_eq!(block.children[1].title, "optionalDependencies");
        assert_eq!(block.children[1].value("c"), Some("^2.0.0"));
        assert_eq!(block.value("resolved"), Some("https://example/a-1.0.0.tgz"));
    }

    #[test]
    fn blank_and_comment_lines_are_transparent() {
        let text = r"a@1:
  version 1.0.0

  # comment inside a stanza
  dependencies:

    b ^1.0.0
";

        let (file, _) = read(text);
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].children[0].value("b"), Some("^1.0.0"));
    }

    #[test]
    fn normalizes_crlf() {
        let text = "# yarn lockfile v1\r\n\r\na@1:\r\n  version \"1.0.0\"\r\n";

        let (file, _) = read(text);
        assert_eq!(file.blocks[0].title, "a@1");
        assert_eq!(file.blocks[0].value("version"), Some("1.0.0"));
    }

    #[test]
    fn reads_berry_file_with_metadata() {
        let text = r#"# This file is generated by running "yarn install" inside your project.
# Manual changes might be lost - proceed with caution!

__metadata:
  version: 6
  cacheKey: 8

"lodash@npm:^4.17.0, lodash@npm:^4.17.21":
  version: 4.17.21
  resolution: "lodash@npm:4.17.21"
  checksum: 6a2b
  languageName: node
  linkType: hard

"react@npm:^18.0.0":
  version: 18.2.0
  dependencies:
    loose-envify: ^1.1.0
"#;

        let (file, logger) = read(text);
        assert_eq!(file.version, YarnLockVersion::V2);
        assert!(logger.warnings().is_empty());

        let metadata = file.metadata.as_ref().unwrap();
        assert_eq!(metadata.value("cacheKey"), Some("8"));

        assert_eq!(file.blocks.len(), 2);
        assert_eq!(file.blocks[0].value("resolution"), Some("lodash@npm:4.17.21"));
        assert_eq!(file.blocks[1].children[0].value("loose-envify"), Some("^1.1.0"));
    }

    #[test]
    fn warns_on_incomplete_metadata() {
        let text = "__metadata:\n  version: 6\n";

        let (file, logger) = read(text);
        assert_eq!(file.version, YarnLockVersion::V2);
        assert!(file.blocks.is_empty());
        assert_eq!(logger.warnings().len(), 1);
    }

    #[test]
    fn berry_file_with_byte_order_mark() {
        let text = "\u{feff}# This file is generated by running \"yarn install\" inside your project.\n\n__metadata:\n  version: 6\n  cacheKey: 8\n\n\"lodash@npm:^4.17.0\":\n  version: 4.17.21\n";

        let (file, logger) = read(text);
        assert_eq!(file.version, YarnLockVersion::V2);
        assert!(logger.warnings().is_empty());
        assert_eq!(file.metadata.as_ref().unwrap().value("version"), Some("6"));
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].value("version"), Some("4.17.21"));
    }

    #[test]
    fn classic_file_with_byte_order_mark() {
        let text = "\u{feff}# yarn lockfile v1\n\nleft-pad@^1.3.0:\n  version \"1.3.0\"\n";

        let (file, logger) = read(text);
        assert_eq!(file.version, YarnLockVersion::V1);
        assert!(logger.warnings().is_empty());
        assert_eq!(file.blocks[0].value("version"), Some("1.3.0"));
        assert_eq!(
            detect_version("\u{feff}__metadata:\n  version: 6\n"),
            YarnLockVersion::V2
        );
    }

    #[test]
    fn repeated_metadata_is_dropped() {
        let text = "__metadata:\n  version: 6\n  cacheKey: 8\n\n__metadata:\n  version: 7\n  cacheKey: 9\n\n\"a@npm:1\":\n  version: 1.0.0\n";

        let (file, logger) = read(text);
        assert_eq!(file.metadata.as_ref().unwrap().value("version"), Some("6"));
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].title, "\"a@npm:1\"");
        assert_eq!(logger.warnings().len(), 1);
    }

    #[test]
    fn honours_custom_indent_width() {
        let text = "a@1:\n    version 1.0.0\n    dependencies:\n        b ^1.0.0\n";
        let logger = RecordingLogger::default();
        let reader = BlockReader::new(ReaderOptions::default().with_indent_width(4));

        let file = reader.read(text, &logger);
        assert!(logger.warnings().is_empty());
        assert_eq!(file.blocks[0].value("version"), Some("1.0.0"));
        assert_eq!(file.blocks[0].children[0].value("b"), Some("^1.0.0"));
    }

    #[test]
    fn forced_dialect_overrides_detection() {
        let text = "# yarn lockfile v1\n\na@1:\n  version: 1.0.0\n";
        let logger = RecordingLogger::default();
        let reader = BlockReader::new(ReaderOptions::default().with_dialect(YarnLockVersion::V2));

        let file = reader.read(text, &logger);
        assert_eq!(file.version, YarnLockVersion::V2);
        assert_eq!(file.blocks[0].value("version"), Some("1.0.0"));
    }

    #[test]
    fn skips_malformed_indentation() {
        let text = "a@1:\n  version 1.0.0\n   odd 1\n      deep 1\n\tresolved x\n  integrity sha\n";

        let (file, logger) = read(text);
        let block = &file.blocks[0];
        assert_eq!(block.values.len(), 2);
        assert_eq!(block.value("integrity"), Some("sha"));
        assert_eq!(logger.warnings().len(), 3);
    }

    #[test]
    fn skips_missing_values_and_keeps_first_duplicate() {
        let text = "a@1:\n  version 1.0.0\n  integrity\n  version 2.0.0\n";

        let (file, logger) = read(text);
        assert_eq!(file.blocks[0].value("version"), Some("1.0.0"));
        assert!(file.blocks[0].value("integrity").is_none());
        assert_eq!(logger.warnings().len(), 2);
    }

    #[test]
    fn resynchronizes_after_bad_top_level_line() {
        let text = "  orphan 1\nnot a header\n  version 1.0.0\nb@2:\n  version 2.0.0\n";

        let (file, logger) = read(text);
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].title, "b@2");
        assert_eq!(file.blocks[0].value("version"), Some("2.0.0"));
        assert_eq!(logger.warnings().len(), 2);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        let (file, logger) = read("");
        assert_eq!(file.version, YarnLockVersion::V1);
        assert!(file.blocks.is_empty());
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn detects_versions() {
        assert_eq!(detect_version("# yarn lockfile v1\n"), YarnLockVersion::V1);
        assert_eq!(
            detect_version("# generated\n\n__metadata:\n  version: 6\n"),
            YarnLockVersion::V2
        );
        assert_eq!(detect_version("a@1:\n  version 1\n"), YarnLockVersion::V1);
    }

    #[test]
    fn splits_scalars_per_dialect() {
        assert_eq!(
            split_scalar(r#""@babel/highlight" "^7.12.13""#, YarnLockVersion::V1),
            Some(("@babel/highlight".to_string(), "^7.12.13".to_string()))
        );
        assert_eq!(
            split_scalar("resolution: \"lodash@npm:4.17.21\"", YarnLockVersion::V2),
            Some(("resolution".to_string(), "lodash@npm:4.17.21".to_string()))
        );
        assert_eq!(
            split_scalar("\"@types/node\": npm:^18.0.0", YarnLockVersion::V2),
            Some(("@types/node".to_string(), "npm:^18.0.0".to_string()))
        );
        assert_eq!(split_scalar("version", YarnLockVersion::V1), None);
        assert_eq!(split_scalar("version 1.0.0", YarnLockVersion::V2), None);
    }
}
