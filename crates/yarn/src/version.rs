//! Canonical alias form for version specifiers.

/// Prefix marking a specifier as a registry-aliased reference.
pub const ALIAS_PREFIX: &str = "npm:";

/// Returns `version` in canonical alias form.
///
/// Specifiers that already carry [`ALIAS_PREFIX`] are returned unchanged, so
/// normalizing twice is the same as normalizing once.
///
/// ```
/// use lockgraph_yarn::normalize_version;
///
/// assert_eq!(normalize_version("^6.0.0"), "npm:^6.0.0");
/// assert_eq!(normalize_version("npm:^6.0.0"), "npm:^6.0.0");
/// ```
#[must_use]
pub fn normalize_version(version: &str) -> String {
    if version.starts_with(ALIAS_PREFIX) {
        version.to_string()
    } else {
        format!("{ALIAS_PREFIX}{version}")
    }
}
