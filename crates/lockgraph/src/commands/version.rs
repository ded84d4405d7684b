use tracing::instrument;

#[instrument]
pub fn get_version_info() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");
    let description = env!("CARGO_PKG_DESCRIPTION");

    tracing::debug!(
        package_name = name,
        package_version = version,
        "Gathering package information"
    );

    let dialects = lockgraph_yarn::SUPPORTED_VERSIONS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{name} {version} - {description}\n\
        Supported yarn.lock dialects: {dialects}\n\
        Correlation ID: {}",
        crate::tracing::correlation_id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_contains_package_and_dialects() {
        let info = get_version_info();
        assert!(info.contains(env!("CARGO_PKG_VERSION")));
        assert!(info.contains("lockgraph"));
        assert!(info.contains("v1, v2"));
    }
}
