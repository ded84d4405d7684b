use crate::commands::OutputFormat;
use crate::errors::CliError;
use lockgraph_yarn::LockFile;
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseReport<'a> {
    #[serde(flatten)]
    lockfile: &'a LockFile,
    parse_failures: &'a [String],
}

pub fn render(
    lockfile: &LockFile,
    failures: &[String],
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ParseReport {
            lockfile,
            parse_failures: failures,
        })
        .map_err(CliError::output),
        OutputFormat::Summary => Ok(summary(lockfile, failures)),
    }
}

fn summary(lockfile: &LockFile, failures: &[String]) -> String {
    let mut out = String::new();
    for entry in &lockfile.entries {
        let satisfied = entry
            .satisfied
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "{} satisfies {satisfied} ({} dependencies, {} optional)",
            entry.id(),
            entry.dependencies.len(),
            entry.optional_dependencies.len()
        );
    }
    for name in failures {
        let _ = writeln!(out, "failed: {name}");
    }
    let _ = write!(
        out,
        "{} entries ({} yarn.lock), {} failures",
        lockfile.entries.len(),
        lockfile.version,
        failures.len()
    );
    out
}
