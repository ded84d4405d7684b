use std::path::{Path, PathBuf};

pub fn render(root: &Path, found: &[PathBuf]) -> String {
    if found.is_empty() {
        return format!("No yarn.lock found under {}", root.display());
    }

    found
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
