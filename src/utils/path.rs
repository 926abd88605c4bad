use crate::result::{RamboError, Result};
use std::ffi::OsString;
use std::path::Path;

/// The working directory prefix, with a trailing separator, used to shorten
/// paths in user-facing output.
pub fn working_directory_prefix() -> Result<String> {
    let working_directory = std::env::current_dir().map_err(|e| {
        RamboError::Config(format!("Cannot determine current working directory: {}", e).into())
    })?;

    Ok(format!(
        "{}{}",
        working_directory.display(),
        std::path::MAIN_SEPARATOR
    ))
}

/// Renders a path relative to the given prefix when it is inside it,
/// otherwise unchanged.
pub fn display_path(path: &Path, prefix: &str) -> String {
    let path_string = path.display().to_string();

    path_string
        .strip_prefix(prefix)
        .map(String::from)
        .unwrap_or(path_string)
}

/// Sort key making processing order deterministic and case-stable.
pub fn lowercase_sort_key(path: &Path) -> OsString {
    path.as_os_str().to_ascii_lowercase()
}
