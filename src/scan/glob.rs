use crate::result::{RamboError, Result};
use crate::utils::path::lowercase_sort_key;
use glob::{GlobError, MatchOptions};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/** Per-path failure collected while evaluating a glob pattern
 *
 * # Variants
 * - **Glob**: the glob walker could not read a directory entry
 * - **Path**: a matched path could not be canonicalized (broken
 *   symlink, permission problem, concurrent deletion)
 *
 * These are deliberately not hard errors: one unreadable path must not
 * stop the rest of a run. They are counted as failed files instead.
 */
#[derive(Debug)]
pub enum ScanError {
    Glob(GlobError),
    Path { path: PathBuf, description: String },
}

impl ScanError {
    pub fn path(&self) -> &Path {
        match self {
            ScanError::Glob(glob_error) => glob_error.path(),
            ScanError::Path { path, .. } => path.as_path(),
        }
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Glob(glob_error) => {
                write!(f, "Failed to evaluate glob: {}", glob_error)
            }
            ScanError::Path { description, .. } => {
                write!(f, "Failed to evaluate glob: {}", description)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub paths: Vec<PathBuf>,
    pub errors: Vec<ScanError>,
}

pub struct MediaScanner {
    case_insensitive: bool,
    include_symlinks: bool,
}

impl MediaScanner {
    pub fn new(case_insensitive: bool, include_symlinks: bool) -> Self {
        Self {
            case_insensitive,
            include_symlinks,
        }
    }

    /** Evaluates a glob pattern into candidate files
     *
     * # Behavior
     * - Symlinks are dropped unless `include_symlinks` is set
     * - Surviving paths are canonicalized; failures become [`ScanError`]s
     * - Paths and errors are sorted by their lowercased path string, so
     *   processing order and output are deterministic
     *
     * # Errors
     * - `RamboError::Pattern` when the pattern itself cannot be parsed
     */
    pub fn scan(&self, pattern: &str) -> Result<ScanOutcome> {
        let match_options = MatchOptions {
            case_sensitive: !self.case_insensitive,
            ..Default::default()
        };

        let glob_results = glob::glob_with(pattern, match_options).map_err(|error| {
            RamboError::Pattern(
                format!("Failed to interpret glob pattern '{}': {}", pattern, error).into(),
            )
        })?;

        let mut outcome = ScanOutcome::default();

        for glob_result in glob_results {
            match glob_result {
                Ok(path) => {
                    if !self.include_symlinks && path.is_symlink() {
                        continue;
                    }

                    match path.canonicalize() {
                        Ok(canonical) => outcome.paths.push(canonical),
                        Err(error) => {
                            let description = format!(
                                "Failed to canonicalize path '{}': {}",
                                path.display(),
                                error
                            );
                            outcome.errors.push(ScanError::Path { path, description });
                        }
                    }
                }
                Err(error) => outcome.errors.push(ScanError::Glob(error)),
            }
        }

        outcome
            .paths
            .sort_by_key(|path| lowercase_sort_key(path.as_path()));
        outcome
            .errors
            .sort_by_key(|error| lowercase_sort_key(error.path()));

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs::File;

    struct WorkingDirGuard {
        previous: PathBuf,
    }

    // Scan patterns are relative to the working directory, so these tests
    // chdir into a temp dir and restore afterwards.
    impl WorkingDirGuard {
        fn enter(dir: &Path) -> Self {
            let previous = std::env::current_dir().unwrap();
            std::env::set_current_dir(dir).unwrap();
            Self { previous }
        }
    }

    impl Drop for WorkingDirGuard {
        fn drop(&mut self) {
            let _ = std::env::set_current_dir(&self.previous);
        }
    }

    #[test]
    fn invalid_pattern_is_a_hard_error() {
        let scanner = MediaScanner::new(false, false);
        assert!(scanner.scan("a[").is_err());
    }

    #[test]
    #[serial]
    fn matches_are_sorted_and_canonical() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("b.jpg")).unwrap();
        File::create(dir.path().join("A.jpg")).unwrap();
        let _guard = WorkingDirGuard::enter(dir.path());

        let scanner = MediaScanner::new(false, false);
        let outcome = scanner.scan("*.jpg").unwrap();

        assert!(outcome.errors.is_empty());
        let names: Vec<_> = outcome
            .paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["A.jpg", "b.jpg"]);
        assert!(outcome.paths.iter().all(|p| p.is_absolute()));
    }

    #[test]
    #[serial]
    fn case_insensitive_matching_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("PHOTO.JPG")).unwrap();
        let _guard = WorkingDirGuard::enter(dir.path());

        let sensitive = MediaScanner::new(false, false).scan("*.jpg").unwrap();
        assert!(sensitive.paths.is_empty());

        let insensitive = MediaScanner::new(true, false).scan("*.jpg").unwrap();
        assert_eq!(insensitive.paths.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn symlinks_are_excluded_by_default() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("real.jpg")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.jpg"), dir.path().join("link.jpg"))
            .unwrap();
        let _guard = WorkingDirGuard::enter(dir.path());

        let outcome = MediaScanner::new(false, false).scan("*.jpg").unwrap();
        assert_eq!(outcome.paths.len(), 1);

        let with_symlinks = MediaScanner::new(false, true).scan("*.jpg").unwrap();
        assert_eq!(with_symlinks.paths.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn broken_symlinks_surface_as_scan_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.jpg"), dir.path().join("broken.jpg"))
            .unwrap();
        let _guard = WorkingDirGuard::enter(dir.path());

        let outcome = MediaScanner::new(false, true).scan("*.jpg").unwrap();

        assert!(outcome.paths.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].to_string().contains("canonicalize"));
    }
}
