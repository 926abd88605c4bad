/// Per-run counters. A file ends up in exactly one of the three buckets:
/// renamed (or would be, in a dry run), skipped (already correct, or left
/// alone by the collision strategy), or failed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenameStatistics {
    pub renamed_files: u64,
    pub skipped_files: u64,
    pub failed_files: u64,
}

impl RenameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_files > 0
    }

    pub fn total(&self) -> u64 {
        self.renamed_files + self.skipped_files + self.failed_files
    }

    pub fn print_summary(&self) {
        println!("==============================");
        println!("Failed files:  {}", self.failed_files);
        println!("Skipped files: {}", self.skipped_files);
        println!("Renamed files: {}", self.renamed_files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_statistics_report_no_failures() {
        let statistics = RenameStatistics::new();

        assert!(!statistics.has_failures());
        assert_eq!(statistics.total(), 0);
    }

    #[test]
    fn failures_flip_the_exit_condition() {
        let statistics = RenameStatistics {
            renamed_files: 3,
            skipped_files: 1,
            failed_files: 1,
        };

        assert!(statistics.has_failures());
        assert_eq!(statistics.total(), 5);
    }
}
