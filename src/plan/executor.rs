use crate::plan::journal::RenameJournal;
use crate::plan::planner::{PlannedAction, RenamePlan};
use crate::stats::RenameStatistics;
use crate::utils::hash::sha256_file;
use crate::utils::path::display_path;
use std::path::Path;
use tokio::fs;

/** Applies a rename plan
 *
 * # Behavior
 * - Dry run: every action is printed, nothing is touched
 * - Applied run: files are fingerprinted, renamed, and recorded in the
 *   journal so the run can be rolled back
 * - Per-file failures are counted and reported; they never abort the
 *   remaining actions
 */
pub struct PlanExecutor {
    dry_run: bool,
    working_directory_prefix: String,
}

impl PlanExecutor {
    pub fn new(dry_run: bool, working_directory_prefix: String) -> Self {
        Self {
            dry_run,
            working_directory_prefix,
        }
    }

    pub async fn apply(
        &self,
        plan: &RenamePlan,
        journal: &mut RenameJournal,
        statistics: &mut RenameStatistics,
    ) {
        for action in &plan.actions {
            match action {
                PlannedAction::AlreadyNamed { path } => {
                    println!(
                        "This file has already the correct name: {}",
                        self.display(path)
                    );
                    log::info!("Already correctly named: {}", path.display());
                    statistics.skipped_files += 1;
                }
                PlannedAction::CollisionSkip { source, target } => {
                    eprintln!(
                        "Skipping {}: target name '{}' is already taken",
                        self.display(source),
                        self.display(target)
                    );
                    log::warn!(
                        "Collision skip: {} would collide with {}",
                        source.display(),
                        target.display()
                    );
                    statistics.skipped_files += 1;
                }
                PlannedAction::Rename { source, target } => {
                    if self.dry_run {
                        println!(
                            "[DRY RUN] Renaming: {} ==> {}",
                            self.display(source),
                            self.display(target)
                        );
                        statistics.renamed_files += 1;
                    } else {
                        self.rename_file(source, target, journal, statistics).await;
                    }
                }
            }
        }
    }

    async fn rename_file(
        &self,
        source: &Path,
        target: &Path,
        journal: &mut RenameJournal,
        statistics: &mut RenameStatistics,
    ) {
        // Fingerprint before the move; undo refuses to roll back a file
        // whose content no longer matches this hash.
        let hash = match sha256_file(source).await {
            Ok(hash) => hash,
            Err(error) => {
                eprintln!(
                    "Failed to fingerprint {}: {}",
                    self.display(source),
                    error
                );
                log::warn!("Failed to fingerprint {}: {}", source.display(), error);
                statistics.failed_files += 1;
                return;
            }
        };

        match fs::rename(source, target).await {
            Ok(_) => {
                println!(
                    "Renaming: {} ==> {}",
                    self.display(source),
                    self.display(target)
                );
                log::info!("Renamed {} to {}", source.display(), target.display());
                journal.add_entry(source.to_path_buf(), target.to_path_buf(), &hash);
                statistics.renamed_files += 1;
            }
            Err(error) => {
                eprintln!(
                    "Failed to rename {} to {}: {}",
                    self.display(source),
                    self.display(target),
                    error
                );
                log::warn!(
                    "Failed to rename {} to {}: {}",
                    source.display(),
                    target.display(),
                    error
                );
                statistics.failed_files += 1;
            }
        };
    }

    fn display(&self, path: &Path) -> String {
        display_path(path, &self.working_directory_prefix)
    }
}
