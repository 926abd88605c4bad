use crate::config::DEFAULT_CONFIG_FILE;
use crate::plan::{JournalEntry, RenameJournal};
use crate::result::{RamboError, Result};
use crate::stats::RenameStatistics;
use crate::utils::hash::sha256_file;
use crate::utils::path::{display_path, working_directory_prefix};
use std::path::Path;
use tokio::fs;

pub async fn execute(no_dry_run: bool, skip_verify: bool, config: Option<&str>) -> Result<()> {
    let mut cmd = UndoCommand::new();
    cmd.execute(no_dry_run, skip_verify, config.map(|s| s.to_string()))
        .await
}

#[derive(Default)]
pub struct UndoCommand;

impl UndoCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &mut self,
        no_dry_run: bool,
        skip_verify: bool,
        config: Option<String>,
    ) -> Result<()> {
        let config_path = config.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        let journal_path = RenameJournal::journal_path(Path::new(&config_path));

        if !journal_path.exists() {
            return Err(RamboError::not_found(RamboError::NOTHING_TO_UNDO));
        }

        let journal = RenameJournal::load_from_file(&journal_path).await?;
        if journal.is_empty() {
            return Err(RamboError::not_found(RamboError::NOTHING_TO_UNDO));
        }

        println!("Rolling back {} rename(s)...", journal.len());
        log::info!(
            "Rolling back {} rename(s) from {}",
            journal.len(),
            journal_path.display()
        );

        let working_directory = working_directory_prefix()?;
        let dry_run = !no_dry_run;
        let mut statistics = RenameStatistics::new();
        let mut remaining: Vec<JournalEntry> = Vec::new();

        // Reverse order: later renames may occupy names that earlier
        // entries need to vacate first.
        for entry in journal.entries.iter().rev() {
            match self
                .roll_back(entry, dry_run, skip_verify, &working_directory)
                .await
            {
                Ok(_) => statistics.renamed_files += 1,
                Err(error) => {
                    statistics.failed_files += 1;
                    eprintln!("{}", error);
                    log::warn!("{}", error);
                    remaining.push(entry.clone());
                }
            }
        }

        if !dry_run {
            if remaining.is_empty() {
                RenameJournal::remove_file(&journal_path).await?;
                log::info!("Undo journal {} removed", journal_path.display());
            } else {
                // Keep failed entries in their original apply order so a
                // later retry sees the journal it expects.
                remaining.reverse();
                let kept = RenameJournal { entries: remaining };
                kept.save_to_file(&journal_path).await?;
                log::warn!(
                    "{} journal entr(y/ies) could not be rolled back and were kept",
                    kept.len()
                );
            }
        }

        statistics.print_summary();

        if dry_run {
            eprintln!(
                "This was just a dry run. To actually apply the rollback, use the '--no-dry-run' flag."
            );
        }

        if statistics.has_failures() {
            return Err(RamboError::rename(format!(
                "{} file(s) could not be rolled back",
                statistics.failed_files
            )));
        }

        Ok(())
    }

    async fn roll_back(
        &self,
        entry: &JournalEntry,
        dry_run: bool,
        skip_verify: bool,
        working_directory: &str,
    ) -> Result<()> {
        let renamed = entry.renamed.as_path();
        let original = entry.original.as_path();

        if !renamed.exists() {
            return Err(RamboError::rename(format!(
                "Cannot undo {}: the file no longer exists",
                display_path(renamed, working_directory)
            )));
        }

        if original.exists() {
            return Err(RamboError::rename(format!(
                "Cannot undo {}: the original path {} is occupied",
                display_path(renamed, working_directory),
                display_path(original, working_directory)
            )));
        }

        if !skip_verify {
            let current_hash = sha256_file(renamed).await?;
            if current_hash != entry.hash.as_str() {
                return Err(RamboError::rename(format!(
                    "Cannot undo {}: the content changed since it was renamed (use --skip-verify to roll back anyway)",
                    display_path(renamed, working_directory)
                )));
            }
        }

        if dry_run {
            println!(
                "[DRY RUN] Renaming: {} ==> {}",
                display_path(renamed, working_directory),
                display_path(original, working_directory)
            );
            return Ok(());
        }

        fs::rename(renamed, original).await.map_err(|error| {
            RamboError::rename(format!(
                "Failed to rename {} to {}: {}",
                display_path(renamed, working_directory),
                display_path(original, working_directory),
                error
            ))
        })?;

        println!(
            "Renaming: {} ==> {}",
            display_path(renamed, working_directory),
            display_path(original, working_directory)
        );
        log::info!(
            "Rolled back {} to {}",
            renamed.display(),
            original.display()
        );

        Ok(())
    }
}
