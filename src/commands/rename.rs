use crate::cli::parser::CliParser;
use crate::commands::RenameOptions;
use crate::config::{RamboConfig, DEFAULT_CONFIG_FILE};
use crate::extract::{open_media_files, DateExtractor};
use crate::plan::{PlanExecutor, RenameJournal, RenamePlanner};
use crate::result::{RamboError, Result};
use crate::scan::MediaScanner;
use crate::stats::RenameStatistics;
use crate::utils::path::{display_path, working_directory_prefix};
use chrono::{DateTime, FixedOffset};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub async fn execute(options: RenameOptions) -> Result<()> {
    let mut cmd = RenameCommand::new();
    cmd.execute(options).await
}

#[derive(Default)]
pub struct RenameCommand;

impl RenameCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&mut self, options: RenameOptions) -> Result<()> {
        let run_start = Instant::now();

        let time_offset = match &options.time_offset {
            Some(time_offset) => Some(CliParser::validate_time_offset(time_offset)?),
            None => None,
        };

        let config_path = options
            .config
            .as_deref()
            .unwrap_or(DEFAULT_CONFIG_FILE)
            .to_string();

        let scan_spinner = ProgressBar::new_spinner();
        scan_spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        scan_spinner.set_message("Loading configuration...");
        scan_spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        let config = match self.load_config(&config_path, &options).await {
            Ok(config) => config,
            Err(error) => {
                scan_spinner.finish_and_clear();
                return Err(error);
            }
        };

        log::info!("Starting rename run for pattern: {}", options.pattern);

        if options.verbose {
            scan_spinner.finish_and_clear();
            println!("Rename configuration:");
            println!("  Pattern:      {}", options.pattern);
            println!("  Format:       {}", config.rename.format);
            println!("  On collision: {:?}", config.rename.on_collision);
            println!("  Dry run:      {}", !options.no_dry_run);
        }

        scan_spinner.set_message(format!(
            "Scanning for files matching '{}'...",
            options.pattern
        ));

        let scanner = MediaScanner::new(config.scan.case_insensitive, config.scan.include_symlinks);
        let outcome = match scanner.scan(&options.pattern) {
            Ok(outcome) => outcome,
            Err(error) => {
                scan_spinner.finish_and_clear();
                return Err(error);
            }
        };
        scan_spinner.finish_and_clear();

        let working_directory = working_directory_prefix()?;
        let mut statistics = RenameStatistics::new();

        if !outcome.errors.is_empty() {
            statistics.failed_files += outcome.errors.len() as u64;

            eprintln!(
                "Some paths could not be read to determine if their contents match the given glob pattern '{}'. \
                Make sure you have the permissions for these paths and symlinks are not broken.",
                options.pattern
            );

            for error in &outcome.errors {
                eprintln!("{}", error);
                log::warn!("{}", error);
            }
        }

        if outcome.paths.is_empty() && outcome.errors.is_empty() {
            eprintln!(
                "No media files will be processed. Make sure the glob pattern '{}' is correct.",
                options.pattern
            );
            log::warn!("Nothing matched pattern '{}'", options.pattern);

            return Ok(());
        } else if outcome.paths.is_empty() {
            return Err(RamboError::pattern(format!(
                "No media files will be processed. Make sure the glob pattern '{}' is correct and you have adequate permissions.",
                options.pattern
            )));
        }

        let dated_files =
            self.extract_datetimes(outcome.paths, &working_directory, &mut statistics);

        let planner = RenamePlanner::new(&config, time_offset);
        let plan = planner.plan(&dated_files)?;

        let dry_run = !options.no_dry_run;
        let mut journal = RenameJournal::default();
        let executor = PlanExecutor::new(dry_run, working_directory);
        executor.apply(&plan, &mut journal, &mut statistics).await;

        if !dry_run && !journal.is_empty() {
            let journal_path = RenameJournal::journal_path(Path::new(&config_path));
            journal.save_to_file(&journal_path).await?;
            log::info!("Undo journal written to {}", journal_path.display());
        }

        statistics.print_summary();
        println!("Finished in {}", format_duration(run_start.elapsed()));

        if dry_run {
            eprintln!(
                "This was just a dry run. To actually apply the renaming, use the '--no-dry-run' flag."
            );
            log::info!("Dry run finished without applying any renames");
        }

        if statistics.has_failures() {
            return Err(RamboError::rename(format!(
                "{} file(s) could not be processed",
                statistics.failed_files
            )));
        }

        Ok(())
    }

    async fn load_config(&self, path: &str, options: &RenameOptions) -> Result<RamboConfig> {
        let mut config = RamboConfig::load_or_default(path, options.config.is_some()).await?;
        config.apply_overrides(options);
        config.validate()?;

        Ok(config)
    }

    fn extract_datetimes(
        &self,
        paths: Vec<PathBuf>,
        working_directory: &str,
        statistics: &mut RenameStatistics,
    ) -> Vec<(PathBuf, DateTime<FixedOffset>)> {
        let mut extractor = DateExtractor::new();
        let mut dated_files = Vec::new();

        for media_file in open_media_files(paths) {
            let media_file = match media_file {
                Ok(media_file) => media_file,
                Err((path, error)) => {
                    statistics.failed_files += 1;
                    eprintln!(
                        "Cannot process {}: {}",
                        display_path(&path, working_directory),
                        error
                    );
                    log::warn!("Cannot process {}: {}", path.display(), error);
                    continue;
                }
            };

            match extractor.extract(media_file.source) {
                Ok(datetime) => dated_files.push((media_file.path, datetime)),
                Err(error) => {
                    statistics.failed_files += 1;
                    eprintln!(
                        "Cannot extract creation datetime from {}: {}",
                        display_path(&media_file.path, working_directory),
                        error
                    );
                    log::warn!(
                        "Cannot extract creation datetime from {}: {}",
                        media_file.path.display(),
                        error
                    );
                }
            }
        }

        dated_files
    }
}

fn format_duration(duration: std::time::Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms >= 1000 {
        let seconds = duration.as_secs_f64();
        format!("{:.2}s", seconds)
    } else {
        format!("{}ms", total_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_in_the_right_unit() {
        assert_eq!(
            format_duration(std::time::Duration::from_millis(250)),
            "250ms"
        );
        assert_eq!(
            format_duration(std::time::Duration::from_millis(1500)),
            "1.50s"
        );
    }
}
