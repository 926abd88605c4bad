use crate::config::{CollisionStrategy, RamboConfig};
use crate::result::{RamboError, Result};
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// Upper bound for the -NNN collision suffix. Three digits keep
// lexicographic order aligned with sequence order.
const MAX_SEQUENCE: u32 = 999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    /// Move the file to its datetime-derived name.
    Rename { source: PathBuf, target: PathBuf },
    /// The file already carries the correct name.
    AlreadyNamed { path: PathBuf },
    /// The target was taken and the collision strategy says leave it alone.
    CollisionSkip { source: PathBuf, target: PathBuf },
}

#[derive(Debug, Default)]
pub struct RenamePlan {
    pub actions: Vec<PlannedAction>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/** Builds a rename plan from files with extracted creation datetimes
 *
 * # Collision safety
 * A target name is considered occupied when an earlier action of the
 * same plan already claimed it, or when a file exists on disk under that
 * name and it is not the source itself. What happens then is decided by
 * the configured [`CollisionStrategy`]:
 * - `Sequence`: append `-001`, `-002`, ... before the extension
 * - `Skip`: leave the file untouched
 * - `Fail`: abort the whole run before anything is renamed
 *
 * # Purity
 * Planning reads the filesystem (existence checks) but never mutates
 * it, so a dry run prints exactly what an applied run would do.
 */
pub struct RenamePlanner {
    format: String,
    time_offset: Option<FixedOffset>,
    strategy: CollisionStrategy,
    lowercase_extensions: bool,
}

impl RenamePlanner {
    pub fn new(config: &RamboConfig, time_offset: Option<FixedOffset>) -> Self {
        Self {
            format: config.rename.format.to_string(),
            time_offset,
            strategy: config.rename.on_collision,
            lowercase_extensions: config.rename.lowercase_extensions,
        }
    }

    /// Files must arrive in the deterministic scan order; the plan
    /// claims names in that order.
    pub fn plan(&self, dated_files: &[(PathBuf, DateTime<FixedOffset>)]) -> Result<RenamePlan> {
        let mut plan = RenamePlan::default();
        let mut claimed: HashSet<PathBuf> = HashSet::new();

        for (source, datetime) in dated_files {
            let stem = self.format_stem(datetime);
            let target = self.target_for(source, &stem);

            if *source == target {
                claimed.insert(target);
                plan.actions.push(PlannedAction::AlreadyNamed {
                    path: source.clone(),
                });
                continue;
            }

            if !Self::is_occupied(&claimed, source, &target) {
                claimed.insert(target.clone());
                plan.actions.push(PlannedAction::Rename {
                    source: source.clone(),
                    target,
                });
                continue;
            }

            match self.strategy {
                CollisionStrategy::Sequence => {
                    let fallback = Self::sequenced_target(&claimed, source, &target)?;
                    claimed.insert(fallback.clone());
                    plan.actions.push(PlannedAction::Rename {
                        source: source.clone(),
                        target: fallback,
                    });
                }
                CollisionStrategy::Skip => {
                    plan.actions.push(PlannedAction::CollisionSkip {
                        source: source.clone(),
                        target,
                    });
                }
                CollisionStrategy::Fail => {
                    return Err(RamboError::Rename(
                        format!(
                            "Target name collision: '{}' is already taken, refusing to rename '{}'",
                            target.display(),
                            source.display()
                        )
                        .into(),
                    ));
                }
            }
        }

        Ok(plan)
    }

    fn format_stem(&self, datetime: &DateTime<FixedOffset>) -> String {
        self.time_offset
            .map(|time_offset| datetime.with_timezone(&time_offset))
            .unwrap_or(*datetime)
            .format(&self.format)
            .to_string()
    }

    fn target_for(&self, source: &Path, stem: &str) -> PathBuf {
        let mut target = source.to_path_buf();
        target.set_file_name(stem);

        if let Some(extension) = source.extension() {
            if self.lowercase_extensions {
                target.set_extension(extension.to_ascii_lowercase());
            } else {
                target.set_extension(extension);
            }
        }

        target
    }

    fn is_occupied(claimed: &HashSet<PathBuf>, source: &Path, target: &Path) -> bool {
        claimed.contains(target) || (target != source && target.exists())
    }

    fn sequenced_target(
        claimed: &HashSet<PathBuf>,
        source: &Path,
        target: &Path,
    ) -> Result<PathBuf> {
        let stem = target
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = target.extension().map(|ext| ext.to_os_string());

        for index in 1..=MAX_SEQUENCE {
            let mut candidate = target.to_path_buf();
            candidate.set_file_name(format!("{}-{:03}", stem, index));
            if let Some(extension) = &extension {
                candidate.set_extension(extension);
            }

            if !Self::is_occupied(claimed, source, &candidate) {
                return Ok(candidate);
            }
        }

        Err(RamboError::Rename(
            format!(
                "More than {} files collide on target name '{}'",
                MAX_SEQUENCE,
                target.display()
            )
            .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs::File;
    use tempfile::TempDir;

    fn timestamp(second: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 5, 10, 30, second)
            .unwrap()
    }

    fn planner_with(strategy: CollisionStrategy) -> RenamePlanner {
        let mut config = RamboConfig::default();
        config.rename.on_collision = strategy;
        RenamePlanner::new(&config, None)
    }

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn unique_timestamps_rename_plainly() {
        let dir = tempfile::tempdir().unwrap();
        let first = touch(&dir, "IMG_0001.JPG");
        let second = touch(&dir, "IMG_0002.jpg");

        let plan = planner_with(CollisionStrategy::Sequence)
            .plan(&[(first.clone(), timestamp(0)), (second.clone(), timestamp(1))])
            .unwrap();

        assert_eq!(
            plan.actions,
            vec![
                PlannedAction::Rename {
                    source: first,
                    target: dir.path().join("2024-01-05_10-30-00.jpg"),
                },
                PlannedAction::Rename {
                    source: second,
                    target: dir.path().join("2024-01-05_10-30-01.jpg"),
                },
            ]
        );
    }

    #[test]
    fn correctly_named_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(&dir, "2024-01-05_10-30-00.jpg");

        let plan = planner_with(CollisionStrategy::Sequence)
            .plan(&[(path.clone(), timestamp(0))])
            .unwrap();

        assert_eq!(plan.actions, vec![PlannedAction::AlreadyNamed { path }]);
    }

    #[test]
    fn same_second_files_get_sequence_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let first = touch(&dir, "a.jpg");
        let second = touch(&dir, "b.jpg");
        let third = touch(&dir, "c.jpg");

        let plan = planner_with(CollisionStrategy::Sequence)
            .plan(&[
                (first, timestamp(0)),
                (second.clone(), timestamp(0)),
                (third.clone(), timestamp(0)),
            ])
            .unwrap();

        let targets: Vec<_> = plan
            .actions
            .iter()
            .map(|action| match action {
                PlannedAction::Rename { target, .. } => {
                    target.file_name().unwrap().to_string_lossy().to_string()
                }
                other => panic!("unexpected action: {:?}", other),
            })
            .collect();

        assert_eq!(
            targets,
            vec![
                "2024-01-05_10-30-00.jpg",
                "2024-01-05_10-30-00-001.jpg",
                "2024-01-05_10-30-00-002.jpg",
            ]
        );
    }

    #[test]
    fn on_disk_files_outside_the_plan_count_as_collisions() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "2024-01-05_10-30-00.jpg");
        let source = touch(&dir, "new.jpg");

        let plan = planner_with(CollisionStrategy::Sequence)
            .plan(&[(source.clone(), timestamp(0))])
            .unwrap();

        assert_eq!(
            plan.actions,
            vec![PlannedAction::Rename {
                source,
                target: dir.path().join("2024-01-05_10-30-00-001.jpg"),
            }]
        );
    }

    #[test]
    fn skip_strategy_leaves_colliding_files_alone() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "2024-01-05_10-30-00.jpg");
        let source = touch(&dir, "new.jpg");

        let plan = planner_with(CollisionStrategy::Skip)
            .plan(&[(source.clone(), timestamp(0))])
            .unwrap();

        assert_eq!(
            plan.actions,
            vec![PlannedAction::CollisionSkip {
                source,
                target: dir.path().join("2024-01-05_10-30-00.jpg"),
            }]
        );
    }

    #[test]
    fn fail_strategy_aborts_before_any_rename() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir, "2024-01-05_10-30-00.jpg");
        let source = touch(&dir, "new.jpg");

        let result = planner_with(CollisionStrategy::Fail).plan(&[(source, timestamp(0))]);

        assert!(result.is_err());
    }

    #[test]
    fn files_without_extension_keep_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = touch(&dir, "scan");

        let plan = planner_with(CollisionStrategy::Sequence)
            .plan(&[(source.clone(), timestamp(0))])
            .unwrap();

        assert_eq!(
            plan.actions,
            vec![PlannedAction::Rename {
                source,
                target: dir.path().join("2024-01-05_10-30-00"),
            }]
        );
    }

    #[test]
    fn time_offset_shifts_the_formatted_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = touch(&dir, "a.jpg");

        let config = RamboConfig::default();
        let planner = RenamePlanner::new(&config, FixedOffset::east_opt(3600));

        let plan = planner.plan(&[(source.clone(), timestamp(0))]).unwrap();

        assert_eq!(
            plan.actions,
            vec![PlannedAction::Rename {
                source,
                target: dir.path().join("2024-01-05_11-30-00.jpg"),
            }]
        );
    }
}
