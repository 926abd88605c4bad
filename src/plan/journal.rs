use crate::result::Result;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub original: PathBuf,
    pub renamed: PathBuf,
    pub hash: SmolStr,
    pub renamed_at: SmolStr,
}

/// Record of the renames performed by the last applied run, persisted as
/// TOML next to the configuration file. `undo` consumes it in reverse
/// order; a new applied run replaces it.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RenameJournal {
    pub entries: Vec<JournalEntry>,
}

impl RenameJournal {
    /// The journal lives next to the configuration file it belongs to:
    /// `rambo.toml` -> `rambo.undo`.
    pub fn journal_path(config_path: &Path) -> PathBuf {
        config_path.with_extension("undo")
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await?;
        let journal: RenameJournal = toml::from_str(&content)?;
        Ok(journal)
    }

    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub async fn remove_file(path: &Path) -> Result<()> {
        fs::remove_file(path).await?;
        Ok(())
    }

    pub fn add_entry(&mut self, original: PathBuf, renamed: PathBuf, hash: &str) {
        let renamed_at = chrono::Utc::now().to_rfc3339().into();
        let entry = JournalEntry {
            original,
            renamed,
            hash: hash.into(),
            renamed_at,
        };
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journal_path_sits_next_to_the_config() {
        let path = RenameJournal::journal_path(Path::new("rambo.toml"));
        assert_eq!(path, PathBuf::from("rambo.undo"));

        let nested = RenameJournal::journal_path(Path::new("photos/rambo.toml"));
        assert_eq!(nested, PathBuf::from("photos/rambo.undo"));
    }

    #[tokio::test]
    async fn missing_journal_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rambo.undo");

        let journal = RenameJournal::load_from_file(&path).await.unwrap();

        assert!(journal.is_empty());
    }

    #[tokio::test]
    async fn entries_survive_a_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rambo.undo");

        let mut journal = RenameJournal::default();
        journal.add_entry(
            PathBuf::from("IMG_0001.jpg"),
            PathBuf::from("2024-01-05_10-30-00.jpg"),
            "deadbeef",
        );
        journal.save_to_file(&path).await.unwrap();

        let loaded = RenameJournal::load_from_file(&path).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries[0].original, PathBuf::from("IMG_0001.jpg"));
        assert_eq!(
            loaded.entries[0].renamed,
            PathBuf::from("2024-01-05_10-30-00.jpg")
        );
        assert_eq!(loaded.entries[0].hash, "deadbeef");
        assert!(!loaded.entries[0].renamed_at.is_empty());
    }

    #[tokio::test]
    async fn corrupted_journal_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rambo.undo");
        fs::write(&path, "entries = 42").await.unwrap();

        let loaded = RenameJournal::load_from_file(&path).await;

        assert!(loaded.is_err());
    }
}
