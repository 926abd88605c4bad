use crate::cli::parser::CliParser;
use crate::commands::RenameOptions;
use crate::result::{RamboError, Result};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::Path;
use tokio::fs;

pub const DEFAULT_CONFIG_FILE: &str = "rambo.toml";
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamboConfig {
    #[serde(default)]
    pub rename: RenameSection,
    #[serde(default)]
    pub scan: ScanSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSection {
    #[serde(default = "default_format")]
    pub format: SmolStr,
    #[serde(default = "default_true")]
    pub lowercase_extensions: bool,
    #[serde(default)]
    pub on_collision: CollisionStrategy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSection {
    #[serde(default)]
    pub case_insensitive: bool,
    #[serde(default)]
    pub include_symlinks: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionStrategy {
    #[default]
    Sequence,
    Skip,
    Fail,
}

fn default_format() -> SmolStr {
    DEFAULT_FORMAT.into()
}

fn default_true() -> bool {
    true
}

impl Default for RenameSection {
    fn default() -> Self {
        Self {
            format: default_format(),
            lowercase_extensions: true,
            on_collision: CollisionStrategy::default(),
        }
    }
}

impl Default for RamboConfig {
    fn default() -> Self {
        Self {
            rename: RenameSection::default(),
            scan: ScanSection::default(),
        }
    }
}

impl RamboConfig {
    pub async fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: RamboConfig = toml::from_str(&content)
            .map_err(|e| RamboError::Config(format!("Invalid config format: {}", e).into()))?;

        Ok(config)
    }

    /// Missing file is not an error; the built-in defaults apply. An
    /// explicitly requested file that does not exist is reported, so a
    /// typoed `--config` path never silently falls back.
    pub async fn load_or_default(path: &str, explicit: bool) -> Result<Self> {
        if !Path::new(path).exists() {
            if explicit {
                return Err(RamboError::NotFound(
                    format!("Config file not found: {}", path).into(),
                ));
            }
            return Ok(Self::default());
        }

        Self::from_file(path).await
    }

    pub async fn save_to_file(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RamboError::Config(format!("Failed to serialize config: {}", e).into()))?;

        fs::write(path, content).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        CliParser::validate_format(&self.rename.format)
    }

    /// Command-line flags win over file values.
    pub fn apply_overrides(&mut self, options: &RenameOptions) {
        if let Some(format) = &options.format {
            self.rename.format = format.clone();
        }
        if options.case_insensitive {
            self.scan.case_insensitive = true;
        }
        if options.include_symlinks {
            self.scan.include_symlinks = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename_options() -> RenameOptions {
        RenameOptions {
            pattern: "*".to_string(),
            no_dry_run: false,
            case_insensitive: false,
            format: None,
            time_offset: None,
            include_symlinks: false,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn defaults_are_valid() {
        let config = RamboConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rename.format, DEFAULT_FORMAT);
        assert!(config.rename.lowercase_extensions);
        assert_eq!(config.rename.on_collision, CollisionStrategy::Sequence);
        assert!(!config.scan.case_insensitive);
        assert!(!config.scan.include_symlinks);
    }

    #[test]
    fn parses_partial_config() {
        let config: RamboConfig = toml::from_str(
            r#"
            [rename]
            on_collision = "skip"
            "#,
        )
        .unwrap();

        assert_eq!(config.rename.on_collision, CollisionStrategy::Skip);
        assert_eq!(config.rename.format, DEFAULT_FORMAT);
        assert!(!config.scan.include_symlinks);
    }

    #[test]
    fn rejects_unknown_collision_strategy() {
        let parsed: std::result::Result<RamboConfig, _> = toml::from_str(
            r#"
            [rename]
            on_collision = "overwrite"
            "#,
        );

        assert!(parsed.is_err());
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut config = RamboConfig::default();
        let mut options = rename_options();
        options.format = Some("%Y%m%d".into());
        options.case_insensitive = true;

        config.apply_overrides(&options);

        assert_eq!(config.rename.format, "%Y%m%d");
        assert!(config.scan.case_insensitive);
        assert!(!config.scan.include_symlinks);
    }

    #[tokio::test]
    async fn load_or_default_reports_missing_explicit_path() {
        let missing = RamboConfig::load_or_default("does-not-exist.toml", true).await;
        assert!(missing.is_err());

        let fallback = RamboConfig::load_or_default("does-not-exist.toml", false).await;
        assert!(fallback.is_ok());
    }
}
