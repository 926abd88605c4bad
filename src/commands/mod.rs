pub mod completions;
pub mod rename;
pub mod setup;
pub mod undo;

use crate::result::Result;
use smol_str::SmolStr;

/// Options of a `rename` run, after clap parsing and before the
/// configuration file is consulted. `None` fields fall back to the
/// configuration value.
#[derive(Debug)]
pub struct RenameOptions {
    pub pattern: String,
    pub no_dry_run: bool,
    pub case_insensitive: bool,
    pub format: Option<SmolStr>,
    pub time_offset: Option<SmolStr>,
    pub include_symlinks: bool,
    pub config: Option<SmolStr>,
    pub verbose: bool,
}

#[derive(Debug)]
pub enum CommandType {
    Rename {
        options: RenameOptions,
    },
    Undo {
        no_dry_run: bool,
        skip_verify: bool,
        config: Option<SmolStr>,
    },
    Setup {
        force: bool,
    },
}

impl CommandType {
    pub async fn execute(self) -> Result<()> {
        match self {
            CommandType::Rename { options } => rename::execute(options).await,
            CommandType::Undo {
                no_dry_run,
                skip_verify,
                config,
            } => undo::execute(no_dry_run, skip_verify, config.as_deref()).await,
            CommandType::Setup { force } => setup::execute(force).await,
        }
    }
}

#[derive(Default)]
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn rename_media(&mut self, options: RenameOptions) -> Result<()> {
        CommandType::Rename { options }.execute().await
    }

    pub async fn undo_renames(
        &mut self,
        no_dry_run: bool,
        skip_verify: bool,
        config: Option<String>,
    ) -> Result<()> {
        CommandType::Undo {
            no_dry_run,
            skip_verify,
            config: config.map(|s| s.into()),
        }
        .execute()
        .await
    }

    pub async fn setup_project(&mut self, force: bool) -> Result<()> {
        CommandType::Setup { force }.execute().await
    }
}
