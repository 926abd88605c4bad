use crate::config::{RamboConfig, DEFAULT_CONFIG_FILE};
use crate::result::{RamboError, Result};
use std::path::Path;

pub async fn execute(force: bool) -> Result<()> {
    let mut cmd = SetupCommand::new();
    cmd.execute(force).await
}

#[derive(Default)]
pub struct SetupCommand;

impl SetupCommand {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&mut self, force: bool) -> Result<()> {
        let config_file = DEFAULT_CONFIG_FILE;

        log::info!("Starting setup process with force: {}", force);

        if Path::new(config_file).exists() && !force {
            log::warn!("rambo.toml already exists, setup aborted");
            return Err(RamboError::Config(
                "rambo.toml already exists. Use --force to overwrite."
                    .to_string()
                    .into(),
            ));
        }

        let config = RamboConfig::default();
        config.save_to_file(config_file).await?;

        println!("rambo.toml created successfully!");
        println!();
        println!("Please edit rambo.toml to match your workflow:");
        println!("   - Adjust format to the file name pattern you want");
        println!("   - Pick an on_collision strategy (sequence, skip or fail)");
        println!("   - Enable case_insensitive or include_symlinks if needed");
        println!();
        println!("Then run: rambo rename \"**/*\"");

        log::info!("Setup completed successfully");

        Ok(())
    }
}
