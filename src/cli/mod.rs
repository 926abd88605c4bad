pub mod parser;

use crate::commands::{completions, CommandExecutor, RenameOptions};
use crate::result::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "rambo")]
#[command(about = "Rename All Media By Order - rename media files by their creation date")]
#[command(version = "0.1.0")]
#[command(author = "mxp96")]
#[command(arg_required_else_help = true)]
#[command(
    help_template = "{before-help}{name} v{version}\nAuthor: {author}\n\n{about-with-newline}\n{usage-heading} {usage}\n\n{all-args}{after-help}"
)]
pub struct Cli {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Print the completion script for the given shell to stdout"
    )]
    completions: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
pub enum Commands {
    #[command(about = "Rename media files matched by a glob pattern")]
    Rename {
        #[arg(
            default_value = "*",
            help = "The glob pattern to match the files that shall be renamed. Use **/* to match all files recursively. Provide the pattern in quotes to prevent your shell from expanding it."
        )]
        pattern: String,

        #[arg(
            long,
            help = "Apply the renaming. For safety, the default behavior is a dry run."
        )]
        no_dry_run: bool,

        #[arg(
            long,
            short = 'i',
            help = "Match the pattern in a case insensitive way"
        )]
        case_insensitive: bool,

        #[arg(
            long,
            short,
            help = "The format of the renamed file (without the extension). See: https://docs.rs/chrono/latest/chrono/format/strftime/index.html#specifiers"
        )]
        format: Option<String>,

        #[arg(
            long,
            short,
            allow_hyphen_values = true,
            help = "Override the time zone offset relative to UTC, like '+01:00' or '-02:30'"
        )]
        time_offset: Option<String>,

        #[arg(long, short = 's', help = "Include and follow symlinks")]
        include_symlinks: bool,

        #[arg(long, short, help = "Configuration file (default: rambo.toml)")]
        config: Option<String>,

        #[arg(long, short, help = "Echo the effective configuration before running")]
        verbose: bool,
    },

    #[command(about = "Roll back the renames recorded by the last applied run")]
    Undo {
        #[arg(
            long,
            help = "Apply the rollback. For safety, the default behavior is a dry run."
        )]
        no_dry_run: bool,

        #[arg(
            long,
            help = "Roll back even when a file's content changed since it was renamed"
        )]
        skip_verify: bool,

        #[arg(
            long,
            short,
            help = "Configuration file the undo journal lives next to (default: rambo.toml)"
        )]
        config: Option<String>,
    },

    #[command(about = "Setup project with default rambo.toml")]
    Setup {
        #[arg(long, help = "Force overwrite existing rambo.toml")]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if let Some(shell) = self.completions {
            completions::execute(shell);
            return Ok(());
        }

        let Some(command) = self.command else {
            Cli::command().print_help()?;
            return Ok(());
        };

        let mut executor = CommandExecutor::new();

        match command {
            Commands::Rename {
                pattern,
                no_dry_run,
                case_insensitive,
                format,
                time_offset,
                include_symlinks,
                config,
                verbose,
            } => {
                executor
                    .rename_media(RenameOptions {
                        pattern,
                        no_dry_run,
                        case_insensitive,
                        format: format.map(|s| s.into()),
                        time_offset: time_offset.map(|s| s.into()),
                        include_symlinks,
                        config: config.map(|s| s.into()),
                        verbose,
                    })
                    .await
            }
            Commands::Undo {
                no_dry_run,
                skip_verify,
                config,
            } => executor.undo_renames(no_dry_run, skip_verify, config).await,
            Commands::Setup { force } => executor.setup_project(force).await,
        }
    }
}
