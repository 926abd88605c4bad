use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Emits the completion script for the given shell to stdout, so users
/// can wire it into their shell init:
///
/// ```bash
/// rambo --completions bash > /etc/bash_completion.d/rambo
/// ```
pub fn execute(shell: Shell) {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    generate(shell, &mut command, bin_name, &mut io::stdout());
}
