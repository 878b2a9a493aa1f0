//! `dbwire completions <shell>` writes a completion script to stdout.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::Result;

pub fn execute(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let bin = command.get_name().to_string();
    generate(shell, &mut command, bin, &mut io::stdout().lock());
    Ok(())
}
