use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Elvish, Fish, PowerShell, Zsh},
};

use crate::result::AppError;

use super::Cli;

const BINARY: &str = "stubcat";

#[allow(clippy::enum_variant_names)]
#[derive(clap::ValueEnum, Clone)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    PowerShell,
    Zsh,
}

#[derive(clap::Args)]
pub struct Args {
    /// Target shell
    shell: Shell,
    /// Where the completion script should be saved; printed to stdout if omitted
    #[clap(value_parser, value_name = "PATH")]
    filepath: Option<PathBuf>,
}

pub fn exec(cmd: Args) -> miette::Result<()> {
    match cmd.filepath {
        Some(path) => {
            let mut file = File::create(&path).map_err(|err| AppError::io(&path, err))?;
            write_completions(cmd.shell, &mut file);
        }
        None => write_completions(cmd.shell, &mut io::stdout()),
    }
    Ok(())
}

fn write_completions(shell: Shell, out: &mut dyn io::Write) {
    let cmd = &mut Cli::command();
    match shell {
        Shell::Bash => generate(Bash, cmd, BINARY, out),
        Shell::Elvish => generate(Elvish, cmd, BINARY, out),
        Shell::Fish => generate(Fish, cmd, BINARY, out),
        Shell::PowerShell => generate(PowerShell, cmd, BINARY, out),
        Shell::Zsh => generate(Zsh, cmd, BINARY, out),
    }
}
