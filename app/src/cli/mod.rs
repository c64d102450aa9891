use clap::{Parser, Subcommand};

use crate::global_settings::GlobalSettings;

mod check;
mod export;
mod format;
mod gen_completions;
mod lex;
mod lookup;
mod methods;

pub fn exec() -> miette::Result<()> {
    use Command::*;
    let cli = Cli::parse();
    let settings = GlobalSettings::from_env().verbose(cli.verbose);
    settings.init_logger();
    match cli.command {
        Check(args) => check::exec(args, &settings),
        Lex(args) => lex::exec(args),
        Fmt(args) => format::exec(args, &settings),
        Lookup(args) => lookup::exec(args, &settings),
        Methods(args) => methods::exec(args),
        Export(args) => export::exec(args),
        GenCompletions(args) => gen_completions::exec(args),
    }
}

#[derive(Parser)]
#[clap(version, author, about, long_about = None)]
pub(crate) struct Cli {
    /// Log every loading stage
    #[clap(short, long, global = true)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate a stub file or every stub in a directory
    Check(check::Args),
    /// Print the tokens of a stub file
    Lex(lex::Args),
    /// Format a stub file
    Fmt(format::Args),
    /// Look up a declaration by package and name
    Lookup(lookup::Args),
    /// List the methods of a type or interface
    Methods(methods::Args),
    /// Export a validated catalogue as JSON or as a DOT graph
    Export(export::Args),
    /// Generate shell completions
    GenCompletions(gen_completions::Args),
}
