mod cli;
mod global_settings;
mod result;
mod utils;

fn main() -> miette::Result<()> {
    cli::exec()
}
