use std::fs;
use std::path::PathBuf;

use stubcat_driver::{export_dot, export_json};

use crate::result::AppError;
use crate::utils::paths::load_stub;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum Format {
    #[default]
    Json,
    Dot,
}

#[derive(clap::Args)]
pub struct Args {
    #[clap(value_parser, value_name = "FILE")]
    filepath: PathBuf,
    #[clap(long, value_enum, default_value_t)]
    format: Format,
    /// Write to this file instead of stdout
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn exec(cmd: Args) -> miette::Result<()> {
    let served = load_stub(&cmd.filepath)?;
    let out = match cmd.format {
        Format::Json => export_json(served.index())?,
        Format::Dot => export_dot(served.index()),
    };
    match cmd.output {
        Some(path) => {
            log::debug!("Writing {:?} export to {}", cmd.format, path.display());
            fs::write(&path, out).map_err(|err| AppError::io(&path, err))?;
        }
        None => println!("{out}"),
    }
    Ok(())
}
