use std::path::PathBuf;

use stubcat_printer::PrintCfg;

use crate::global_settings::GlobalSettings;
use crate::result::AppError;
use crate::utils::output::print_stdout;
use crate::utils::paths::load_stub;

use super::format::terminal_width;

#[derive(clap::Args)]
pub struct Args {
    #[clap(value_parser, value_name = "FILE")]
    filepath: PathBuf,
    /// Package to search, e.g. `io` or `builtin`
    package: String,
    /// Name of a type or function
    name: String,
    /// Fall back to the builtin package if the name is not declared in the package
    #[clap(long)]
    resolve: bool,
}

pub fn exec(cmd: Args, settings: &GlobalSettings) -> miette::Result<()> {
    let served = load_stub(&cmd.filepath)?;
    let index = served.index();

    let found = if cmd.resolve {
        index.resolve(&cmd.package, &cmd.name)
    } else {
        index.lookup(&cmd.package, &cmd.name).map(|decl| (cmd.package.as_str(), decl))
    };
    let Some((package, decl)) = found else {
        let err = AppError::NotFound { package: cmd.package.clone(), name: cmd.name.clone() };
        return Err(err.into());
    };
    log::debug!("Found {} {package}.{}", decl.kind(), decl.name());

    let cfg = PrintCfg { width: terminal_width(), ..PrintCfg::default() };
    print_stdout(decl, &cfg, settings.colorize)
}
