use std::io;
use std::path::PathBuf;

use stubcat_driver::{find_stubs, load_from, render_reports_io};

use crate::global_settings::GlobalSettings;
use crate::result::AppError;
use crate::utils::paths::{file_source, stub_uri};

#[derive(clap::Args)]
pub struct Args {
    /// A stub file, or a directory that is searched for `*.go` stubs
    #[clap(value_parser, value_name = "PATH")]
    path: PathBuf,
}

pub fn exec(cmd: Args, settings: &GlobalSettings) -> miette::Result<()> {
    let stubs = find_stubs(&cmd.path)?;
    if stubs.is_empty() {
        return Err(AppError::NoStubs { path: cmd.path }.into());
    }

    let mut files = file_source();
    let mut reports = Vec::new();
    for stub in &stubs {
        let uri = stub_uri(stub)?;
        match load_from(&mut files, &uri) {
            Ok(served) => {
                let catalogue = served.index().catalogue();
                log::debug!(
                    "{} package(s), {} declaration(s)",
                    catalogue.packages.len(),
                    catalogue.decl_count()
                );
                println!("{} is consistent", stub.display());
            }
            Err(failure) => reports.push(failure.into_report()),
        }
    }

    if reports.is_empty() {
        return Ok(());
    }
    render_reports_io(&mut io::stderr(), &reports, settings.colorize)
        .map_err(|_| AppError::io("<stderr>", io::Error::other("failed to render reports")))?;
    Err(AppError::CheckFailed { failed: reports.len(), total: stubs.len() }.into())
}
