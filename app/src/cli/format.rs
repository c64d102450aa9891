use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use miette::NamedSource;
use stubcat_printer::{PrintCfg, PrintExt, StandardStream, WriteColor};

use crate::global_settings::GlobalSettings;
use crate::result::AppError;
use crate::utils::ignore_colors::IgnoreColors;
use crate::utils::paths::stub_uri;

#[derive(clap::Args)]
pub struct Args {
    #[clap(value_parser, value_name = "FILE")]
    filepath: PathBuf,
    #[clap(long)]
    width: Option<usize>,
    /// Indentation of interface and struct bodies
    #[clap(long, default_value_t = 4)]
    indent: isize,
    /// Omit the empty line between declarations
    #[clap(long)]
    compact: bool,
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Formatting only parses and lowers the stub, so inconsistent stubs can be formatted too.
pub fn exec(cmd: Args, settings: &GlobalSettings) -> miette::Result<()> {
    let uri = stub_uri(&cmd.filepath)?;
    let source =
        fs::read_to_string(&cmd.filepath).map_err(|err| AppError::io(&cmd.filepath, err))?;
    let cst = stubcat_parser::parse_stub(uri.clone(), &source).map_err(|err| {
        miette::Report::new(err).with_source_code(NamedSource::new(uri, source.clone()))
    })?;
    let catalogue = stubcat_lowering::lower_stub(&cst);

    // Write to file or to stdout
    let (mut stream, path): (Box<dyn WriteColor>, PathBuf) = match cmd.output {
        Some(path) => {
            let file = File::create(&path).map_err(|err| AppError::io(&path, err))?;
            (Box::new(IgnoreColors::new(file)), path)
        }
        None => (Box::new(StandardStream::stdout(settings.colorize)), PathBuf::from("<stdout>")),
    };

    let cfg = PrintCfg {
        width: cmd.width.unwrap_or_else(terminal_width),
        indent: cmd.indent,
        omit_decl_sep: cmd.compact,
    };

    catalogue.print_colored(&cfg, &mut stream).map_err(|err| AppError::io(&path, err))?;
    stream.flush().map_err(|err| AppError::io(&path, err))?;
    Ok(())
}

pub fn terminal_width() -> usize {
    termsize::get().map(|size| size.cols as usize).unwrap_or(stubcat_printer::DEFAULT_WIDTH)
}
