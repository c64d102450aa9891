use std::io::Write;

use stubcat_printer::{ColorChoice, Print, PrintCfg, PrintExt, StandardStream};

use crate::result::AppError;

/// Print `item` to stdout, followed by a newline.
pub fn print_stdout<T: Print>(
    item: &T,
    cfg: &PrintCfg,
    colorize: ColorChoice,
) -> miette::Result<()> {
    let mut stream = StandardStream::stdout(colorize);
    item.print_colored(cfg, &mut stream)
        .and_then(|()| writeln!(stream))
        .map_err(|err| AppError::io("<stdout>", err))?;
    Ok(())
}
