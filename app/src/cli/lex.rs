use std::fs;
use std::path::PathBuf;

use stubcat_parser::lexer::Lexer;

use crate::result::AppError;

pub fn exec(args: Args) -> miette::Result<()> {
    let src = fs::read_to_string(&args.filepath).map_err(|err| AppError::io(&args.filepath, err))?;
    let lexer = Lexer::new(&src);
    for tok in lexer {
        match tok {
            Ok((p1, tok, p2)) => println!("{tok} at ({p1},{p2})"),
            Err((p1, err, p2)) => println!("{err} at ({p1},{p2})"),
        }
    }
    Ok(())
}

#[derive(clap::Args)]
pub struct Args {
    #[clap(value_parser, value_name = "FILE")]
    filepath: PathBuf,
}
