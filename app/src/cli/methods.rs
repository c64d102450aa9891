use std::path::PathBuf;

use stubcat_ast::QualName;
use stubcat_index::Method;

use crate::result::AppError;
use crate::utils::paths::load_stub;

#[derive(clap::Args)]
pub struct Args {
    #[clap(value_parser, value_name = "FILE")]
    filepath: PathBuf,
    /// Package that declares the type
    package: String,
    /// A receiver type or an interface
    receiver: String,
}

/// One line per method, in method-set order.
///
/// Methods that an interface inherits through an embed name the interface they come from.
pub fn exec(cmd: Args) -> miette::Result<()> {
    let served = load_stub(&cmd.filepath)?;
    let methods = served.index().methods_of(&cmd.package, &cmd.receiver);
    if methods.is_empty() {
        return Err(AppError::NoMethods { package: cmd.package, receiver: cmd.receiver }.into());
    }

    let queried = QualName::new(cmd.package.as_str(), cmd.receiver.as_str());
    for method in methods {
        let line = format!("{}{}", method.name(), method.signature());
        match method {
            Method::Interface { owner, .. } if *owner != queried => {
                println!("{line} (from {owner})")
            }
            Method::Declared(_) if method.has_pointer_receiver() => {
                println!("{line} (pointer receiver)")
            }
            _ => println!("{line}"),
        }
    }
    Ok(())
}
