mod ctx;
mod lower;

use stubcat_ast::Catalogue;
use stubcat_parser::cst;

use crate::lower::Lower;

pub use ctx::*;

/// Lower a parsed stub into a catalogue.
///
/// Declarations before the first `package` header go into the builtin package.
/// A header that names an already opened package continues that package.
/// Lowering does not resolve any names, so it cannot fail: every consistency
/// condition is left to the checker.
pub fn lower_stub(stub: &cst::decls::Stub) -> Catalogue {
    log::debug!("Lowering stub: {}", stub.uri);
    let mut ctx = Ctx::empty(stub.uri.clone());
    for item in &stub.items {
        item.lower(&mut ctx);
    }
    let catalogue = ctx.finish();
    log::trace!(
        "Lowered {} declarations in {} packages",
        catalogue.decl_count(),
        catalogue.packages.len()
    );
    catalogue
}
