pub mod cst;
mod grammar;
pub mod lexer;
mod result;

use url::Url;

use grammar::Parser;
pub use result::*;

/// Parse a stub file into its concrete syntax tree.
pub fn parse_stub(uri: Url, s: &str) -> Result<cst::decls::Stub, ParseError> {
    log::debug!("Parsing stub: {uri}");
    let mut parser = Parser::new(s)?;
    let items = parser.stub_items()?;
    Ok(cst::decls::Stub { uri, items })
}

/// Parse a single type expression, e.g. `map[string][]byte`.
pub fn parse_type_expr(s: &str) -> Result<cst::types::TypeExpr, ParseError> {
    let mut parser = Parser::new(s)?;
    let typ = parser.type_expr()?;
    parser.expect_end()?;
    Ok(typ)
}
