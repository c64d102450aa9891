//! # Concrete syntax tree (CST)
//!
//! This representation is used as the output of the parser and as the input of the lowering stage that
//! builds the catalogue. Its structure corresponds closely to the declaration grammar of a stub file:
//! parameter groups are already expanded, but nothing is resolved and packages are not yet grouped.

pub mod decls;
pub mod ident;
pub mod types;

pub use ident::{Ident, QIdent};
