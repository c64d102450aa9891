//! The stub catalogue: packages with their type, function and method declarations.
//!
//! A [`Catalogue`] is the lowered form of a stub file. It carries no behaviour of its own:
//! consistency checks, lookups and exports all operate on it from other crates.

pub mod builtin;
pub mod decls;
pub mod types;

pub use builtin::*;
pub use decls::*;
pub use types::*;

pub type HashMap<K, V> = std::collections::HashMap<K, V, fxhash::FxBuildHasher>;
pub type HashSet<V> = std::collections::HashSet<V, fxhash::FxBuildHasher>;
