use stubcat_miette_util::codespan::Span;
use url::Url;

use super::ident::*;
use super::types::*;

/// The `//` comment lines directly preceding a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    pub docs: Vec<String>,
}

/// A parsed stub file.
#[derive(Debug, Clone)]
pub struct Stub {
    /// The location of the stub file
    pub uri: Url,
    pub items: Vec<Item>,
}

/// Top-level items in the order in which they appear in the file.
#[derive(Debug, Clone)]
pub enum Item {
    Package(PackageClause),
    Type(TypeSpec),
    Func(FuncDecl),
}

/// A package header. All following declarations belong to this package
/// until the next header.
///
/// ```text
/// package fmt
///         ^^^---- name
/// ```
#[derive(Debug, Clone)]
pub struct PackageClause {
    pub span: Span,
    pub doc: Option<DocComment>,
    pub name: Ident,
}

/// Type declaration
///
/// ```text
/// type Duration int64
///      ^^^^^^^^ ^^^^^
///         |       \----- typ
///         \------------- name
/// ```
/// `alias` is set for the `type A = B` form.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub span: Span,
    pub doc: Option<DocComment>,
    pub name: Ident,
    pub alias: bool,
    pub typ: TypeExpr,
}

/// Function or method declaration
///
/// ```text
/// func (c *Client) Get(url string) (*Response, error)
///      ^^^^^^^^^^^ ^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
///          |        |              \----- sig
///          |        \-------------------- name
///          \----------------------------- receiver
/// ```
#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub span: Span,
    pub doc: Option<DocComment>,
    pub receiver: Option<Receiver>,
    pub name: Ident,
    pub sig: Signature,
}

/// Receiver of a method declaration
///
/// ```text
/// (c *Client)
///  ^ ^^^^^^^
///  |    \----- typ (with pointer = true)
///  \---------- name
/// ```
#[derive(Debug, Clone)]
pub struct Receiver {
    pub span: Span,
    pub name: Option<Ident>,
    pub pointer: bool,
    pub typ: QIdent,
}
