use stubcat_miette_util::codespan::Span;

use super::decls::DocComment;
use super::ident::*;

/// A type expression as written in the stub.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// `int`, `Reader`, `io.Reader`
    Name(QIdent),
    /// `*T`
    Pointer { span: Span, elem: Box<TypeExpr> },
    /// `[]T`
    Slice { span: Span, elem: Box<TypeExpr> },
    /// `[N]T`, where `N` is kept as written
    Array { span: Span, len: String, elem: Box<TypeExpr> },
    /// `map[K]V`
    Map { span: Span, key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { span: Span, dir: ChanDir, elem: Box<TypeExpr> },
    /// `func(...) ...`
    Func { span: Span, sig: Signature },
    /// `interface { ... }`
    Interface { span: Span, elems: Vec<InterfaceElem> },
    /// `struct { ... }`
    Struct { span: Span, fields: Vec<FieldDecl> },
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Name(name) => name.span,
            TypeExpr::Pointer { span, .. }
            | TypeExpr::Slice { span, .. }
            | TypeExpr::Array { span, .. }
            | TypeExpr::Map { span, .. }
            | TypeExpr::Chan { span, .. }
            | TypeExpr::Func { span, .. }
            | TypeExpr::Interface { span, .. }
            | TypeExpr::Struct { span, .. } => *span,
        }
    }

    /// The identifier if this is an unqualified type name.
    pub fn as_bare_name(&self) -> Option<&Ident> {
        match self {
            TypeExpr::Name(QIdent { qual: None, id, .. }) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Parameters and results of a function, method or function type.
///
/// ```text
/// func Contains(s, substr string) bool
///              ^^^^^^^^^^^^^^^^^^ ^^^^
///                    params       results
/// ```
/// Grouped parameters (`s, substr string`) are expanded, so every `Param` carries its own type.
#[derive(Debug, Clone)]
pub struct Signature {
    pub span: Span,
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub span: Span,
    pub name: Option<Ident>,
    pub variadic: bool,
    pub typ: TypeExpr,
}

/// An element of an interface body: either an embedded interface or a method.
#[derive(Debug, Clone)]
pub enum InterfaceElem {
    Embed { doc: Option<DocComment>, name: QIdent },
    Method(MethodSpec),
}

/// A method inside an interface body.
///
/// ```text
/// Read(p []byte) (n int, err error)
/// ^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^
/// name             sig
/// ```
#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub span: Span,
    pub doc: Option<DocComment>,
    pub name: Ident,
    pub sig: Signature,
}

/// A line of a struct body.
///
/// `names` is empty for an embedded field such as `io.Reader` or `*Buffer`.
/// `tag` is the tag literal including its delimiters.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub span: Span,
    pub doc: Option<DocComment>,
    pub names: Vec<Ident>,
    pub typ: TypeExpr,
    pub tag: Option<String>,
}
