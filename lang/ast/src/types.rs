use std::fmt;

use derivative::Derivative;
use serde_derive::Serialize;
use stubcat_miette_util::codespan::Span;
use stubcat_printer::theme::ThemeExt;
use stubcat_printer::tokens::*;
use stubcat_printer::util::*;
use stubcat_printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};

use super::decls::DocComment;

// TypeName
//
//

/// A reference to a named type, e.g. `Reader` or `io.Reader`.
///
/// References are kept as written; they are only resolved by the consistency checker,
/// and a reference to an undeclared type is not an error in itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub name: String,
}

impl TypeName {
    pub fn bare(name: impl Into<String>) -> Self {
        TypeName { package: None, name: name.into() }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeName { package: Some(package.into()), name: name.into() }
    }

    pub fn is_qualified(&self) -> bool {
        self.package.is_some()
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{package}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl Print for TypeName {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match &self.package {
            Some(package) => alloc.package(package).append(DOT).append(alloc.typ(&self.name)),
            None => alloc.typ(&self.name),
        }
    }
}

// Type
//
//

/// A type as it occurs in signatures, fields and type declarations.
///
/// Spans are not tracked for types, so two types are equal iff they have the same structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Type {
    Named(TypeName),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    /// The length is kept as written.
    Array { len: String, elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Func(Signature),
    Struct(Vec<Field>),
    /// An anonymous interface with at least one element
    Interface(Vec<InterfaceElem>),
    /// The empty interface, written `interface{}` or `any`
    Any,
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(TypeName::bare(name))
    }

    /// The type name if this is a (possibly qualified) named type.
    pub fn as_named(&self) -> Option<&TypeName> {
        match self {
            Type::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl Print for Type {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Type::Named(name) => name.print(cfg, alloc),
            Type::Pointer(elem) => alloc.text(STAR).append(elem.print(cfg, alloc)),
            Type::Slice(elem) => alloc.text(BRACKETS).append(elem.print(cfg, alloc)),
            Type::Array { len, elem } => alloc
                .text(len)
                .brackets()
                .append(elem.print(cfg, alloc)),
            Type::Map { key, value } => alloc
                .keyword(MAP)
                .append(key.print(cfg, alloc).brackets())
                .append(value.print(cfg, alloc)),
            Type::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => alloc.keyword(CHAN),
                    ChanDir::Send => alloc.keyword(CHAN).append(ARROW_LEFT),
                    ChanDir::Recv => alloc.text(ARROW_LEFT).append(alloc.keyword(CHAN)),
                };
                prefix.append(alloc.space()).append(elem.print(cfg, alloc))
            }
            Type::Func(sig) => alloc.keyword(FUNC).append(sig.print(cfg, alloc)),
            Type::Struct(fields) => print_struct(fields, cfg, alloc),
            Type::Interface(elems) => print_interface(elems, cfg, alloc),
            Type::Any => alloc.keyword(INTERFACE).append("{}"),
        }
    }
}

pub(crate) fn print_struct<'a>(
    fields: &'a [Field],
    cfg: &PrintCfg,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let sep = if fields.is_empty() { alloc.nil() } else { alloc.space() };
    let fields = fields.iter().map(|field| field.print(cfg, alloc)).collect();
    alloc.keyword(STRUCT).append(sep).append(print_block(fields, cfg, alloc))
}

pub(crate) fn print_interface<'a>(
    elems: &'a [InterfaceElem],
    cfg: &PrintCfg,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let sep = if elems.is_empty() { alloc.nil() } else { alloc.space() };
    let elems = elems.iter().map(|elem| elem.print(cfg, alloc)).collect();
    alloc.keyword(INTERFACE).append(sep).append(print_block(elems, cfg, alloc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

// Signature
//
//

/// Parameters and results of a function, method or function type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

impl Signature {
    /// Whether the last parameter is variadic.
    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|param| param.variadic)
    }

    /// Whether both signatures agree on parameter and result types, ignoring names.
    pub fn same_shape(&self, other: &Signature) -> bool {
        fn shape(params: &[Param]) -> impl Iterator<Item = (&Type, bool)> {
            params.iter().map(|param| (&param.typ, param.variadic))
        }
        self.params.len() == other.params.len()
            && self.results.len() == other.results.len()
            && shape(&self.params).eq(shape(&other.params))
            && shape(&self.results).eq(shape(&other.results))
    }
}

impl Print for Signature {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let params = print_comma_separated(&self.params, cfg, alloc).parens();
        let results = match self.results.as_slice() {
            [] => alloc.nil(),
            [single] if single.name.is_none() => alloc.space().append(single.print(cfg, alloc)),
            results => alloc.space().append(print_comma_separated(results, cfg, alloc).parens()),
        };
        params.append(results)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use stubcat_printer::PrintToString;
        f.write_str(&self.print_to_string(None))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub typ: Type,
    pub variadic: bool,
}

impl Param {
    pub fn unnamed(typ: Type) -> Self {
        Param { name: None, typ, variadic: false }
    }
}

impl Print for Param {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let name = match &self.name {
            Some(name) => alloc.text(name).append(alloc.space()),
            None => alloc.nil(),
        };
        let ellipsis = if self.variadic { alloc.text(ELLIPSIS) } else { alloc.nil() };
        name.append(ellipsis).append(self.typ.print(cfg, alloc))
    }
}

// Interface elements
//
//

/// An element of an interface body, in declaration order.
#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub enum InterfaceElem {
    /// An embedded interface, e.g. `io.Reader`
    Embed {
        #[derivative(PartialEq = "ignore")]
        #[serde(skip)]
        span: Span,
        #[serde(skip_serializing_if = "Option::is_none")]
        doc: Option<DocComment>,
        name: TypeName,
    },
    Method(MethodSpec),
}

impl Print for InterfaceElem {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            InterfaceElem::Embed { doc, name, .. } => {
                doc.print(cfg, alloc).append(name.print(cfg, alloc))
            }
            InterfaceElem::Method(method) => method.print(cfg, alloc),
        }
    }
}

/// A method listed in an interface body
///
/// ```text
/// Read(p []byte) (n int, err error)
/// ^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^
/// name             sig
/// ```
#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub struct MethodSpec {
    #[derivative(PartialEq = "ignore")]
    #[serde(skip)]
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    pub name: String,
    pub sig: Signature,
}

impl Print for MethodSpec {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.doc
            .print(cfg, alloc)
            .append(alloc.func(&self.name))
            .append(self.sig.print(cfg, alloc))
    }
}

// Fields
//
//

/// A struct field. `name` is `None` for embedded fields.
///
/// Grouped fields such as `X, Y int` are expanded into one field each.
#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub struct Field {
    #[derivative(PartialEq = "ignore")]
    #[serde(skip)]
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub typ: Type,
    /// The tag literal including its delimiters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Field {
    pub fn is_embedded(&self) -> bool {
        self.name.is_none()
    }
}

impl Print for Field {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let name = match &self.name {
            Some(name) => alloc.text(name).append(alloc.space()),
            None => alloc.nil(),
        };
        let tag = match &self.tag {
            Some(tag) => alloc.space().append(alloc.text(tag)),
            None => alloc.nil(),
        };
        self.doc.print(cfg, alloc).append(name).append(self.typ.print(cfg, alloc)).append(tag)
    }
}
