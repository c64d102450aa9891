use std::fmt;

use derivative::Derivative;
use serde_derive::Serialize;
use stubcat_miette_util::codespan::Span;
use stubcat_printer::theme::ThemeExt;
use stubcat_printer::tokens::*;
use stubcat_printer::{Alloc, Builder, DocAllocator, Print, PrintCfg};
use url::Url;

use super::builtin::BUILTIN_PACKAGE;
use super::types::*;

// DocComment
//
//

/// The `//` comment lines directly preceding a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocComment {
    pub docs: Vec<String>,
}

impl Print for DocComment {
    fn print<'a>(&'a self, _cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let DocComment { docs } = self;
        alloc.concat(docs.iter().map(|doc| {
            let text = if doc.is_empty() {
                alloc.nil()
            } else {
                alloc.space().append(alloc.comment(doc))
            };
            alloc.comment(LINE_COMMENT).append(text).append(alloc.hardline())
        }))
    }
}

// QualName
//
//

/// A fully qualified declaration name, e.g. `io.Reader` or `builtin.error`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QualName {
    pub package: String,
    pub name: String,
}

impl QualName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        QualName { package: package.into(), name: name.into() }
    }
}

impl fmt::Display for QualName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

// Catalogue
//
//

/// All declarations of one stub file, grouped by package.
///
/// Packages appear in the order in which they were first declared. If the stub declares
/// anything before its first `package` header, the builtin package comes first.
#[derive(Debug, Clone, Serialize)]
pub struct Catalogue {
    /// The location of the stub file
    #[serde(skip)]
    pub uri: Url,
    pub packages: Vec<Package>,
}

impl Catalogue {
    pub fn empty(uri: Url) -> Self {
        Catalogue { uri, packages: Vec::new() }
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|package| package.name == name)
    }

    /// The package named `name`, which is created if it does not exist yet.
    pub fn package_mut(&mut self, name: &str) -> &mut Package {
        let pos = match self.packages.iter().position(|package| package.name == name) {
            Some(pos) => pos,
            None => {
                let package = Package::new(name);
                if name == BUILTIN_PACKAGE {
                    self.packages.insert(0, package);
                    0
                } else {
                    self.packages.push(package);
                    self.packages.len() - 1
                }
            }
        };
        &mut self.packages[pos]
    }

    pub fn is_empty(&self) -> bool {
        self.packages.iter().all(|package| package.decls.is_empty())
    }

    /// The number of declarations across all packages.
    pub fn decl_count(&self) -> usize {
        self.packages.iter().map(|package| package.decls.len()).sum()
    }
}

impl Print for Catalogue {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let packages: Vec<_> = self
            .packages
            .iter()
            .filter(|package| !(package.is_builtin() && package.decls.is_empty()))
            .map(|package| package.print(cfg, alloc))
            .collect();
        if packages.is_empty() {
            return alloc.nil();
        }
        let sep = alloc.hardline().append(alloc.hardline());
        alloc.intersperse(packages, sep).append(alloc.hardline())
    }
}

// Package
//
//

#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub struct Package {
    pub name: String,
    /// The span of the first `package` header; `None` for the builtin package
    #[derivative(PartialEq = "ignore")]
    #[serde(skip)]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    pub decls: Vec<Decl>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Package { name: name.into(), span: None, doc: None, decls: Vec::new() }
    }

    pub fn is_builtin(&self) -> bool {
        self.name == BUILTIN_PACKAGE
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Type(typ) => Some(typ),
            _ => None,
        })
    }

    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Method(method) => Some(method),
            _ => None,
        })
    }

    /// The first type declaration named `name`.
    pub fn type_decl(&self, name: &str) -> Option<&TypeDecl> {
        self.types().find(|typ| typ.name == name)
    }
}

impl Print for Package {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let Package { name, doc, decls, .. } = self;

        // We usually separate declarations with an empty line, except when the `omit_decl_sep` option is set.
        let sep = || {
            if cfg.omit_decl_sep {
                alloc.hardline()
            } else {
                alloc.hardline().append(alloc.hardline())
            }
        };
        let decls = alloc.intersperse(decls.iter().map(|decl| decl.print(cfg, alloc)), sep());

        if self.is_builtin() {
            return decls;
        }
        let header = doc
            .print(cfg, alloc)
            .append(alloc.keyword(PACKAGE))
            .append(alloc.space())
            .append(alloc.package(name));
        if self.decls.is_empty() { header } else { header.append(sep()).append(decls) }
    }
}

// Decl
//
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
    Type(TypeDecl),
    Func(FuncDecl),
    Method(MethodDecl),
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Type(typ) => &typ.name,
            Decl::Func(func) => &func.name,
            Decl::Method(method) => &method.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Type(typ) => typ.span,
            Decl::Func(func) => func.span,
            Decl::Method(method) => method.span,
        }
    }

    pub fn doc(&self) -> Option<&DocComment> {
        match self {
            Decl::Type(typ) => typ.doc.as_ref(),
            Decl::Func(func) => func.doc.as_ref(),
            Decl::Method(method) => method.doc.as_ref(),
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Decl::Type(TypeDecl { body: TypeBody::Interface(_), .. }) => DeclKind::Interface,
            Decl::Type(TypeDecl { body: TypeBody::Struct(_), .. }) => DeclKind::Struct,
            Decl::Type(_) => DeclKind::Type,
            Decl::Func(_) => DeclKind::Func,
            Decl::Method(_) => DeclKind::Method,
        }
    }
}

impl Print for Decl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Decl::Type(typ) => typ.print(cfg, alloc),
            Decl::Func(func) => func.print(cfg, alloc),
            Decl::Method(method) => method.print(cfg, alloc),
        }
    }
}

impl From<TypeDecl> for Decl {
    fn from(typ: TypeDecl) -> Self {
        Decl::Type(typ)
    }
}

impl From<FuncDecl> for Decl {
    fn from(func: FuncDecl) -> Self {
        Decl::Func(func)
    }
}

impl From<MethodDecl> for Decl {
    fn from(method: MethodDecl) -> Self {
        Decl::Method(method)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Type,
    Interface,
    Struct,
    Func,
    Method,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclKind::Type => "type",
            DeclKind::Interface => "interface",
            DeclKind::Struct => "struct",
            DeclKind::Func => "function",
            DeclKind::Method => "method",
        };
        f.write_str(s)
    }
}

// TypeDecl
//
//

/// Type declaration
///
/// ```text
/// type Duration int64
///      ^^^^^^^^ ^^^^^
///        name   body
/// ```
#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub struct TypeDecl {
    #[derivative(PartialEq = "ignore")]
    #[serde(skip)]
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    pub name: String,
    pub body: TypeBody,
}

impl TypeDecl {
    pub fn is_interface(&self) -> bool {
        matches!(self.body, TypeBody::Interface(_))
    }

    /// Whether this declaration bridges a predeclared name to itself, e.g. `type string string`.
    pub fn is_builtin_alias(&self) -> bool {
        matches!(self.body, TypeBody::Alias(AliasBody { is_builtin_alias: true, .. }))
    }
}

impl Print for TypeDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let TypeDecl { doc, name, body, .. } = self;
        let body = match body {
            TypeBody::Alias(AliasBody { underlying, is_alias_decl, .. }) => {
                let eq = if *is_alias_decl {
                    alloc.text(EQ).append(alloc.space())
                } else {
                    alloc.nil()
                };
                eq.append(underlying.print(cfg, alloc))
            }
            TypeBody::Struct(StructBody { fields }) => print_struct(fields, cfg, alloc),
            TypeBody::Interface(InterfaceBody { elems }) => print_interface(elems, cfg, alloc),
        };
        doc.print(cfg, alloc)
            .append(alloc.keyword(TYPE))
            .append(alloc.space())
            .append(alloc.typ(name))
            .append(alloc.space())
            .append(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TypeBody {
    Alias(AliasBody),
    Struct(StructBody),
    Interface(InterfaceBody),
}

/// A type defined in terms of another type, e.g. `type Duration int64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasBody {
    pub underlying: Type,
    /// Set for `type string string` and the like
    pub is_builtin_alias: bool,
    /// Set for the `type A = B` form
    pub is_alias_decl: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructBody {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterfaceBody {
    pub elems: Vec<InterfaceElem>,
}

impl InterfaceBody {
    pub fn embeds(&self) -> impl Iterator<Item = &TypeName> {
        self.elems.iter().filter_map(|elem| match elem {
            InterfaceElem::Embed { name, .. } => Some(name),
            InterfaceElem::Method(_) => None,
        })
    }

    /// The methods listed directly in this body, without those of embedded interfaces.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.elems.iter().filter_map(|elem| match elem {
            InterfaceElem::Method(method) => Some(method),
            InterfaceElem::Embed { .. } => None,
        })
    }
}

// FuncDecl
//
//

/// A package-level function
#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub struct FuncDecl {
    #[derivative(PartialEq = "ignore")]
    #[serde(skip)]
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    pub name: String,
    pub sig: Signature,
}

impl FuncDecl {
    pub fn is_variadic(&self) -> bool {
        self.sig.is_variadic()
    }
}

impl Print for FuncDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let FuncDecl { doc, name, sig, .. } = self;
        doc.print(cfg, alloc)
            .append(alloc.keyword(FUNC))
            .append(alloc.space())
            .append(alloc.func(name))
            .append(sig.print(cfg, alloc))
    }
}

// MethodDecl
//
//

/// A method declared on a named type
///
/// ```text
/// func (c *Client) Get(url string) (*Response, error)
///      ^^^^^^^^^^^ ^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
///       receiver   name              sig
/// ```
#[derive(Debug, Clone, Derivative, Serialize)]
#[derivative(PartialEq, Eq)]
pub struct MethodDecl {
    #[derivative(PartialEq = "ignore")]
    #[serde(skip)]
    pub span: Span,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    pub receiver: Receiver,
    pub name: String,
    pub sig: Signature,
}

impl Print for MethodDecl {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let MethodDecl { doc, receiver, name, sig, .. } = self;
        doc.print(cfg, alloc)
            .append(alloc.keyword(FUNC))
            .append(alloc.space())
            .append(receiver.print(cfg, alloc).parens())
            .append(alloc.space())
            .append(alloc.func(name))
            .append(sig.print(cfg, alloc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receiver {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pointer: bool,
    pub typ: TypeName,
}

impl Print for Receiver {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let name = match &self.name {
            Some(name) => alloc.text(name).append(alloc.space()),
            None => alloc.nil(),
        };
        let star = if self.pointer { alloc.text(STAR) } else { alloc.nil() };
        name.append(star).append(self.typ.print(cfg, alloc))
    }
}

#[cfg(test)]
mod tests {
    use stubcat_printer::PrintToString;

    use super::*;

    fn uri() -> Url {
        Url::parse("inmemory:///builtins.go").unwrap()
    }

    fn bridge(name: &str) -> Decl {
        Decl::Type(TypeDecl {
            span: Span::default(),
            doc: None,
            name: name.to_owned(),
            body: TypeBody::Alias(AliasBody {
                underlying: Type::named(name),
                is_builtin_alias: true,
                is_alias_decl: false,
            }),
        })
    }

    fn reader() -> Decl {
        Decl::Type(TypeDecl {
            span: Span::default(),
            doc: Some(DocComment { docs: vec!["Reader reads.".to_owned()] }),
            name: "Reader".to_owned(),
            body: TypeBody::Interface(InterfaceBody {
                elems: vec![InterfaceElem::Method(MethodSpec {
                    span: Span::default(),
                    doc: None,
                    name: "Read".to_owned(),
                    sig: Signature {
                        params: vec![Param {
                            name: Some("p".to_owned()),
                            typ: Type::Slice(Box::new(Type::named("byte"))),
                            variadic: false,
                        }],
                        results: vec![
                            Param { name: Some("n".to_owned()), typ: Type::named("int"), variadic: false },
                            Param { name: Some("err".to_owned()), typ: Type::named("error"), variadic: false },
                        ],
                    },
                })],
            }),
        })
    }

    #[test]
    fn builtin_package_comes_first() {
        let mut cat = Catalogue::empty(uri());
        cat.package_mut("io");
        cat.package_mut(BUILTIN_PACKAGE).decls.push(bridge("string"));
        cat.package_mut("io").decls.push(reader());
        let names: Vec<_> = cat.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec![BUILTIN_PACKAGE, "io"]);
        assert_eq!(cat.decl_count(), 2);
    }

    #[test]
    fn print_catalogue() {
        let mut cat = Catalogue::empty(uri());
        cat.package_mut(BUILTIN_PACKAGE).decls.push(bridge("string"));
        cat.package_mut("io").decls.push(reader());
        let expected = "type string string\n\npackage io\n\n// Reader reads.\ntype Reader interface {\n    Read(p []byte) (n int, err error)\n}\n";
        assert_eq!(cat.print_to_string(None), expected);
    }

    #[test]
    fn print_method_decl() {
        let method = MethodDecl {
            span: Span::default(),
            doc: None,
            receiver: Receiver { name: Some("c".to_owned()), pointer: true, typ: TypeName::bare("Client") },
            name: "Do".to_owned(),
            sig: Signature {
                params: vec![Param::unnamed(Type::Pointer(Box::new(Type::named("Request"))))],
                results: vec![
                    Param::unnamed(Type::Pointer(Box::new(Type::named("Response")))),
                    Param::unnamed(Type::named("error")),
                ],
            },
        };
        assert_eq!(method.print_to_string(None), "func (c *Client) Do(*Request) (*Response, error)");
    }

    #[test]
    fn equality_ignores_spans() {
        let Decl::Type(mut moved) = reader() else { unreachable!() };
        moved.span = Span::from(10..20);
        assert_eq!(Decl::Type(moved), reader());
    }

    #[test]
    fn decl_kinds() {
        assert_eq!(reader().kind(), DeclKind::Interface);
        assert_eq!(bridge("int").kind(), DeclKind::Type);
        assert_eq!(bridge("int").kind().to_string(), "type");
    }
}
