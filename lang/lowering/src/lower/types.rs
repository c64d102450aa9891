use stubcat_ast as ast;
use stubcat_parser::cst;
use stubcat_parser::cst::types::TypeExpr;

use super::Lower;
use crate::ctx::*;

impl Lower for cst::QIdent {
    type Target = ast::TypeName;

    fn lower(&self, _ctx: &mut Ctx) -> Self::Target {
        ast::TypeName { package: self.qual.as_ref().map(|q| q.id.clone()), name: self.id.id.clone() }
    }
}

impl Lower for TypeExpr {
    type Target = ast::Type;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        match self {
            TypeExpr::Name(name) if !name.is_qualified() && name.id.id == "any" => ast::Type::Any,
            TypeExpr::Name(name) => ast::Type::Named(name.lower(ctx)),
            TypeExpr::Pointer { elem, .. } => ast::Type::Pointer(elem.lower(ctx)),
            TypeExpr::Slice { elem, .. } => ast::Type::Slice(elem.lower(ctx)),
            TypeExpr::Array { len, elem, .. } => {
                ast::Type::Array { len: len.clone(), elem: elem.lower(ctx) }
            }
            TypeExpr::Map { key, value, .. } => {
                ast::Type::Map { key: key.lower(ctx), value: value.lower(ctx) }
            }
            TypeExpr::Chan { dir, elem, .. } => {
                ast::Type::Chan { dir: dir.lower(ctx), elem: elem.lower(ctx) }
            }
            TypeExpr::Func { sig, .. } => ast::Type::Func(sig.lower(ctx)),
            TypeExpr::Interface { elems, .. } if elems.is_empty() => ast::Type::Any,
            TypeExpr::Interface { elems, .. } => ast::Type::Interface(elems.lower(ctx)),
            TypeExpr::Struct { fields, .. } => ast::Type::Struct(lower_fields(fields, ctx)),
        }
    }
}

impl Lower for cst::types::ChanDir {
    type Target = ast::ChanDir;

    fn lower(&self, _ctx: &mut Ctx) -> Self::Target {
        match self {
            cst::types::ChanDir::Both => ast::ChanDir::Both,
            cst::types::ChanDir::Send => ast::ChanDir::Send,
            cst::types::ChanDir::Recv => ast::ChanDir::Recv,
        }
    }
}

impl Lower for cst::types::Signature {
    type Target = ast::Signature;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::types::Signature { params, results, .. } = self;
        ast::Signature { params: params.lower(ctx), results: results.lower(ctx) }
    }
}

impl Lower for cst::types::Param {
    type Target = ast::Param;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::types::Param { name, variadic, typ, .. } = self;
        ast::Param {
            name: name.as_ref().map(|name| name.id.clone()),
            typ: typ.lower(ctx),
            variadic: *variadic,
        }
    }
}

impl Lower for cst::types::InterfaceElem {
    type Target = ast::InterfaceElem;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        match self {
            cst::types::InterfaceElem::Embed { doc, name } => ast::InterfaceElem::Embed {
                span: name.span,
                doc: doc.lower(ctx),
                name: name.lower(ctx),
            },
            cst::types::InterfaceElem::Method(method) => ast::InterfaceElem::Method(method.lower(ctx)),
        }
    }
}

impl Lower for cst::types::MethodSpec {
    type Target = ast::MethodSpec;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::types::MethodSpec { span, doc, name, sig } = self;
        ast::MethodSpec { span: *span, doc: doc.lower(ctx), name: name.id.clone(), sig: sig.lower(ctx) }
    }
}

impl Lower for cst::decls::DocComment {
    type Target = ast::DocComment;

    fn lower(&self, _ctx: &mut Ctx) -> Self::Target {
        ast::DocComment { docs: self.docs.clone() }
    }
}

/// Expand grouped fields such as `X, Y int` into one field per name.
/// The doc comment stays with the first of them.
pub fn lower_fields(fields: &[cst::types::FieldDecl], ctx: &mut Ctx) -> Vec<ast::Field> {
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let cst::types::FieldDecl { span, doc, names, typ, tag } = field;
        let typ = typ.lower(ctx);
        let mut doc = doc.lower(ctx);
        if names.is_empty() {
            out.push(ast::Field { span: *span, doc, name: None, typ, tag: tag.clone() });
            continue;
        }
        for name in names {
            out.push(ast::Field {
                span: *span,
                doc: doc.take(),
                name: Some(name.id.clone()),
                typ: typ.clone(),
                tag: tag.clone(),
            });
        }
    }
    out
}
