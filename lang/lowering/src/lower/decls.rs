use stubcat_ast as ast;
use stubcat_parser::cst;
use stubcat_parser::cst::decls::Item;
use stubcat_parser::cst::types::TypeExpr;

use super::Lower;
use super::types::lower_fields;
use crate::ctx::*;

impl Lower for Item {
    type Target = ();

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        match self {
            Item::Package(package) => package.lower(ctx),
            Item::Type(spec) => {
                let decl = spec.lower(ctx);
                ctx.add_decl(decl.into());
            }
            Item::Func(func) => {
                let decl = func.lower(ctx);
                ctx.add_decl(decl);
            }
        }
    }
}

impl Lower for cst::decls::PackageClause {
    type Target = ();

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::decls::PackageClause { span, doc, name } = self;
        let doc = doc.lower(ctx);
        ctx.open_package(&name.id, *span, doc);
    }
}

impl Lower for cst::decls::TypeSpec {
    type Target = ast::TypeDecl;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::decls::TypeSpec { span, doc, name, alias, typ } = self;
        let body = match typ {
            TypeExpr::Interface { elems, .. } if !alias => {
                ast::TypeBody::Interface(ast::InterfaceBody { elems: elems.lower(ctx) })
            }
            TypeExpr::Struct { fields, .. } if !alias => {
                ast::TypeBody::Struct(ast::StructBody { fields: lower_fields(fields, ctx) })
            }
            _ => ast::TypeBody::Alias(ast::AliasBody {
                underlying: typ.lower(ctx),
                is_builtin_alias: typ.as_bare_name().is_some_and(|id| id.id == name.id),
                is_alias_decl: *alias,
            }),
        };
        ast::TypeDecl { span: *span, doc: doc.lower(ctx), name: name.id.clone(), body }
    }
}

impl Lower for cst::decls::FuncDecl {
    type Target = ast::Decl;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::decls::FuncDecl { span, doc, receiver, name, sig } = self;
        let doc = doc.lower(ctx);
        let sig = sig.lower(ctx);
        match receiver {
            Some(receiver) => ast::Decl::Method(ast::MethodDecl {
                span: *span,
                doc,
                receiver: receiver.lower(ctx),
                name: name.id.clone(),
                sig,
            }),
            None => ast::Decl::Func(ast::FuncDecl { span: *span, doc, name: name.id.clone(), sig }),
        }
    }
}

impl Lower for cst::decls::Receiver {
    type Target = ast::Receiver;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        let cst::decls::Receiver { name, pointer, typ, .. } = self;
        ast::Receiver {
            name: name.as_ref().map(|name| name.id.clone()),
            pointer: *pointer,
            typ: typ.lower(ctx),
        }
    }
}
