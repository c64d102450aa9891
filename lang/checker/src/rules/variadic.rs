use stubcat_ast::{Catalogue, Decl, InterfaceElem, Signature, Type, TypeBody};
use stubcat_miette_util::ToMiette;
use stubcat_miette_util::codespan::Span;

use crate::result::Violation;

/// Only the last parameter of a signature may be variadic, and results never are.
///
/// Functions, methods, interface methods, struct fields and type definitions are checked,
/// including the function types nested anywhere inside them. Each offending declaration
/// is reported once.
pub fn check(cat: &Catalogue, out: &mut Vec<Violation>) {
    for package in &cat.packages {
        let pkg = &package.name;
        for decl in &package.decls {
            match decl {
                Decl::Func(func) => {
                    check_sig(format!("{pkg}.{}", func.name), &func.sig, func.span, out)
                }
                Decl::Method(method) => check_sig(
                    format!("{pkg}.{}.{}", method.receiver.typ.name, method.name),
                    &method.sig,
                    method.span,
                    out,
                ),
                Decl::Type(typ) => match &typ.body {
                    TypeBody::Interface(body) => {
                        for spec in body.methods() {
                            let name = format!("{pkg}.{}.{}", typ.name, spec.name);
                            check_sig(name, &spec.sig, spec.span, out);
                        }
                    }
                    TypeBody::Struct(body) => {
                        for field in body.fields.iter().filter(|field| !type_ok(&field.typ)) {
                            let field_name = field.name.as_deref().unwrap_or("_");
                            out.push(Violation::MisplacedVariadic {
                                name: format!("{pkg}.{}.{field_name}", typ.name),
                                span: Some(field.span.to_miette()),
                            });
                        }
                    }
                    TypeBody::Alias(alias) => {
                        if !type_ok(&alias.underlying) {
                            out.push(Violation::MisplacedVariadic {
                                name: format!("{pkg}.{}", typ.name),
                                span: Some(typ.span.to_miette()),
                            });
                        }
                    }
                },
            }
        }
    }
}

fn check_sig(name: String, sig: &Signature, span: Span, out: &mut Vec<Violation>) {
    if !sig_ok(sig) {
        out.push(Violation::MisplacedVariadic { name, span: Some(span.to_miette()) });
    }
}

fn sig_ok(sig: &Signature) -> bool {
    let last = sig.params.len().saturating_sub(1);
    let placed = sig.params.iter().enumerate().all(|(i, param)| !param.variadic || i == last)
        && sig.results.iter().all(|result| !result.variadic);
    placed && sig.params.iter().chain(&sig.results).all(|param| type_ok(&param.typ))
}

fn type_ok(typ: &Type) -> bool {
    match typ {
        Type::Named(_) | Type::Any => true,
        Type::Pointer(elem) | Type::Slice(elem) => type_ok(elem),
        Type::Array { elem, .. } | Type::Chan { elem, .. } => type_ok(elem),
        Type::Map { key, value } => type_ok(key) && type_ok(value),
        Type::Func(sig) => sig_ok(sig),
        Type::Struct(fields) => fields.iter().all(|field| type_ok(&field.typ)),
        Type::Interface(elems) => elems.iter().all(|elem| match elem {
            InterfaceElem::Method(spec) => sig_ok(&spec.sig),
            InterfaceElem::Embed { .. } => true,
        }),
    }
}
