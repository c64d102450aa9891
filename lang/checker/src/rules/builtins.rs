//! Builtin completeness.
//!
//! In the builtin package, a type declared as itself (`type int int`, `type error error`)
//! bridges a predeclared type into the catalogue. Any other type defined as a bare type name
//! (`type byte uint8`) is a builtin alias. If it resolves to a basic type, the representation
//! must be consistent.

use std::collections::hash_map::Entry;

use stubcat_ast::*;
use stubcat_miette_util::ToMiette;

use crate::result::Violation;

enum Resolution {
    Basic(MachineRepr),
    /// The chain ends in a declared type that is not basic, e.g. an interface
    NotBasic,
    Unresolved,
}

pub fn check(cat: &Catalogue, out: &mut Vec<Violation>) {
    for package in &cat.packages {
        if package.is_builtin() {
            check_builtin_package(package, out);
            continue;
        }
        for typ in package.types().filter(|typ| typ.is_builtin_alias()) {
            out.push(Violation::BridgeOutsideBuiltins {
                package: package.name.clone(),
                name: typ.name.clone(),
                span: Some(typ.span.to_miette()),
            });
        }
    }
}

fn check_builtin_package(package: &Package, out: &mut Vec<Violation>) {
    let mut declared: HashMap<&str, &TypeDecl> = HashMap::default();
    for typ in package.types() {
        declared.entry(typ.name.as_str()).or_insert(typ);
    }
    let mut custom: HashMap<&str, MachineRepr> = HashMap::default();

    for typ in package.types() {
        let span = Some(typ.span.to_miette());
        if typ.is_builtin_alias() {
            if !is_predeclared(&typ.name) {
                out.push(Violation::UnknownBuiltin { name: typ.name.clone(), span });
            }
            continue;
        }
        let Some(target) = bare_alias_target(typ) else { continue };

        let mut visited = vec![typ.name.as_str()];
        let repr = match resolve(&declared, target, &mut visited) {
            Resolution::Basic(repr) => repr,
            Resolution::NotBasic => continue,
            Resolution::Unresolved => {
                out.push(Violation::UnresolvedBuiltin {
                    name: typ.name.clone(),
                    target: target.to_owned(),
                    span,
                });
                continue;
            }
        };

        if let Some(expected) = predeclared_repr(&typ.name) {
            if expected != repr {
                out.push(Violation::MismatchedBuiltin {
                    name: typ.name.clone(),
                    expected,
                    found: repr,
                    span,
                });
            }
            continue;
        }
        match custom.entry(typ.name.as_str()) {
            Entry::Occupied(first) if *first.get() != repr => {
                out.push(Violation::ConflictingBuiltin {
                    name: typ.name.clone(),
                    first: *first.get(),
                    second: repr,
                    span,
                });
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(repr);
            }
        }
    }
}

/// `uint8` for `type byte uint8`
fn bare_alias_target(typ: &TypeDecl) -> Option<&str> {
    match &typ.body {
        TypeBody::Alias(AliasBody {
            underlying: Type::Named(TypeName { package: None, name }), ..
        }) => Some(name.as_str()),
        _ => None,
    }
}

/// Follow a chain of builtin aliases down to a basic type.
fn resolve<'a>(
    declared: &HashMap<&'a str, &'a TypeDecl>,
    name: &'a str,
    visited: &mut Vec<&'a str>,
) -> Resolution {
    let Some(&decl) = declared.get(name) else {
        return predeclared(name);
    };
    if decl.is_builtin_alias() {
        return predeclared(name);
    }
    let Some(target) = bare_alias_target(decl) else {
        return Resolution::NotBasic;
    };
    if visited.contains(&name) {
        return Resolution::Unresolved;
    }
    visited.push(name);
    resolve(declared, target, visited)
}

fn predeclared(name: &str) -> Resolution {
    match predeclared_repr(name) {
        Some(repr) => Resolution::Basic(repr),
        None if is_predeclared(name) => Resolution::NotBasic,
        None => Resolution::Unresolved,
    }
}
