use std::collections::hash_map::Entry;

use stubcat_ast::{Catalogue, Decl, HashMap};
use stubcat_miette_util::ToMiette;
use stubcat_miette_util::codespan::Span;

use crate::result::Violation;

/// Types and functions share one namespace per package.
/// Methods are unique per receiver type.
pub fn check(cat: &Catalogue, out: &mut Vec<Violation>) {
    for package in &cat.packages {
        let mut names: HashMap<&str, Span> = HashMap::default();
        let mut methods: HashMap<(&str, &str), Span> = HashMap::default();

        for decl in &package.decls {
            match decl {
                Decl::Method(method) => {
                    let key = (method.receiver.typ.name.as_str(), method.name.as_str());
                    match methods.entry(key) {
                        Entry::Occupied(first) => out.push(Violation::DuplicateMethod {
                            package: package.name.clone(),
                            receiver: method.receiver.typ.name.clone(),
                            method: method.name.clone(),
                            span: Some(method.span.to_miette()),
                            first: Some(first.get().to_miette()),
                        }),
                        Entry::Vacant(slot) => {
                            slot.insert(method.span);
                        }
                    }
                }
                Decl::Type(_) | Decl::Func(_) => match names.entry(decl.name()) {
                    Entry::Occupied(first) => out.push(Violation::DuplicateName {
                        package: package.name.clone(),
                        name: decl.name().to_owned(),
                        span: Some(decl.span().to_miette()),
                        first: Some(first.get().to_miette()),
                    }),
                    Entry::Vacant(slot) => {
                        slot.insert(decl.span());
                    }
                },
            }
        }
    }
}
