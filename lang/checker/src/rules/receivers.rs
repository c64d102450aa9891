use stubcat_ast::{Catalogue, Decl};
use stubcat_miette_util::ToMiette;

use crate::result::Violation;
use crate::scope::Scope;

/// Every method's receiver must name a non-interface type declared in the method's own package.
pub fn check<'a>(cat: &'a Catalogue, scope: &Scope<'a>, out: &mut Vec<Violation>) {
    for package in &cat.packages {
        for method in package.methods() {
            let receiver = &method.receiver.typ;
            if receiver.package.as_ref().is_some_and(|qual| *qual != package.name) {
                out.push(Violation::ForeignReceiver {
                    package: package.name.clone(),
                    receiver: receiver.clone(),
                    method: method.name.clone(),
                    span: Some(method.span.to_miette()),
                });
                continue;
            }
            match scope.decl(&package.name, &receiver.name) {
                Some(Decl::Type(typ)) if typ.is_interface() => {
                    out.push(Violation::InterfaceReceiver {
                        package: package.name.clone(),
                        receiver: receiver.name.clone(),
                        method: method.name.clone(),
                        span: Some(method.span.to_miette()),
                    });
                }
                Some(Decl::Type(_)) => {}
                _ => out.push(Violation::UndefinedReceiver {
                    package: package.name.clone(),
                    receiver: receiver.name.clone(),
                    method: method.name.clone(),
                    span: Some(method.span.to_miette()),
                }),
            }
        }
    }
}
