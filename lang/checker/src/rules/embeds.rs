//! Embed resolution and method set consistency.
//!
//! Both rules are checked while flattening interfaces, so they share one pass.
//! Violations are collected per rule and returned separately.

use stubcat_ast::*;
use stubcat_miette_util::ToMiette;
use stubcat_miette_util::codespan::Span;

use crate::method_sets::{FlatMethod, MethodSets};
use crate::result::Violation;
use crate::scope::Scope;

pub struct Flattened {
    pub method_sets: MethodSets,
    pub embed_violations: Vec<Violation>,
    pub method_violations: Vec<Violation>,
}

pub fn flatten_all<'a>(cat: &'a Catalogue, scope: &Scope<'a>) -> Flattened {
    let mut flattener = Flattener {
        scope,
        method_sets: MethodSets::default(),
        reported_cycles: HashSet::default(),
        embed_violations: Vec::new(),
        method_violations: Vec::new(),
    };
    for package in &cat.packages {
        for decl in package.types() {
            if let TypeBody::Interface(body) = &decl.body {
                flattener.flatten(&package.name, decl, body, &mut Vec::new());
            }
        }
    }
    log::trace!("Flattened {} interfaces", flattener.method_sets.len());
    Flattened {
        method_sets: flattener.method_sets,
        embed_violations: flattener.embed_violations,
        method_violations: flattener.method_violations,
    }
}

struct Flattener<'s, 'a> {
    scope: &'s Scope<'a>,
    method_sets: MethodSets,
    /// Members of every cycle reported so far, sorted
    reported_cycles: HashSet<Vec<QualName>>,
    embed_violations: Vec<Violation>,
    method_violations: Vec<Violation>,
}

impl<'a> Flattener<'_, 'a> {
    /// Compute the method set of the interface `decl` declared in `package`.
    ///
    /// `stack` holds the interfaces currently being flattened, outermost first.
    fn flatten(
        &mut self,
        package: &'a str,
        decl: &'a TypeDecl,
        body: &'a InterfaceBody,
        stack: &mut Vec<QualName>,
    ) -> Vec<FlatMethod> {
        let owner = QualName::new(package, &decl.name);
        if let Some(done) = self.method_sets.get(&owner) {
            return done.to_vec();
        }
        stack.push(owner.clone());

        let mut methods = Vec::new();
        for elem in &body.elems {
            match elem {
                InterfaceElem::Method(spec) => {
                    let method = FlatMethod { origin: owner.clone(), spec: spec.clone() };
                    self.merge(&owner, &mut methods, method, spec.span);
                }
                InterfaceElem::Embed { span, name, .. } => {
                    for method in self.flatten_embed(&owner, package, name, *span, stack) {
                        self.merge(&owner, &mut methods, method, *span);
                    }
                }
            }
        }

        stack.pop();
        self.method_sets.insert(owner, methods.clone());
        methods
    }

    /// The methods contributed by one embedded interface, or none if the embed is invalid.
    fn flatten_embed(
        &mut self,
        owner: &QualName,
        package: &'a str,
        name: &'a TypeName,
        span: Span,
        stack: &mut Vec<QualName>,
    ) -> Vec<FlatMethod> {
        let Some((target_package, target)) = self.scope.resolve(package, name) else {
            self.embed_violations.push(Violation::UnresolvedEmbed {
                interface: owner.clone(),
                embed: name.clone(),
                span: Some(span.to_miette()),
            });
            return Vec::new();
        };
        let Decl::Type(target_decl @ TypeDecl { body: TypeBody::Interface(target_body), .. }) =
            target
        else {
            self.embed_violations.push(Violation::EmbedNotInterface {
                interface: owner.clone(),
                embed: name.clone(),
                kind: target.kind(),
                span: Some(span.to_miette()),
            });
            return Vec::new();
        };

        let target_name = QualName::new(target_package, &target_decl.name);
        if let Some(pos) = stack.iter().position(|member| *member == target_name) {
            self.report_cycle(owner, &stack[pos..], &target_name, span);
            return Vec::new();
        }
        self.flatten(target_package, target_decl, target_body, stack)
    }

    fn report_cycle(&mut self, owner: &QualName, members: &[QualName], closing: &QualName, span: Span) {
        let mut key = members.to_vec();
        key.sort();
        if !self.reported_cycles.insert(key) {
            return;
        }
        let path = members
            .iter()
            .chain(std::iter::once(closing))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        self.embed_violations.push(Violation::EmbedCycle {
            interface: owner.clone(),
            path,
            span: Some(span.to_miette()),
        });
    }

    /// Add `method` unless a method of the same name is already present.
    /// Two methods of the same name must have the same signature shape.
    fn merge(&mut self, owner: &QualName, methods: &mut Vec<FlatMethod>, method: FlatMethod, span: Span) {
        match methods.iter().find(|existing| existing.spec.name == method.spec.name) {
            Some(existing) if existing.spec.sig.same_shape(&method.spec.sig) => {}
            Some(existing) => self.method_violations.push(Violation::ConflictingMethod {
                interface: owner.clone(),
                method: method.spec.name.clone(),
                first: existing.spec.sig.to_string(),
                second: method.spec.sig.to_string(),
                span: Some(span.to_miette()),
            }),
            None => methods.push(method),
        }
    }
}
