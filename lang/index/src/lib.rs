//! Read-only lookups over a validated catalogue.
//!
//! An [`Index`] is built once from a catalogue that passed validation and is never
//! mutated afterwards, so it can be shared between threads behind an `Arc`.

mod method;

use std::sync::Arc;

use stubcat_ast::{BUILTIN_PACKAGE, Catalogue, Decl, HashMap, Package, QualName};
use stubcat_checker::MethodSets;

pub use method::Method;

#[derive(Debug)]
pub struct Index {
    catalogue: Arc<Catalogue>,
    packages: HashMap<String, PackageIndex>,
}

#[derive(Debug, Default)]
struct PackageIndex {
    /// Position of the package in the catalogue
    pos: usize,
    /// Types and functions, by name
    decls: HashMap<String, usize>,
    /// Methods, by receiver type name
    methods: HashMap<String, Vec<Method>>,
}

impl Index {
    /// Build the index for a catalogue and the method sets computed while validating it.
    ///
    /// Should a name be declared twice, the first declaration is indexed.
    pub fn new(catalogue: Arc<Catalogue>, method_sets: &MethodSets) -> Self {
        let mut packages: HashMap<String, PackageIndex> = HashMap::default();
        for (pos, package) in catalogue.packages.iter().enumerate() {
            let index = packages.entry(package.name.clone()).or_default();
            index.pos = pos;
            for (decl_pos, decl) in package.decls.iter().enumerate() {
                match decl {
                    Decl::Method(method) => index
                        .methods
                        .entry(method.receiver.typ.name.clone())
                        .or_default()
                        .push(Method::Declared(method.clone())),
                    Decl::Type(_) | Decl::Func(_) => {
                        index.decls.entry(decl.name().to_owned()).or_insert(decl_pos);
                    }
                }
            }
            for typ in package.types().filter(|typ| typ.is_interface()) {
                let name = QualName::new(&package.name, &typ.name);
                let Some(methods) = method_sets.get(&name) else { continue };
                index.methods.entry(typ.name.clone()).or_insert_with(|| {
                    methods
                        .iter()
                        .map(|method| Method::Interface {
                            owner: method.origin.clone(),
                            spec: method.spec.clone(),
                        })
                        .collect()
                });
            }
        }
        log::debug!("Indexed {} packages of {}", packages.len(), catalogue.uri);
        Index { catalogue, packages }
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    /// The type or function `name` declared in `package`.
    pub fn lookup(&self, package: &str, name: &str) -> Option<&Decl> {
        let index = self.packages.get(package)?;
        let pos = *index.decls.get(name)?;
        self.catalogue.packages[index.pos].decls.get(pos)
    }

    /// Like [`Index::lookup`], but unqualified names that are not declared in `package`
    /// are looked up in the builtin package.
    pub fn resolve(&self, package: &str, name: &str) -> Option<(&str, &Decl)> {
        let local = self.packages.get_key_value(package).and_then(|(package, index)| {
            let pos = *index.decls.get(name)?;
            let decl = self.catalogue.packages[index.pos].decls.get(pos)?;
            Some((package.as_str(), decl))
        });
        local.or_else(|| self.lookup(BUILTIN_PACKAGE, name).map(|decl| (BUILTIN_PACKAGE, decl)))
    }

    /// The methods of the type `receiver` declared in `package`.
    ///
    /// For a concrete type these are the methods declared on it, in declaration order.
    /// For an interface it is the flattened method set. Unknown types have no methods.
    pub fn methods_of(&self, package: &str, receiver: &str) -> &[Method] {
        self.packages
            .get(package)
            .and_then(|index| index.methods.get(receiver))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn method(&self, package: &str, receiver: &str, name: &str) -> Option<&Method> {
        self.methods_of(package, receiver).iter().find(|method| method.name() == name)
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        let index = self.packages.get(name)?;
        self.catalogue.packages.get(index.pos)
    }

    /// Package names in declaration order.
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.catalogue.packages.iter().map(|package| package.name.as_str())
    }
}
