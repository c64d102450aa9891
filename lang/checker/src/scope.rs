use stubcat_ast::{BUILTIN_PACKAGE, Catalogue, Decl, HashMap, TypeName};

/// Package-scope names of a catalogue: types and functions, but not methods.
///
/// If a name is declared more than once, the first declaration wins.
pub struct Scope<'a> {
    decls: HashMap<(&'a str, &'a str), &'a Decl>,
}

impl<'a> Scope<'a> {
    pub fn new(cat: &'a Catalogue) -> Self {
        let mut decls = HashMap::default();
        for package in &cat.packages {
            for decl in &package.decls {
                if matches!(decl, Decl::Method(_)) {
                    continue;
                }
                decls.entry((package.name.as_str(), decl.name())).or_insert(decl);
            }
        }
        Scope { decls }
    }

    pub fn decl(&self, package: &'a str, name: &'a str) -> Option<&'a Decl> {
        self.decls.get(&(package, name)).copied()
    }

    /// Resolve a type reference occurring in `package`.
    ///
    /// Qualified names are looked up in the named package. Bare names are looked up in
    /// `package` first and then in the builtin package.
    /// Returns the package in which the declaration was found.
    pub fn resolve(&self, package: &'a str, name: &'a TypeName) -> Option<(&'a str, &'a Decl)> {
        match &name.package {
            Some(qual) => self.decl(qual, &name.name).map(|decl| (qual.as_str(), decl)),
            None => self
                .decl(package, &name.name)
                .map(|decl| (package, decl))
                .or_else(|| self.decl(BUILTIN_PACKAGE, &name.name).map(|decl| (BUILTIN_PACKAGE, decl))),
        }
    }
}
