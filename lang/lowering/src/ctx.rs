use stubcat_ast::{BUILTIN_PACKAGE, Catalogue, Decl, DocComment, Package};
use stubcat_miette_util::codespan::Span;
use url::Url;

pub struct Ctx {
    /// The package receiving declarations
    current: String,
    /// Accumulates packages and their declarations
    catalogue: Catalogue,
}

impl Ctx {
    pub fn empty(uri: Url) -> Self {
        Self { current: BUILTIN_PACKAGE.to_owned(), catalogue: Catalogue::empty(uri) }
    }

    /// Switch to the package declared by a `package` header.
    ///
    /// Only the first header of a package contributes its span and doc comment.
    pub fn open_package(&mut self, name: &str, span: Span, doc: Option<DocComment>) {
        let package: &mut Package = self.catalogue.package_mut(name);
        if package.span.is_none() {
            package.span = Some(span);
        }
        if package.doc.is_none() {
            package.doc = doc;
        }
        self.current = name.to_owned();
    }

    pub fn add_decl(&mut self, decl: Decl) {
        self.catalogue.package_mut(&self.current).decls.push(decl);
    }

    pub fn finish(self) -> Catalogue {
        self.catalogue
    }
}
