use stubcat_ast::{MethodDecl, MethodSpec, QualName, Signature};

/// A method as returned by [`crate::Index::methods_of`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// Declared on a concrete type with a receiver
    Declared(MethodDecl),
    /// Part of an interface's method set; `owner` is the interface whose body lists it
    Interface { owner: QualName, spec: MethodSpec },
}

impl Method {
    pub fn name(&self) -> &str {
        match self {
            Method::Declared(decl) => &decl.name,
            Method::Interface { spec, .. } => &spec.name,
        }
    }

    pub fn signature(&self) -> &Signature {
        match self {
            Method::Declared(decl) => &decl.sig,
            Method::Interface { spec, .. } => &spec.sig,
        }
    }

    pub fn has_pointer_receiver(&self) -> bool {
        matches!(self, Method::Declared(decl) if decl.receiver.pointer)
    }
}
