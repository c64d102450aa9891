use std::fmt;

use derivative::Derivative;
use stubcat_miette_util::codespan::Span;

#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct Ident {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Span,
    pub id: String,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// A possibly package-qualified identifier, e.g. `Reader` or `io.Reader`.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub struct QIdent {
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub span: Span,
    pub qual: Option<Ident>,
    pub id: Ident,
}

impl QIdent {
    pub fn is_qualified(&self) -> bool {
        self.qual.is_some()
    }
}

impl fmt::Display for QIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qual {
            Some(qual) => write!(f, "{qual}.{}", self.id),
            None => write!(f, "{}", self.id),
        }
    }
}
