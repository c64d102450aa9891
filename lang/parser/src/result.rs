use miette::{Diagnostic, SourceSpan};
use stubcat_miette_util::ToMiette;
use stubcat_miette_util::codespan::{LineStarts, Location, Span};
use thiserror::Error;

/// A stub that does not follow the declaration grammar.
///
/// Parse errors abort the current load, so there is at most one per load.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Malformed stub at {location}: {kind}{}", in_decl(.decl))]
#[diagnostic(code("P-001"))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
    /// The declaration that was being parsed, if the parser got as far as its name.
    pub decl: Option<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, decl: Option<String>, lines: &LineStarts) -> Self {
        ParseError { kind, location: lines.location(span.start), decl, span: span.to_miette() }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

fn in_decl(decl: &Option<String>) -> String {
    match decl {
        Some(decl) => format!(" (in declaration `{decl}`)"),
        None => String::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("invalid token")]
    InvalidToken,
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: &'static str },
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("mixed named and unnamed parameters")]
    MixedParameters,
    #[error("results cannot be variadic")]
    VariadicResult,
    #[error("stub functions must not have a body")]
    NonEmptyBody,
    #[error("{0} are not supported in stubs")]
    Unsupported(&'static str),
    #[error("stub files are limited to 4 GiB")]
    TooLarge,
}
