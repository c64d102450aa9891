use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use url::Url;

use stubcat_checker::Violations;

#[derive(Error, Diagnostic, Debug, Clone)]
#[error("Failed to load stub catalogue")]
pub struct LoadErrors(#[related] pub Vec<LoadError>);

impl<T: Into<LoadError>> From<T> for LoadErrors {
    fn from(value: T) -> Self {
        let err: LoadError = value.into();
        LoadErrors(vec![err])
    }
}

impl LoadErrors {
    /// One entry per violation, so that each is rendered with its own source labels.
    pub fn from_violations(violations: Violations) -> Self {
        LoadErrors(violations.0.into_iter().map(LoadError::Violation).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Error, Diagnostic, Debug, Clone)]
#[error(transparent)]
#[diagnostic(transparent)]
pub enum LoadError {
    Parser(#[from] stubcat_parser::ParseError),
    Violation(#[from] stubcat_checker::Violation),
    Driver(#[from] DriverError),
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum DriverError {
    #[error("Invalid URI: {0}")]
    #[diagnostic(code("D-001"))]
    InvalidUri(Url),
    #[error("File not found: {0}")]
    #[diagnostic(code("D-002"))]
    FileNotFound(Url),
    #[error("IO error: {0}")]
    #[diagnostic(code("D-003"))]
    Io(#[from] Arc<std::io::Error>),
    #[error("Failed to walk directory: {0}")]
    #[diagnostic(code("D-004"))]
    Walk(#[from] Arc<walkdir::Error>),
    #[error("Failed to serialize catalogue: {0}")]
    #[diagnostic(code("D-005"))]
    Json(#[from] Arc<serde_json::Error>),
}
