use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

/// Errors of the command line interface that are not load errors of a stub.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum AppError {
    #[error("Cannot access {}", path.display())]
    #[diagnostic(code("A-001"))]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("{} cannot be turned into a file URI", path.display())]
    #[diagnostic(code("A-002"))]
    InvalidPath { path: PathBuf },
    #[error("No stub files found in {}", path.display())]
    #[diagnostic(code("A-003"))]
    NoStubs { path: PathBuf },
    #[error("{failed} of {total} stub file(s) failed to load")]
    #[diagnostic(code("A-004"))]
    CheckFailed { failed: usize, total: usize },
    #[error("Package {package} has no declaration named {name}")]
    #[diagnostic(code("A-005"))]
    NotFound { package: String, name: String },
    #[error("Package {package} has no methods on {receiver}")]
    #[diagnostic(code("A-006"), help("Methods are listed for declared types and interfaces"))]
    NoMethods { package: String, receiver: String },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        AppError::Io { path: path.into(), source: Arc::new(err) }
    }
}
