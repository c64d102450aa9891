use std::path::Path;

use url::Url;

use stubcat_driver::{FileSystemSource, LoadFailure, Served};

use crate::result::AppError;

/// The `file://` URI of a path given on the command line.
pub fn stub_uri(path: &Path) -> Result<Url, AppError> {
    let absolute = std::path::absolute(path).map_err(|err| AppError::io(path, err))?;
    Url::from_file_path(&absolute).map_err(|_| AppError::InvalidPath { path: path.to_path_buf() })
}

/// URIs are absolute, so the file system source needs no root of its own.
pub fn file_source() -> FileSystemSource {
    FileSystemSource::new("/")
}

/// Load, validate and serve the stub at `path`.
pub fn load_stub(path: &Path) -> miette::Result<Served> {
    let uri = stub_uri(path)?;
    log::debug!("Loading {}", path.display());
    stubcat_driver::load_from(&mut file_source(), &uri).map_err(LoadFailure::into_report)
}
