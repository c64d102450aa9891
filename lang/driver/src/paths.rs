use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use crate::result::DriverError;

/// File extension of stub files
pub const STUB_EXTENSION: &str = "go";

/// The stub files below `dir`, sorted by path.
///
/// If `dir` is a file, it is returned as the only stub regardless of its extension.
pub fn find_stubs(dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    if dir.is_file() {
        return Ok(vec![dir.to_path_buf()]);
    }
    let mut stubs = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(Arc::new)?;
        let is_stub = entry.path().extension().is_some_and(|ext| ext == STUB_EXTENSION);
        if entry.file_type().is_file() && is_stub {
            stubs.push(entry.into_path());
        }
    }
    log::debug!("Found {} stub file(s) in {}", stubs.len(), dir.display());
    Ok(stubs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn finds_nested_stubs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("net")).unwrap();
        fs::write(dir.path().join("builtins.go"), "").unwrap();
        fs::write(dir.path().join("net").join("http.go"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let stubs = find_stubs(dir.path()).unwrap();
        let names: Vec<_> =
            stubs.iter().map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf()).collect();
        assert_eq!(names, vec![PathBuf::from("builtins.go"), PathBuf::from("net/http.go")]);
    }

    #[test]
    fn single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("stub.txt");
        fs::write(&file, "").unwrap();
        assert_eq!(find_stubs(&file).unwrap(), vec![file]);
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(find_stubs(&dir.path().join("nope")), Err(DriverError::Walk(_))));
    }
}
