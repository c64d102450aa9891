pub use file_system::FileSystemSource;

use stubcat_ast::HashMap;
use url::Url;

use crate::result::DriverError;

/// Where stub text comes from. Sources are only ever read.
pub trait FileSource: Send + Sync {
    /// Read the contents of a file with the given URI
    fn read_to_string(&mut self, uri: &Url) -> Result<String, DriverError>;
}

mod file_system {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use super::*;

    /// A file source that reads from the file system
    pub struct FileSystemSource {
        root: PathBuf,
    }

    impl FileSystemSource {
        pub fn new<P: AsRef<Path>>(root: P) -> Self {
            Self { root: root.as_ref().to_path_buf() }
        }

        fn path(&self, uri: &Url) -> Result<PathBuf, DriverError> {
            let filepath =
                uri.to_file_path().map_err(|_| DriverError::InvalidUri(uri.clone()))?;
            Ok(self.root.join(filepath))
        }
    }

    impl FileSource for FileSystemSource {
        fn read_to_string(&mut self, uri: &Url) -> Result<String, DriverError> {
            let path = self.path(uri)?;
            if !path.exists() {
                return Err(DriverError::FileNotFound(uri.clone()));
            }
            let source =
                std::fs::read_to_string(&path).map_err(Arc::new).map_err(DriverError::Io)?;
            // Windows line endings (\r\n) must yield the same spans as on Unix.
            let source = source.replace("\r\n", "\n");
            Ok(source)
        }
    }
}

/// A file source that keeps files in memory
#[derive(Default)]
pub struct InMemorySource {
    files: HashMap<Url, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: Url, source: String) {
        self.files.insert(uri, source);
    }
}

impl FileSource for InMemorySource {
    fn read_to_string(&mut self, uri: &Url) -> Result<String, DriverError> {
        self.files.get(uri).cloned().ok_or_else(|| DriverError::FileNotFound(uri.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn file_system_normalizes_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("builtins.go");
        fs::write(&path, "type int int\r\ntype bool bool\r\n").unwrap();

        let uri = Url::from_file_path(&path).unwrap();
        let source = FileSystemSource::new("/").read_to_string(&uri).unwrap();
        assert_eq!(source, "type int int\ntype bool bool\n");

        let missing = Url::from_file_path(dir.path().join("missing.go")).unwrap();
        let err = FileSystemSource::new("/").read_to_string(&missing).unwrap_err();
        assert!(matches!(err, DriverError::FileNotFound(_)));
    }

    #[test]
    fn non_file_uri_is_invalid() {
        let uri = Url::parse("inmemory:///builtins.go").unwrap();
        let err = FileSystemSource::new("/").read_to_string(&uri).unwrap_err();
        assert!(matches!(err, DriverError::InvalidUri(_)));
    }

    #[test]
    fn in_memory() {
        let uri = Url::parse("inmemory:///builtins.go").unwrap();
        let mut files = InMemorySource::new();
        assert!(files.read_to_string(&uri).is_err());
        files.insert(uri.clone(), "type int int\n".to_owned());
        assert_eq!(files.read_to_string(&uri).unwrap(), "type int int\n");
    }
}
