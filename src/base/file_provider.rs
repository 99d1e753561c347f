use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use super::Error;

/// A trait for providing file contents.
pub trait FileProvider {
    /// Reads the contents of the file at the given path as bytes.
    ///
    /// # Errors
    /// - If an error occurs while reading the file.
    /// - If the file does not exist.
    fn read_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Cow<[u8]>, Error>;

    /// Reads the contents of the file at the given path.
    ///
    /// # Errors
    /// - If an error occurs while reading the file.
    /// - If the file does not exist.
    /// - If the file is not valid UTF-8.
    fn read_str<P: AsRef<Path>>(&self, path: P) -> Result<Cow<str>, Error> {
        let bytes = self.read_bytes(path)?;
        let string = std::str::from_utf8(&bytes)?.to_string();
        Ok(Cow::Owned(string))
    }
}

/// Provides file contents from the file system.
#[cfg(feature = "fs_access")]
#[derive(Debug, Clone)]
pub struct FsProvider {
    /// The root directory to base paths off of.
    root: PathBuf,
}

#[cfg(feature = "fs_access")]
impl Default for FsProvider {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

#[cfg(feature = "fs_access")]
impl<P> From<P> for FsProvider
where
    P: Into<PathBuf>,
{
    fn from(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(feature = "fs_access")]
impl FileProvider for FsProvider {
    fn read_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Cow<[u8]>, Error> {
        let full_path = self.root.join(path);
        std::fs::read(full_path)
            .map(Cow::Owned)
            .map_err(|err| Error::IoError(err.to_string()))
    }
}

/// Provides file contents from an in-memory map of paths to sources.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl MemoryProvider {
    /// Creates an empty [`MemoryProvider`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given contents, replacing any previous file at that path.
    pub fn add_file<P: Into<PathBuf>, S: Into<String>>(&mut self, path: P, content: S) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileProvider for MemoryProvider {
    fn read_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Cow<[u8]>, Error> {
        self.files
            .get(path.as_ref())
            .map(|content| Cow::Borrowed(content.as_bytes()))
            .ok_or_else(|| Error::IoError("File not found".to_string()))
    }

    fn read_str<P: AsRef<Path>>(&self, path: P) -> Result<Cow<str>, Error> {
        self.files
            .get(path.as_ref())
            .map(|content| Cow::Borrowed(content.as_str()))
            .ok_or_else(|| Error::IoError("File not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider() {
        let mut provider = MemoryProvider::new();
        provider.add_file("main.ocls", "let x = 1;");
        provider.add_file("lib/util.ocls", "var y = 2;");

        assert_eq!(
            provider.read_str("main.ocls").unwrap().into_owned(),
            "let x = 1;".to_string()
        );
        assert_eq!(
            provider.read_bytes("lib/util.ocls").unwrap().into_owned(),
            b"var y = 2;".to_vec()
        );
        assert!(matches!(
            provider.read_str("nonexistent.ocls"),
            Err(Error::IoError(_))
        ));
    }

    struct BytesProvider(Vec<u8>);

    impl FileProvider for BytesProvider {
        fn read_bytes<P: AsRef<Path>>(&self, _path: P) -> Result<Cow<[u8]>, Error> {
            Ok(Cow::Borrowed(&self.0))
        }
    }

    #[test]
    fn test_invalid_utf8_is_reported() {
        let provider = BytesProvider(vec![b'l', b'e', b't', 0xff]);
        assert!(matches!(
            provider.read_str("main.ocls"),
            Err(Error::Utf8Error(_))
        ));

        let provider = BytesProvider(b"let x = 1;".to_vec());
        assert_eq!(provider.read_str("main.ocls").unwrap(), "let x = 1;");
    }
}
