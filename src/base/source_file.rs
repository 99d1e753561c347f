//! Module for handling source files and locations within them.

use std::{
    fmt::{Debug, Display},
    path::{Path, PathBuf},
    sync::Arc,
};

use getset::Getters;
use path_absolutize::Absolutize as _;

use super::{file_provider::FileProvider, Error};

/// Represents a source file that contains `OcellusScript` source code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Getters)]
pub struct SourceFile {
    /// Get the path of the source file.
    #[get = "pub"]
    path: PathBuf,
    /// Get the identifier of the source file.
    #[get = "pub"]
    identifier: String,
    /// Get the content of the source file
    #[get = "pub"]
    content: String,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("identifier", &self.identifier)
            .field("length", &self.content.len())
            .finish()
    }
}

impl SourceFile {
    /// Creates a source file that lives only in memory.
    #[must_use]
    pub fn new(path: PathBuf, identifier: String, content: String) -> Arc<Self> {
        Arc::new(Self {
            path,
            identifier,
            content,
        })
    }

    /// Load the source file from the given file path.
    ///
    /// The identifier of the source file is the file name without its extension. The stored path
    /// is absolute when it can be resolved.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when reading the file contents.
    pub fn load(path: &Path, provider: &impl FileProvider) -> Result<Arc<Self>, Error> {
        let source = provider.read_str(path)?;
        let identifier = path
            .file_stem()
            .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned());

        let path = path
            .absolutize()
            .map_or_else(|_| path.to_path_buf(), |absolute| absolute.into_owned());

        Ok(Self::new(
            path,
            identifier,
            source.into_owned(),
        ))
    }

    /// Get the relative path of the source file from the current working directory.
    #[must_use]
    pub fn path_relative(&self) -> Option<PathBuf> {
        pathdiff::diff_paths(&self.path, std::env::current_dir().ok()?)
    }
}

/// Pointing to a particular location in a source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// Line number of the location (starts at 1).
    pub line: usize,

    /// Column number of the location (starts at 1).
    pub column: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::MemoryProvider;

    #[test]
    fn test_load() {
        let mut provider = MemoryProvider::new();
        provider.add_file("shapes/circle.ocls", "let r = 1.0;");

        let file = SourceFile::load(Path::new("shapes/circle.ocls"), &provider).unwrap();
        assert_eq!(file.identifier(), "circle");
        assert_eq!(file.content(), "let r = 1.0;");
        assert!(file.path().is_absolute());
        assert!(file.path().ends_with("shapes/circle.ocls"));

        assert!(SourceFile::load(Path::new("missing.ocls"), &provider).is_err());
    }
}
