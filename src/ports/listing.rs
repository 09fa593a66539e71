use std::io;
use std::path::Path;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ListedEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait DirectoryLister: Send + Sync {
    /// List the entries of `path`, sorted by name.
    fn list(&self, path: &Path) -> io::Result<Vec<ListedEntry>>;
}
