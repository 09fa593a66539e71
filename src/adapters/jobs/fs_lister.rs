use crate::ports::listing::{DirectoryLister, ListedEntry};
use std::io;
use std::path::Path;

/// Lists directories on the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLister;

impl FsLister {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for FsLister {
    fn list(&self, path: &Path) -> io::Result<Vec<ListedEntry>> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| -> io::Result<ListedEntry> {
                let entry = entry?;
                Ok(ListedEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_dir: entry.file_type()?.is_dir(),
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_lists_sorted_with_kinds() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("zeta")).unwrap();
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();
        fs::write(temp_dir.path().join("middle.txt"), "x").unwrap();

        let entries = FsLister::new().list(temp_dir.path()).unwrap();

        assert_eq!(
            entries,
            vec![
                ListedEntry::dir("alpha"),
                ListedEntry::file("middle.txt"),
                ListedEntry::dir("zeta"),
            ]
        );
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = tempdir().unwrap();
        assert!(FsLister::new().list(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = FsLister::new().list(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
