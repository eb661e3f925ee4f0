//! Recursive recording file discovery.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lazy walk over recording files below a root directory.
///
/// Yields paths depth-first, siblings sorted by file name. Entries that cannot be read are logged
/// and skipped; symlinks are not followed.
pub struct FileDiscovery {
    walker: walkdir::IntoIter,
    extension: String,
}

impl FileDiscovery {
    /// Start discovering files with `extension` (no leading dot) under `root`.
    ///
    /// Fails if `root` is missing or not a directory; nothing is read yet.
    pub fn new(root: &Path, extension: &str) -> Result<Self> {
        if !root.exists() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(Error::RootNotDirectory {
                path: root.to_path_buf(),
            });
        }

        Ok(Self {
            walker: WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
            extension: extension.to_string(),
        })
    }
}

impl Iterator for FileDiscovery {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file()
                        && has_extension(entry.path(), &self.extension)
                    {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => warn!("Error accessing entry: {}", e),
            }
        }
    }
}

/// Check a file extension, ignoring ASCII case.
fn has_extension(path: &Path, extension: &str) -> bool {
    // Compare as OsStr to handle non-UTF-8 filenames
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(extension)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("rec.edf"), "edf"));
        assert!(has_extension(Path::new("REC.EDF"), "edf"));
        assert!(has_extension(Path::new("äänitys.edf"), "edf"));
        assert!(!has_extension(Path::new("rec.edf.bak"), "edf"));
        assert!(!has_extension(Path::new("edf"), "edf"));
    }

    #[test]
    fn test_discovers_root_and_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("p01/day1")).unwrap();
        fs::create_dir_all(dir.path().join("p02")).unwrap();
        fs::write(dir.path().join("top.edf"), b"").unwrap();
        fs::write(dir.path().join("p01/day1/a.edf"), b"").unwrap();
        fs::write(dir.path().join("p02/b.EDF"), b"").unwrap();
        fs::write(dir.path().join("p02/notes.txt"), b"").unwrap();

        let found: BTreeSet<PathBuf> = FileDiscovery::new(dir.path(), "edf").unwrap().collect();

        let expected: BTreeSet<PathBuf> = [
            dir.path().join("top.edf"),
            dir.path().join("p01/day1/a.edf"),
            dir.path().join("p02/b.EDF"),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_directory_named_like_recording_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("odd.edf")).unwrap();

        assert_eq!(FileDiscovery::new(dir.path(), "edf").unwrap().count(), 0);
    }

    #[test]
    fn test_missing_root_is_error() {
        let result = FileDiscovery::new(Path::new("/nonexistent/edf/root"), "edf");
        assert!(matches!(result, Err(Error::RootNotFound { .. })));
    }

    #[test]
    fn test_file_root_is_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.edf");
        fs::write(&file, b"").unwrap();

        let result = FileDiscovery::new(&file, "edf");
        assert!(matches!(result, Err(Error::RootNotDirectory { .. })));
    }

    #[test]
    fn test_siblings_are_yielded_in_name_order() {
        let dir = TempDir::new().unwrap();
        for name in ["c.edf", "a.edf", "b.edf"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let names: Vec<String> = FileDiscovery::new(dir.path(), "edf")
            .unwrap()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.edf", "b.edf", "c.edf"]);
    }
}
