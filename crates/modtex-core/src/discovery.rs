//! File discovery for the batch tools.
//!
//! The scanner looks at the mods directory itself (archives are never
//! nested), while the darkeners walk the whole tree. Both share the same
//! extension matching and deterministic ordering.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Discovers candidate files under a directory.
pub struct FileDiscovery {
    extensions: Vec<String>,
    max_depth: Option<usize>,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileDiscovery {
    /// Discovery over a full directory tree.
    pub fn recursive(extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            extensions: extensions.into_iter().collect(),
            max_depth: None,
        }
    }

    /// Discovery limited to a directory's immediate children.
    pub fn flat(extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            extensions: extensions.into_iter().collect(),
            max_depth: Some(1),
        }
    }

    /// Discover all matching files at a path.
    ///
    /// If path is a file, returns it if it matches.
    /// If path is a directory, finds matching files within the configured
    /// depth. Unreadable entries are skipped, never fatal.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredFile> {
        if path.is_file() {
            if self.is_supported(path) {
                if let Ok(meta) = std::fs::metadata(path) {
                    return vec![DiscoveredFile {
                        path: path.to_path_buf(),
                        size: meta.len(),
                    }];
                }
            }
            return vec![];
        }

        let mut walker = WalkDir::new(path).follow_links(true);
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            let entry_path = entry.path();
            if entry_path.is_file() && self.is_supported(entry_path) {
                if let Ok(meta) = entry.metadata() {
                    files.push(DiscoveredFile {
                        path: entry_path.to_path_buf(),
                        size: meta.len(),
                    });
                }
            }
        }

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    /// Check if a file has a supported extension (case-insensitive).
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|want| want.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_discovery() -> FileDiscovery {
        FileDiscovery::recursive(["png".to_string()])
    }

    #[test]
    fn test_is_supported_case_insensitive() {
        let discovery = png_discovery();
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(discovery.is_supported(Path::new("test.PNG")));
        assert!(!discovery.is_supported(Path::new("test.jpg")));
        assert!(!discovery.is_supported(Path::new("noextension")));
    }

    #[test]
    fn test_recursive_discovery_finds_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("top.png"), b"x").unwrap();
        std::fs::write(nested.join("deep.png"), b"x").unwrap();
        std::fs::write(nested.join("other.txt"), b"x").unwrap();

        let files = png_discovery().discover(dir.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_flat_discovery_ignores_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("top.jar"), b"x").unwrap();
        std::fs::write(nested.join("deep.jar"), b"x").unwrap();

        let discovery = FileDiscovery::flat(["jar".to_string()]);
        let files = discovery.discover(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("top.jar"));
    }

    #[test]
    fn test_discovery_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("c.png"), b"x").unwrap();

        let files = png_discovery().discover(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_single_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.png");
        std::fs::write(&path, b"x").unwrap();

        let files = png_discovery().discover(&path);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 1);
    }
}
