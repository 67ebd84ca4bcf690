//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! This module provides `MockFs` which simulates a filesystem in memory,
//! allowing tests to run on any platform without Linux.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// various `/proc` and `/sys` states without needing actual Linux access.
/// Every access is counted so tests can assert that nothing was read.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
    /// Number of trait calls made so far (shared between clones).
    accesses: Arc<AtomicUsize>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.add_parents(&path);
        self.directories.insert(path);
    }

    /// Adds a network interface under `/sys/class/net/<name>/`.
    ///
    /// # Arguments
    /// * `name` - Interface name (`eth0`, `wlan0`, ...)
    /// * `address` - Content of the `address` file (hardware address)
    pub fn add_interface(&mut self, name: &str, address: &str) {
        let base = PathBuf::from(format!("/sys/class/net/{}", name));
        self.add_dir(&base);
        self.add_file(base.join("address"), format!("{}\n", address));
    }

    /// Number of filesystem calls made through the `FileSystem` trait.
    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::Relaxed)
    }

    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::Relaxed);
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.touch();
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.touch();
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();

        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }

        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }

        let mut entries: Vec<PathBuf> = entries.into_iter().collect();
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/cpuinfo", "model name\t: Test CPU\n");

        let entries = fs.read_dir(Path::new("/proc")).unwrap();
        assert_eq!(entries, vec![PathBuf::from("/proc/cpuinfo")]);

        let content = fs.read_to_string(Path::new("/proc/cpuinfo")).unwrap();
        assert_eq!(content, "model name\t: Test CPU\n");
    }

    #[test]
    fn test_mock_fs_read_dir_sorted() {
        let mut fs = MockFs::new();
        fs.add_interface("wlan0", "aa:bb:cc:dd:ee:02");
        fs.add_interface("eth0", "aa:bb:cc:dd:ee:01");
        fs.add_interface("lo", "00:00:00:00:00:00");

        let entries = fs.read_dir(Path::new("/sys/class/net")).unwrap();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/sys/class/net/eth0"),
                PathBuf::from("/sys/class/net/lo"),
                PathBuf::from("/sys/class/net/wlan0"),
            ]
        );
    }

    #[test]
    fn test_mock_fs_counts_accesses_across_clones() {
        let fs = MockFs::new();
        let clone = fs.clone();
        assert_eq!(fs.accesses(), 0);

        let _ = clone.read_dir(Path::new("/proc"));
        let _ = clone.read_to_string(Path::new("/proc/uptime"));
        assert_eq!(fs.accesses(), 2);
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
