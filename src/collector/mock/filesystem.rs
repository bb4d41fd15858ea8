//! In-memory filesystem for exercising the `/proc` and `/sys` readers
//! without a Linux host.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content. Parent directories are created.
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

    /// Adds a battery under `/sys/class/power_supply/<name>`.
    pub fn add_battery(&mut self, name: &str, capacity: u32, status: &str) {
        let base = PathBuf::from(format!("/sys/class/power_supply/{}", name));
        self.add_file(base.join("type"), "Battery\n");
        self.add_file(base.join("capacity"), format!("{}\n", capacity));
        self.add_file(base.join("status"), format!("{}\n", status));
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
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let is_child = |p: &PathBuf| p.parent().is_some_and(|parent| parent == path);
        let entries: HashSet<PathBuf> = self
            .files
            .keys()
            .chain(self.directories.iter())
            .filter(|p| is_child(p) && p.as_path() != path)
            .cloned()
            .collect();
        Ok(entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 16384 kB\n");

        assert!(fs.exists(Path::new("/proc/meminfo")));
        assert!(fs.exists(Path::new("/proc")));
        let content = fs.read_to_string(Path::new("/proc/meminfo")).unwrap();
        assert_eq!(content, "MemTotal: 16384 kB\n");
    }

    #[test]
    fn test_mock_fs_read_dir() {
        let mut fs = MockFs::new();
        fs.add_battery("BAT0", 50, "Full");
        fs.add_dir("/sys/class/power_supply/AC");

        let supplies = fs.read_dir(Path::new("/sys/class/power_supply")).unwrap();
        assert_eq!(supplies.len(), 2);
        let bat = fs.read_dir(Path::new("/sys/class/power_supply/BAT0")).unwrap();
        assert_eq!(bat.len(), 3);
    }

    #[test]
    fn test_mock_fs_missing() {
        let fs = MockFs::new();
        assert!(fs.read_to_string(Path::new("/proc/stat")).is_err());
        assert!(fs.read_dir(Path::new("/proc")).is_err());
    }
}
