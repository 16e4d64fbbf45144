//! [`TestBuildDir`] for on-disk build file scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tsvs_fs::NormalizedPath;

/// A temporary directory standing in for the folder that holds a build file.
pub struct TestBuildDir {
    temp_dir: TempDir,
}

impl Default for TestBuildDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuildDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root as a [`NormalizedPath`], ready to use as a resolver base.
    pub fn base(&self) -> NormalizedPath {
        NormalizedPath::new(self.root())
    }

    /// Normalized path of `relative` under the root.
    pub fn path(&self, relative: &str) -> NormalizedPath {
        self.base().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> NormalizedPath {
        let full = self.root().join(relative);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
        self.path(relative)
    }
}
