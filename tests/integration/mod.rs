// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary description and table files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a description file, one paragraph per line
    pub fn create_descriptions_file<P: AsRef<Path>>(&self, relative_path: P, descriptions: &[&str]) -> PathBuf {
        let mut content = descriptions.join("\n");
        content.push('\n');
        self.create_file(relative_path, &content)
    }

    /// Create an abbreviation table file from TOML source
    pub fn create_table_file<P: AsRef<Path>>(&self, relative_path: P, toml: &str) -> PathBuf {
        self.create_file(relative_path, toml)
    }

    fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        // Create parent directories if needed
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}
