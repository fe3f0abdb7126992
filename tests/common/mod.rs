#![allow(dead_code)]

use std::error::Error;
use std::fs;
use std::path::Path;

pub use treewatch_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn Error>>;

/// Create `files` (relative path, contents) under `root`, making parent
/// directories as needed.
pub fn write_tree<C: AsRef<[u8]>>(root: &Path, files: &[(&str, C)]) -> std::io::Result<()> {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }
    Ok(())
}
