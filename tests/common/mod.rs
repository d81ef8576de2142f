#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create `<root>/<identifier>/mods/<mod_name>` with a mod.info file inside
pub fn add_source_mod(root: &Path, identifier: &str, mod_name: &str) -> PathBuf {
    let path = root.join(identifier).join("mods").join(mod_name);
    fs::create_dir_all(path.join("media")).expect("Failed to create mod folder");
    fs::write(path.join("mod.info"), format!("name={}\nid={}", mod_name, identifier))
        .expect("Failed to write mod.info");
    fs::write(path.join("media").join("data.txt"), identifier)
        .expect("Failed to write mod data");
    path
}

/// The two-item workshop tree used across tests:
/// `100/mods/ModA` and `200/mods/ModB`
pub fn create_source_tree() -> TempDir {
    let dir = create_test_dir();
    add_source_mod(dir.path(), "100", "ModA");
    add_source_mod(dir.path(), "200", "ModB");
    dir
}

/// Write a raw manifest file
pub fn write_manifest_json(path: &Path, json: &str) {
    fs::write(path, json).expect("Failed to write manifest");
}

/// Sorted names of the subdirectories of `path`
pub fn dir_names(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(path)
        .expect("Failed to read dir")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
