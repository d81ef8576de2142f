mod fs;

pub use fs::{
    copy_dir_all, list_subdirectories, move_dir, paths_overlap, remove_existing, resolve_path,
};

use std::path::{Path, PathBuf};

/// The name of the manifest file kept in the destination directory
pub const MANIFEST_FILE: &str = "mods_info.json";

/// The folder inside each workshop item that holds its mods
pub const MODS_FOLDER: &str = "mods";

/// Get the path to the manifest file of a destination directory
pub fn get_manifest_path(destination: &Path) -> PathBuf {
    destination.join(MANIFEST_FILE)
}

/// Get the folder of a mod inside the source tree: `<source>/<identifier>/mods/<mod_name>`
pub fn get_source_mod_path(source: &Path, identifier: &str, mod_name: &str) -> PathBuf {
    source.join(identifier).join(MODS_FOLDER).join(mod_name)
}
