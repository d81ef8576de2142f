mod types;

pub use types::{IdentifierCollision, ScanIndex};

use crate::utils::{list_subdirectories, MODS_FOLDER};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    PathNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Walk `<root>/<identifier>/mods/<mod_name>` and index every mod folder
/// by the identifier folder it lives under.
///
/// Identifier folders are visited in sorted order, so when a mod name shows
/// up more than once the lexicographically greatest identifier wins.
pub async fn scan_source(root: &Path) -> Result<ScanIndex, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::PathNotFound(root.display().to_string()));
    }

    let mut index = ScanIndex::new();

    for identifier in list_subdirectories(root).await? {
        let mods_path = root.join(&identifier).join(MODS_FOLDER);
        if !mods_path.is_dir() {
            debug!(identifier = %identifier, "No mods folder, skipping");
            continue;
        }

        for mod_name in list_subdirectories(&mods_path).await? {
            index.register(&mod_name, &identifier);
        }
    }

    for collision in index.collisions() {
        warn!(
            mod_name = %collision.mod_name,
            kept = %collision.kept,
            discarded = %collision.discarded,
            "Mod found under more than one identifier"
        );
    }

    info!(
        root = %root.display(),
        mods = index.len(),
        "Scanned source directory"
    );
    Ok(index)
}
