mod types;

pub use types::ModManifest;

use crate::utils::{get_manifest_path, list_subdirectories};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a manifest file. A missing file yields an empty manifest;
/// malformed JSON is an error.
pub async fn load_manifest(path: &Path) -> Result<ModManifest, ManifestError> {
    if !path.exists() {
        debug!(path = %path.display(), "No manifest on disk, starting empty");
        return Ok(ModManifest::new());
    }

    let content = fs::read_to_string(path).await?;
    let mut manifest: ModManifest = serde_json::from_str(&content)?;
    manifest.sync_count();
    Ok(manifest)
}

/// Write a manifest file, overwriting whatever is there
pub async fn save_manifest(path: &Path, manifest: &ModManifest) -> Result<(), ManifestError> {
    let mut manifest = manifest.clone();
    manifest.sync_count();

    let content = serde_json::to_string_pretty(&manifest)?;
    fs::write(path, content).await?;
    info!(
        path = %path.display(),
        mods = manifest.mods_count,
        "Manifest written"
    );
    Ok(())
}

/// Read the manifest kept in a destination directory
pub async fn read_manifest(destination: &Path) -> Result<ModManifest, ManifestError> {
    load_manifest(&get_manifest_path(destination)).await
}

/// Write the manifest kept in a destination directory
pub async fn write_manifest(
    destination: &Path,
    manifest: &ModManifest,
) -> Result<(), ManifestError> {
    save_manifest(&get_manifest_path(destination), manifest).await
}

/// Add every mod folder already present in `destination` that the manifest
/// does not know about, with an empty identifier. Known identifiers are kept.
/// Returns the names that were added.
pub async fn merge_existing(
    destination: &Path,
    manifest: &mut ModManifest,
) -> Result<Vec<String>, ManifestError> {
    let mut added = Vec::new();

    for name in list_subdirectories(destination).await? {
        if manifest.insert_if_absent(&name) {
            added.push(name);
        }
    }

    if !added.is_empty() {
        debug!(count = added.len(), "Merged untracked mod folders into manifest");
    }
    Ok(added)
}
