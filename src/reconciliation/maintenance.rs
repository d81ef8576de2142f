use super::types::RemovalResult;
use super::ReconcileError;
use crate::manifest::{merge_existing, read_manifest, write_manifest, ModManifest};
use crate::scanner::ScanIndex;
use crate::utils::{list_subdirectories, remove_existing};
use std::path::{Component, Path};
use tracing::info;

/// Rebuild the destination manifest from scratch: one entry per mod folder
/// in `destination`, with the identifier from `index` or `""` when the mod
/// is not in the source tree.
pub async fn regenerate_manifest(
    destination: &Path,
    index: &ScanIndex,
) -> Result<ModManifest, ReconcileError> {
    ensure_destination(destination)?;

    let manifest: ModManifest = list_subdirectories(destination)
        .await?
        .into_iter()
        .map(|name| {
            let identifier = index.get(&name).unwrap_or_default().to_string();
            (name, identifier)
        })
        .collect();

    write_manifest(destination, &manifest).await?;
    Ok(manifest)
}

/// Delete mod folders from `destination` and drop them from its manifest
pub async fn remove_mods<S: AsRef<str>>(
    destination: &Path,
    mod_names: &[S],
) -> Result<RemovalResult, ReconcileError> {
    ensure_destination(destination)?;

    if let Some(bad) = mod_names
        .iter()
        .map(AsRef::as_ref)
        .find(|name| !is_plain_name(name))
    {
        return Err(ReconcileError::InvalidModName(bad.to_string()));
    }

    let mut manifest = read_manifest(destination).await?;
    let mut result = RemovalResult::default();

    for name in mod_names.iter().map(AsRef::as_ref) {
        let deleted = remove_existing(&destination.join(name)).await?;
        let forgotten = manifest.remove(name).is_some();

        if deleted || forgotten {
            info!(mod_name = %name, "Removed mod");
            result.removed.push(name.to_string());
        } else {
            result.not_found.push(name.to_string());
        }
    }

    write_manifest(destination, &manifest).await?;
    result.manifest = manifest;
    Ok(result)
}

/// The destination manifest, including mod folders it does not track yet.
/// Nothing is written.
pub async fn installed_mods(destination: &Path) -> Result<ModManifest, ReconcileError> {
    ensure_destination(destination)?;

    let mut manifest = read_manifest(destination).await?;
    merge_existing(destination, &mut manifest).await?;
    Ok(manifest)
}

fn ensure_destination(destination: &Path) -> Result<(), ReconcileError> {
    if destination.is_dir() {
        Ok(())
    } else {
        Err(ReconcileError::PathNotFound(destination.display().to_string()))
    }
}

/// A single normal path component, so joining it cannot escape the destination
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
