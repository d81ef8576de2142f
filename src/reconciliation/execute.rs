use super::plan::{plan_all, plan_by_identifiers, plan_selected, TransferPlan};
use super::types::{
    ReconcileOptions, ReconciliationResult, TransferAction, TransferProgress, TransferredMod,
};
use super::ReconcileError;
use crate::config::CollisionPolicy;
use crate::manifest::{merge_existing, read_manifest, write_manifest};
use crate::scanner::ScanIndex;
use crate::utils::{copy_dir_all, move_dir, paths_overlap, remove_existing};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Copy or move the selected mods from `source` into `destination` and
/// record them in the destination manifest.
///
/// Names not present in the source tree are skipped and returned in
/// `missing`; they do not fail the run.
pub async fn reconcile_selected<S: AsRef<str>>(
    source: &Path,
    destination: &Path,
    index: &ScanIndex,
    mod_names: &[S],
    action: TransferAction,
    options: ReconcileOptions<'_>,
) -> Result<ReconciliationResult, ReconcileError> {
    ensure_source(source)?;
    let plan = plan_selected(source, destination, index, mod_names);
    execute_plan(destination, index, plan, action, options).await
}

/// Copy or move every mod matched by a list of identifiers (or mod names).
/// Tokens that match nothing come back in `missing`, ready to be exported
/// with [`crate::idlist::write_identifier_list`].
pub async fn reconcile_by_identifiers<S: AsRef<str>>(
    source: &Path,
    destination: &Path,
    index: &ScanIndex,
    identifiers: &[S],
    action: TransferAction,
    options: ReconcileOptions<'_>,
) -> Result<ReconciliationResult, ReconcileError> {
    ensure_source(source)?;
    let plan = plan_by_identifiers(source, destination, index, identifiers);
    execute_plan(destination, index, plan, action, options).await
}

/// Move every indexed mod from `source` to `destination` in one pass
pub async fn move_all(
    source: &Path,
    destination: &Path,
    index: &ScanIndex,
    options: ReconcileOptions<'_>,
) -> Result<ReconciliationResult, ReconcileError> {
    ensure_source(source)?;
    let plan = plan_all(source, destination, index);
    execute_plan(destination, index, plan, TransferAction::Move, options).await
}

fn ensure_source(source: &Path) -> Result<(), ReconcileError> {
    if !source.is_dir() {
        return Err(ReconcileError::PathNotFound(source.display().to_string()));
    }
    Ok(())
}

/// Run a plan: overwrite each destination folder, update and persist the manifest.
/// The destination is created if missing.
///
/// Nothing is touched when a planned source and destination folder overlap.
/// A source folder that disappeared after planning is skipped and reported in
/// `missing`, leaving the installed copy alone.
pub async fn execute_plan(
    destination: &Path,
    index: &ScanIndex,
    plan: TransferPlan,
    action: TransferAction,
    mut options: ReconcileOptions<'_>,
) -> Result<ReconciliationResult, ReconcileError> {
    if options.collision_policy == CollisionPolicy::Reject {
        for transfer in &plan.transfers {
            if let Some(collision) = index.collision_for(&transfer.mod_name) {
                return Err(ReconcileError::IdentifierCollision {
                    mod_name: collision.mod_name.clone(),
                    kept: collision.kept.clone(),
                    discarded: collision.discarded.clone(),
                });
            }
        }
    }

    for transfer in &plan.transfers {
        if paths_overlap(&transfer.source_path, &transfer.destination_path).await? {
            return Err(ReconcileError::OverlappingPaths {
                source_path: transfer.source_path.display().to_string(),
                destination: transfer.destination_path.display().to_string(),
            });
        }
    }

    if !destination.exists() {
        fs::create_dir_all(destination).await?;
        info!(path = %destination.display(), "Created destination directory");
    }

    let mut manifest = read_manifest(destination).await?;
    merge_existing(destination, &mut manifest).await?;

    let TransferPlan {
        transfers,
        mut missing,
    } = plan;
    for name in &missing {
        warn!(item = %name, "Not found in source directory, skipping");
    }

    let total = transfers.len();
    let mut transferred = Vec::with_capacity(total);
    let mut replaced = Vec::new();

    for transfer in transfers {
        if !transfer.source_path.is_dir() {
            warn!(
                mod_name = %transfer.mod_name,
                path = %transfer.source_path.display(),
                "Source folder disappeared, skipping"
            );
            missing.push(transfer.mod_name);
            continue;
        }

        if remove_existing(&transfer.destination_path).await? {
            replaced.push(transfer.mod_name.clone());
        }

        match action {
            TransferAction::Copy => {
                copy_dir_all(&transfer.source_path, &transfer.destination_path).await?;
            }
            TransferAction::Move => {
                move_dir(&transfer.source_path, &transfer.destination_path).await?;
            }
        }

        info!(
            mod_name = %transfer.mod_name,
            identifier = %transfer.identifier,
            action = %action,
            "Transferred mod"
        );

        manifest.insert(transfer.mod_name.clone(), transfer.identifier.clone());
        options.report(TransferProgress {
            done: transferred.len() + 1,
            total,
            mod_name: transfer.mod_name.clone(),
        });
        transferred.push(TransferredMod {
            mod_name: transfer.mod_name,
            identifier: transfer.identifier,
        });
    }

    write_manifest(destination, &manifest).await?;

    Ok(ReconciliationResult {
        action,
        destination: destination.to_path_buf(),
        transferred,
        replaced,
        missing,
        manifest,
    })
}
