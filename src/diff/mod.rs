//! Compare two manifests by mod name.

use crate::manifest::{load_manifest, ModManifest};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Manifest not found at {0}")]
    ManifestNotFound(String),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] crate::manifest::ManifestError),
}

/// A mod present on one side only, with the identifier recorded on that side
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiffEntry {
    pub mod_name: String,
    pub identifier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDiff {
    /// In the remote manifest but not the local one
    pub missing_on_local: Vec<DiffEntry>,
    /// In the local manifest but not the remote one
    pub missing_on_remote: Vec<DiffEntry>,
}

impl ManifestDiff {
    pub fn is_identical(&self) -> bool {
        self.missing_on_local.is_empty() && self.missing_on_remote.is_empty()
    }

    /// Identifiers to fetch so the local side catches up with the remote
    pub fn missing_on_local_identifiers(&self) -> Vec<String> {
        export_identifiers(&self.missing_on_local)
    }

    /// Identifiers to fetch so the remote side catches up with the local
    pub fn missing_on_remote_identifiers(&self) -> Vec<String> {
        export_identifiers(&self.missing_on_remote)
    }

    pub fn render_report(&self) -> String {
        let mut report = String::new();

        if self.is_identical() {
            report.push_str("Both manifests list the same mods.\n");
            return report;
        }

        for (title, entries) in [
            ("Missing locally", &self.missing_on_local),
            ("Missing remotely", &self.missing_on_remote),
        ] {
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(report, "{} ({}):", title, entries.len());
            for entry in entries {
                let id = if entry.identifier.is_empty() {
                    "unknown"
                } else {
                    entry.identifier.as_str()
                };
                let _ = writeln!(report, "- {} (ID: {})", entry.mod_name, id);
            }
            report.push('\n');
        }

        report
    }
}

/// Mods present on only one side. Neither manifest is modified.
pub fn diff_manifests(local: &ModManifest, remote: &ModManifest) -> ManifestDiff {
    ManifestDiff {
        missing_on_local: only_in(remote, local),
        missing_on_remote: only_in(local, remote),
    }
}

/// Load two manifest files and diff them. Both files must exist.
pub async fn compare_manifest_files(
    local_path: &Path,
    remote_path: &Path,
) -> Result<ManifestDiff, DiffError> {
    for path in [local_path, remote_path] {
        if !path.is_file() {
            return Err(DiffError::ManifestNotFound(path.display().to_string()));
        }
    }

    let local = load_manifest(local_path).await?;
    let remote = load_manifest(remote_path).await?;
    Ok(diff_manifests(&local, &remote))
}

/// Entries of `side` whose name is absent from `other`, sorted by name
fn only_in(side: &ModManifest, other: &ModManifest) -> Vec<DiffEntry> {
    side.mods
        .iter()
        .filter(|(name, _)| !other.contains(name))
        .map(|(name, identifier)| DiffEntry {
            mod_name: name.clone(),
            identifier: identifier.clone(),
        })
        .collect()
}

/// Non-empty identifiers, first occurrence kept
fn export_identifiers(entries: &[DiffEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .map(|e| e.identifier.as_str())
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .map(str::to_string)
        .collect()
}
