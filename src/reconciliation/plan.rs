use crate::scanner::ScanIndex;
use crate::utils::get_source_mod_path;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One mod folder to transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTransfer {
    pub mod_name: String,
    pub identifier: String,
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
}

/// What a transfer run is going to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferPlan {
    pub transfers: Vec<PlannedTransfer>,
    /// Requested names or identifiers with no folder to transfer
    pub missing: Vec<String>,
}

impl TransferPlan {
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    fn push(&mut self, source: &Path, destination: &Path, mod_name: &str, identifier: &str) {
        self.transfers.push(PlannedTransfer {
            mod_name: mod_name.to_string(),
            identifier: identifier.to_string(),
            source_path: get_source_mod_path(source, identifier, mod_name),
            destination_path: destination.join(mod_name),
        });
    }
}

fn source_folder_exists(source: &Path, identifier: &str, mod_name: &str) -> bool {
    get_source_mod_path(source, identifier, mod_name).is_dir()
}

/// Plan the transfer of a selection of mod names.
///
/// Names that are not indexed, or whose folder has vanished since the scan,
/// end up in `missing`. Repeated names are planned once.
pub fn plan_selected<S: AsRef<str>>(
    source: &Path,
    destination: &Path,
    index: &ScanIndex,
    mod_names: &[S],
) -> TransferPlan {
    let mut plan = TransferPlan::default();
    let mut seen = HashSet::new();

    for mod_name in mod_names.iter().map(AsRef::as_ref) {
        if !seen.insert(mod_name) {
            continue;
        }

        match index.get(mod_name) {
            Some(identifier) if source_folder_exists(source, identifier, mod_name) => {
                plan.push(source, destination, mod_name, identifier);
            }
            _ => plan.missing.push(mod_name.to_string()),
        }
    }

    plan
}

/// Plan the transfer of every mod matching a list of tokens.
///
/// A token first selects every mod found under the identifier folder of that
/// name, even mods whose name is indexed under another identifier; failing
/// that, a mod whose own name equals the token. A mod is planned once, from
/// the first token that selects it. Tokens that select nothing are reported
/// in `missing`, in order of first appearance.
pub fn plan_by_identifiers<S: AsRef<str>>(
    source: &Path,
    destination: &Path,
    index: &ScanIndex,
    tokens: &[S],
) -> TransferPlan {
    let mut plan = TransferPlan::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected: HashSet<&str> = HashSet::new();

    for token in tokens.iter().map(AsRef::as_ref) {
        if !seen.insert(token) {
            continue;
        }

        let mut matched = false;
        for mod_name in index.mods_under(token) {
            if selected.contains(mod_name.as_str()) {
                matched = true;
            } else if source_folder_exists(source, token, mod_name) {
                plan.push(source, destination, mod_name, token);
                selected.insert(mod_name.as_str());
                matched = true;
            }
        }

        if !matched {
            if selected.contains(token) {
                matched = true;
            } else if let Some(identifier) = index.get(token) {
                if source_folder_exists(source, identifier, token) {
                    plan.push(source, destination, token, identifier);
                    selected.insert(token);
                    matched = true;
                }
            }
        }

        if !matched {
            plan.missing.push(token.to_string());
        }
    }

    plan
}

/// Plan the transfer of every indexed mod
pub fn plan_all(source: &Path, destination: &Path, index: &ScanIndex) -> TransferPlan {
    let mut plan = TransferPlan::default();

    for (mod_name, identifier) in index.iter() {
        if source_folder_exists(source, identifier, mod_name) {
            plan.push(source, destination, mod_name, identifier);
        } else {
            plan.missing.push(mod_name.to_string());
        }
    }

    plan
}
