mod execute;
mod maintenance;
mod plan;
mod types;

pub use execute::{execute_plan, move_all, reconcile_by_identifiers, reconcile_selected};
pub use maintenance::{installed_mods, regenerate_manifest, remove_mods};
pub use plan::{plan_all, plan_by_identifiers, plan_selected, PlannedTransfer, TransferPlan};
pub use types::{
    ProgressFn, ReconcileOptions, ReconcileOutcome, ReconciliationResult, RemovalResult,
    TransferAction, TransferProgress, TransferredMod,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Directory not found: {0}")]
    PathNotFound(String),

    #[error("Mod {mod_name} is provided by both {kept} and {discarded}")]
    IdentifierCollision {
        mod_name: String,
        kept: String,
        discarded: String,
    },

    #[error("Source {source_path} and destination {destination} overlap")]
    OverlappingPaths {
        source_path: String,
        destination: String,
    },

    #[error("Invalid mod name: {0:?}")]
    InvalidModName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] crate::manifest::ManifestError),
}
