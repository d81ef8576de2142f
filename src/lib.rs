pub mod config;
pub mod diff;
pub mod idlist;
pub mod manifest;
pub mod reconciliation;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use config::{CollisionPolicy, ConfigError, ModkeeperConfig};
pub use diff::{compare_manifest_files, diff_manifests, DiffEntry, DiffError, ManifestDiff};
pub use idlist::{parse_identifier_list, read_identifier_list, write_identifier_list, IdListError};
pub use manifest::{
    load_manifest, merge_existing, read_manifest, save_manifest, write_manifest, ManifestError,
    ModManifest,
};
pub use reconciliation::{
    installed_mods, move_all, reconcile_by_identifiers, reconcile_selected, regenerate_manifest,
    remove_mods, ReconcileError, ReconcileOptions, ReconcileOutcome, ReconciliationResult,
    RemovalResult, TransferAction, TransferProgress,
};
pub use scanner::{scan_source, IdentifierCollision, ScanError, ScanIndex};
