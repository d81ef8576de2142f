use crate::config::CollisionPolicy;
use crate::manifest::ModManifest;
use std::fmt;
use std::path::PathBuf;

/// How a mod folder gets from the source tree to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferAction {
    #[default]
    Copy,
    Move,
}

impl TransferAction {
    pub fn past_tense(&self) -> &'static str {
        match self {
            TransferAction::Copy => "Copied",
            TransferAction::Move => "Moved",
        }
    }
}

impl fmt::Display for TransferAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferAction::Copy => write!(f, "copy"),
            TransferAction::Move => write!(f, "move"),
        }
    }
}

/// Emitted after each transferred mod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferProgress {
    pub done: usize,
    pub total: usize,
    pub mod_name: String,
}

/// Callback receiving [`TransferProgress`] updates
pub type ProgressFn<'a> = &'a mut (dyn FnMut(TransferProgress) + Send);

/// Knobs shared by all transfer operations
#[derive(Default)]
pub struct ReconcileOptions<'a> {
    pub collision_policy: CollisionPolicy,
    pub progress: Option<ProgressFn<'a>>,
}

impl<'a> ReconcileOptions<'a> {
    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: ProgressFn<'a>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub(crate) fn report(&mut self, update: TransferProgress) {
        if let Some(progress) = self.progress.as_mut() {
            progress(update);
        }
    }
}

/// A mod that was transferred and recorded in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferredMod {
    pub mod_name: String,
    pub identifier: String,
}

/// Whether every requested item was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Complete,
    /// Some requested names or identifiers had no folder in the source tree
    PartialMatch { missing: Vec<String> },
}

/// Result of a copy/move run
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    pub action: TransferAction,
    pub destination: PathBuf,
    pub transferred: Vec<TransferredMod>,
    /// Destination folders that were deleted before being replaced
    pub replaced: Vec<String>,
    /// Requested names or identifiers that matched nothing
    pub missing: Vec<String>,
    pub manifest: ModManifest,
}

impl ReconciliationResult {
    pub fn outcome(&self) -> ReconcileOutcome {
        if self.missing.is_empty() {
            ReconcileOutcome::Complete
        } else {
            ReconcileOutcome::PartialMatch {
                missing: self.missing.clone(),
            }
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} {} mod(s) to {} ({} replaced); manifest tracks {} mod(s)",
            self.action.past_tense(),
            self.transferred.len(),
            self.destination.display(),
            self.replaced.len(),
            self.manifest.count(),
        );
        if !self.missing.is_empty() {
            summary.push_str(&format!(
                ". Not found in source: {}",
                self.missing.join(", ")
            ));
        }
        summary
    }
}

/// Result of deleting mods from the destination
#[derive(Debug, Clone, Default)]
pub struct RemovalResult {
    pub removed: Vec<String>,
    pub not_found: Vec<String>,
    pub manifest: ModManifest,
}
