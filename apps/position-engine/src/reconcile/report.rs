//! Reconciliation report types.

use serde::Serialize;

use crate::positions::CloseInstruction;
use crate::strategy::{GroupHealth, LegInference, StrategyType};

/// Close decision for one group member present at the broker.
#[derive(Debug, Clone, Serialize)]
pub struct MemberClose {
    /// Member symbol.
    pub symbol: String,
    /// Derived instruction, when classification succeeded.
    pub instruction: Option<CloseInstruction>,
    /// Refusal message, when it did not.
    pub error: Option<String>,
}

/// Reconciliation outcome for one trade group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    /// Group identifier from the mapping store.
    pub group_id: String,
    /// Declared strategy shape.
    pub strategy: StrategyType,
    /// Structural integrity against the shape's expected leg count.
    pub health: GroupHealth,
    /// Recovered per-leg sides and economics, when inference succeeded.
    pub inference: Option<LegInference>,
    /// Inference failure message, when it did not.
    pub inference_error: Option<String>,
    /// Close decisions for members present in the broker snapshot. Empty
    /// when the group's closes are blocked.
    pub close_instructions: Vec<MemberClose>,
    /// Whether close instructions were withheld pending operator
    /// confirmation.
    pub close_blocked: bool,
    /// Mapped member symbols absent from the broker snapshot.
    pub missing_symbols: Vec<String>,
}

/// A broker position claimed by no trade group.
#[derive(Debug, Clone, Serialize)]
pub struct OrphanPosition {
    /// Position symbol.
    pub symbol: String,
    /// Reported signed quantity.
    pub quantity: i64,
    /// Standalone close instruction, when classification succeeded.
    pub instruction: Option<CloseInstruction>,
    /// Refusal message, when it did not.
    pub error: Option<String>,
}

/// Result of a reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    /// Per-group outcomes.
    pub groups: Vec<GroupReport>,
    /// Positions claimed by no group.
    pub orphans: Vec<OrphanPosition>,
    /// Number of broker positions in the snapshot.
    pub positions_seen: usize,
    /// Number of groups evaluated.
    pub groups_evaluated: usize,
    /// Whether the run produced no blocked groups, no refused close
    /// instructions, and no collaborator errors.
    pub passed: bool,
    /// Collaborator-level failures (ports unreachable, malformed data).
    pub errors: Vec<String>,
}

impl ReconciliationReport {
    /// A report that failed before any comparison could run.
    #[must_use]
    pub fn failed(error: String) -> Self {
        Self {
            groups: Vec::new(),
            orphans: Vec::new(),
            positions_seen: 0,
            groups_evaluated: 0,
            passed: false,
            errors: vec![error],
        }
    }

    /// Check if any group had its close instructions withheld.
    #[must_use]
    pub fn has_blocked(&self) -> bool {
        self.groups.iter().any(|g| g.close_blocked)
    }

    /// Check if any member or orphan classification was refused.
    #[must_use]
    pub fn has_refusals(&self) -> bool {
        self.groups
            .iter()
            .flat_map(|g| &g.close_instructions)
            .any(|m| m.error.is_some())
            || self.orphans.iter().any(|o| o.error.is_some())
    }
}
