//! Group reconciliation pass.
//!
//! Composes the core classifications over one consistent snapshot of broker
//! positions and trade-group mappings: structure health per group, leg-side
//! inference per group, a close instruction per member, and orphan detection
//! for positions no group claims.
//!
//! The pass itself is pure and synchronous; [`Reconciler::run`] is a thin
//! async wrapper that pulls both snapshots through the collaborator ports
//! first. Nothing here submits orders or mutates the mapping store.

mod report;

pub use report::{GroupReport, MemberClose, OrphanPosition, ReconciliationReport};

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::config::{BrokenStructureAction, ReconcileConfig};
use crate::grouping::{GroupingStorePort, PositionSourcePort, TradeGroupSnapshot};
use crate::positions::{BrokerPosition, close_instruction};
use crate::strategy::{compute_group_health, infer_leg_sides};

/// Runs reconciliation passes over position/group snapshots.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    /// Create a reconciler with the given configuration.
    #[must_use]
    pub const fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Create a reconciler with default (safest) configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Reconcile one snapshot of broker positions against one snapshot of
    /// trade-group mappings.
    #[must_use]
    pub fn reconcile(
        &self,
        positions: &[BrokerPosition],
        groups: &[TradeGroupSnapshot],
    ) -> ReconciliationReport {
        info!(
            positions = positions.len(),
            groups = groups.len(),
            "Starting group reconciliation"
        );

        let by_symbol: HashMap<&str, &BrokerPosition> = positions
            .iter()
            .map(|p| (p.symbol.as_str(), p))
            .collect();
        let mut claimed: HashSet<&str> = HashSet::new();

        let mut group_reports = Vec::with_capacity(groups.len());
        for group in groups {
            group_reports.push(self.reconcile_group(group, &by_symbol, &mut claimed));
        }

        let orphans = if self.config.include_orphans {
            positions
                .iter()
                .filter(|p| !claimed.contains(p.symbol.as_str()))
                .map(|p| {
                    debug!(symbol = %p.symbol, "Position claimed by no trade group");
                    match close_instruction(p) {
                        Ok(instruction) => OrphanPosition {
                            symbol: p.symbol.clone(),
                            quantity: p.quantity,
                            instruction: Some(instruction),
                            error: None,
                        },
                        Err(err) => OrphanPosition {
                            symbol: p.symbol.clone(),
                            quantity: p.quantity,
                            instruction: None,
                            error: Some(err.to_string()),
                        },
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut report = ReconciliationReport {
            groups: group_reports,
            orphans,
            positions_seen: positions.len(),
            groups_evaluated: groups.len(),
            passed: false,
            errors: Vec::new(),
        };
        report.passed = !report.has_blocked() && !report.has_refusals();

        info!(
            passed = report.passed,
            blocked = report.has_blocked(),
            orphans = report.orphans.len(),
            "Group reconciliation complete"
        );
        report
    }

    /// Fetch both snapshots through the collaborator ports and reconcile.
    ///
    /// Port failures surface as report-level errors; this never panics and
    /// never returns a partially-classified report.
    pub async fn run(
        &self,
        source: &dyn PositionSourcePort,
        store: &dyn GroupingStorePort,
    ) -> ReconciliationReport {
        let positions = match source.list_positions().await {
            Ok(positions) => positions,
            Err(err) => {
                warn!(error = %err, "Failed to fetch broker positions");
                return ReconciliationReport::failed(format!(
                    "Failed to fetch broker positions: {err}"
                ));
            }
        };

        let groups = match store.fetch_groups().await {
            Ok(groups) => groups,
            Err(err) => {
                warn!(error = %err, "Failed to fetch trade groups");
                return ReconciliationReport::failed(format!(
                    "Failed to fetch trade groups: {err}"
                ));
            }
        };

        self.reconcile(&positions, &groups)
    }

    fn reconcile_group<'a>(
        &self,
        group: &'a TradeGroupSnapshot,
        by_symbol: &HashMap<&str, &BrokerPosition>,
        claimed: &mut HashSet<&'a str>,
    ) -> GroupReport {
        let mut present = Vec::new();
        let mut missing_symbols = Vec::new();
        for leg in &group.legs {
            claimed.insert(leg.symbol.as_str());
            match by_symbol.get(leg.symbol.as_str()) {
                Some(position) => present.push(*position),
                None => missing_symbols.push(leg.symbol.clone()),
            }
        }

        let health = compute_group_health(group.strategy, present.len());
        let (inference, inference_error) = match infer_leg_sides(&group.legs, group.strategy) {
            Ok(inference) => (Some(inference), None),
            Err(err) => {
                debug!(
                    group_id = %group.group_id,
                    error = %err,
                    "Leg-side inference failed"
                );
                (None, Some(err.to_string()))
            }
        };

        let close_blocked = health.is_broken()
            && self.config.on_broken_structure == BrokenStructureAction::Block;

        let close_instructions = if close_blocked {
            warn!(
                group_id = %group.group_id,
                reason = %health.reason,
                "Withholding close instructions for broken structure"
            );
            Vec::new()
        } else {
            if health.is_broken() {
                warn!(
                    group_id = %group.group_id,
                    reason = %health.reason,
                    "Structure broken; emitting close instructions anyway per configuration"
                );
            }
            present
                .iter()
                .map(|position| match close_instruction(position) {
                    Ok(instruction) => MemberClose {
                        symbol: position.symbol.clone(),
                        instruction: Some(instruction),
                        error: None,
                    },
                    Err(err) => MemberClose {
                        symbol: position.symbol.clone(),
                        instruction: None,
                        error: Some(err.to_string()),
                    },
                })
                .collect()
        };

        GroupReport {
            group_id: group.group_id.clone(),
            strategy: group.strategy,
            health,
            inference,
            inference_error,
            close_instructions,
            close_blocked,
            missing_symbols,
        }
    }
}
