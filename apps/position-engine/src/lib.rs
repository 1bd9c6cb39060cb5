// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Position Engine - Strategy Reconstruction Core
//!
//! Reconstructs the strategic structure of multi-leg options positions from
//! the flat symbol/quantity/cost-basis records a brokerage account reports.
//!
//! # Modules
//!
//! - [`symbols`]: OCC option identifier parsing (root, expiry, kind, strike)
//! - [`positions`]: broker position records, side inference, and the
//!   close-instruction truth table
//! - [`strategy`]: canonical leg-side assignment for known strategy shapes
//!   (iron condor, credit spreads) and structure-health evaluation
//! - [`grouping`]: snapshot types and ports for the external position source
//!   and grouping store
//! - [`reconcile`]: the reconciliation pass that composes health, leg
//!   inference, and close instructions into a report
//! - [`config`]: engine configuration (YAML + serde defaults)
//! - [`telemetry`]: tracing subscriber setup
//!
//! Every operation is a pure, synchronous computation over caller-supplied
//! inputs; the engine holds no connections and mutates no shared state. The
//! failure policy is uniform: when upstream data is too ambiguous to classify
//! safely, the engine returns a typed error rather than guessing, because a
//! wrong side on a closing order is categorically worse than refusing to act.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Engine configuration loading and defaults.
pub mod config;

/// Trade-group snapshots and collaborator ports.
pub mod grouping;

/// Broker position records, side inference, and close instructions.
pub mod positions;

/// Group reconciliation pass and report types.
pub mod reconcile;

/// Strategy-shape leg inference and structure health.
pub mod strategy;

/// OCC option symbol parsing.
pub mod symbols;

/// Tracing subscriber setup.
pub mod telemetry;

// Re-exports for the common call paths
pub use config::{BrokenStructureAction, EngineConfig, ReconcileConfig};
pub use grouping::{GroupingStorePort, PositionSourcePort, TradeGroupSnapshot};
pub use positions::{
    BrokerPosition, CloseInstruction, CloseInstructionError, ClosingOrderSide, InstrumentKind,
    PositionSide, close_instruction,
};
pub use reconcile::{ReconciliationReport, Reconciler};
pub use strategy::{
    CloseSide, GroupHealth, HealthStatus, InferenceError, InferredLeg, LegInference, LegRecord,
    OpenSide, StrategyType, compute_group_health, infer_leg_sides,
};
pub use symbols::{OccSymbol, OptionKind};
