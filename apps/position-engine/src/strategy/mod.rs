//! Strategy-shape reconstruction.
//!
//! A brokerage reports legs as isolated positions; the grouping store only
//! remembers which symbols belong together and what the strategy was called.
//! This module recovers the rest: which side each leg was opened on, what it
//! must be closed with, what the net entry credit was, and whether the group
//! still has the number of legs its shape requires.

mod health;
mod inference;
mod types;

pub use health::{GroupHealth, HealthStatus, compute_group_health};
pub use inference::infer_leg_sides;
pub use types::{
    CloseSide, InferenceError, InferredLeg, LegInference, LegRecord, OpenSide, StrategyType,
};
