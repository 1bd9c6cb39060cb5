//! Structure-health evaluation.
//!
//! A pure lookup and comparison: does the observed leg count match the
//! count the declared strategy shape expects? A `Broken` result is not an
//! error, it is a gate: closing part of a structure can leave undefined
//! risk (closing 3 of 4 iron-condor legs leaves a naked short), so callers
//! must require operator confirmation before acting on a broken group.

use serde::{Deserialize, Serialize};

use super::types::StrategyType;

/// Structural integrity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Observed leg count matches the expected count.
    Ok,
    /// Observed leg count differs from the expected count.
    Broken,
    /// The strategy type defines no expected count.
    Unknown,
}

/// Result of evaluating a group's structural integrity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupHealth {
    /// Classification.
    pub status: HealthStatus,
    /// Human-readable explanation.
    pub reason: String,
    /// Legs the declared shape expects, when defined.
    pub expected_legs: Option<usize>,
    /// Legs actually observed.
    pub observed_legs: usize,
}

impl GroupHealth {
    /// Check if the structure is intact.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }

    /// Check if the structure is broken.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.status == HealthStatus::Broken
    }
}

/// Evaluate structural integrity for a strategy type and observed leg count.
///
/// This is a pure function of its two arguments; no other state affects it.
#[must_use]
pub fn compute_group_health(strategy: StrategyType, observed_legs: usize) -> GroupHealth {
    match strategy.expected_leg_count() {
        None => GroupHealth {
            status: HealthStatus::Unknown,
            reason: "No expected leg count defined for this strategy type".to_string(),
            expected_legs: None,
            observed_legs,
        },
        Some(expected) if observed_legs == expected => GroupHealth {
            status: HealthStatus::Ok,
            reason: format!("All {expected} legs present"),
            expected_legs: Some(expected),
            observed_legs,
        },
        Some(expected) => GroupHealth {
            status: HealthStatus::Broken,
            reason: format!(
                "Expected {expected} legs, found {observed_legs}: structure broken"
            ),
            expected_legs: Some(expected),
            observed_legs,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StrategyType::IronCondor, 4, HealthStatus::Ok; "intact condor")]
    #[test_case(StrategyType::IronCondor, 3, HealthStatus::Broken; "condor missing a leg")]
    #[test_case(StrategyType::IronCondor, 5, HealthStatus::Broken; "condor with extra leg")]
    #[test_case(StrategyType::IronFly, 4, HealthStatus::Ok; "intact fly")]
    #[test_case(StrategyType::CreditPutSpread, 2, HealthStatus::Ok; "intact put spread")]
    #[test_case(StrategyType::CreditPutSpread, 1, HealthStatus::Broken; "half a spread")]
    #[test_case(StrategyType::Butterfly, 3, HealthStatus::Ok; "intact butterfly")]
    #[test_case(StrategyType::Straddle, 2, HealthStatus::Ok; "intact straddle")]
    #[test_case(StrategyType::Custom, 2, HealthStatus::Unknown; "custom has no shape")]
    #[test_case(StrategyType::Custom, 0, HealthStatus::Unknown; "custom empty")]
    fn health_boundaries(strategy: StrategyType, observed: usize, expected: HealthStatus) {
        let health = compute_group_health(strategy, observed);
        assert_eq!(health.status, expected);
        assert_eq!(health.observed_legs, observed);
    }

    #[test]
    fn broken_reason_names_both_counts() {
        let health = compute_group_health(StrategyType::IronCondor, 3);
        assert!(health.is_broken());
        assert_eq!(health.expected_legs, Some(4));
        assert!(health.reason.contains('4'));
        assert!(health.reason.contains('3'));
        assert!(health.reason.contains("structure broken"));
    }

    #[test]
    fn ok_reason_names_count() {
        let health = compute_group_health(StrategyType::IronCondor, 4);
        assert!(health.is_ok());
        assert_eq!(health.reason, "All 4 legs present");
    }

    #[test]
    fn unknown_carries_no_expected_count() {
        let health = compute_group_health(StrategyType::Custom, 7);
        assert_eq!(health.status, HealthStatus::Unknown);
        assert!(health.expected_legs.is_none());
        assert!(!health.is_ok());
        assert!(!health.is_broken());
    }

    #[test]
    fn zero_observed_legs_is_broken_for_shaped_types() {
        let health = compute_group_health(StrategyType::Strangle, 0);
        assert!(health.is_broken());
    }
}
