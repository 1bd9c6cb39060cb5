//! Trade-group snapshots and collaborator ports.
//!
//! The engine consumes two external collaborators: the brokerage position
//! source and the grouping/mapping store that remembers which symbols form
//! one strategy instance. Both are modeled as driven ports; the engine only
//! ever sees one snapshot per call and never persists anything itself.
//! Removing a group's mapping after a confirmed close is the caller's
//! responsibility, exposed here as [`GroupingStorePort::remove_group`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::positions::BrokerPosition;
use crate::strategy::{LegRecord, StrategyType};

/// One trade group as the mapping store reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeGroupSnapshot {
    /// Externally-assigned group identifier.
    pub group_id: String,
    /// Declared strategy shape.
    pub strategy: StrategyType,
    /// Member legs with their entry (and optionally exit) economics.
    pub legs: Vec<LegRecord>,
}

impl TradeGroupSnapshot {
    /// Create a snapshot.
    #[must_use]
    pub fn new(
        group_id: impl Into<String>,
        strategy: StrategyType,
        legs: Vec<LegRecord>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            strategy,
            legs,
        }
    }

    /// Member symbols in declaration order.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        self.legs.iter().map(|leg| leg.symbol.as_str()).collect()
    }
}

/// Position source failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionSourceError {
    /// The source could not be reached.
    #[error("Position source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The source returned a record the engine cannot use.
    #[error("Malformed position record: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },
}

/// Grouping store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingStoreError {
    /// The store could not be reached.
    #[error("Grouping store unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// No group with the given identifier.
    #[error("Trade group not found: {group_id}")]
    GroupNotFound {
        /// The missing group identifier.
        group_id: String,
    },
}

/// Port for the brokerage position source.
#[async_trait]
pub trait PositionSourcePort: Send + Sync {
    /// Fetch the current open positions.
    async fn list_positions(&self) -> Result<Vec<BrokerPosition>, PositionSourceError>;
}

/// Port for the grouping/mapping store.
#[async_trait]
pub trait GroupingStorePort: Send + Sync {
    /// Fetch all trade-group snapshots.
    async fn fetch_groups(&self) -> Result<Vec<TradeGroupSnapshot>, GroupingStoreError>;

    /// Remove a group's mapping (to be called after a confirmed close).
    async fn remove_group(&self, group_id: &str) -> Result<(), GroupingStoreError>;
}
