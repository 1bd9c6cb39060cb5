//! Broker position record and boundary enums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One position record as reported by the brokerage account.
///
/// `quantity` is signed: a negative count is an authoritative short signal.
/// The `side` and `instrument_type` strings are free-form broker vocabulary
/// and may be missing entirely; they are normalized exactly once by the
/// inference functions in this module and never re-interpreted downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerPosition {
    /// Trading symbol (equity ticker or OCC option identifier).
    pub symbol: String,
    /// Signed contract/share count (negative for short positions).
    pub quantity: i64,
    /// Signed cost basis (negative typically implies a credit/short entry).
    #[serde(default)]
    pub cost_basis: Decimal,
    /// Broker-stated side ("long"/"short"), when present.
    #[serde(default)]
    pub side: Option<String>,
    /// Broker-stated instrument type ("option"/"equity"/...), when present.
    #[serde(default)]
    pub instrument_type: Option<String>,
}

impl BrokerPosition {
    /// Create a record carrying only the fields every broker supplies.
    #[must_use]
    pub fn new(symbol: impl Into<String>, quantity: i64, cost_basis: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            cost_basis,
            side: None,
            instrument_type: None,
        }
    }

    /// Attach a broker-stated side string.
    #[must_use]
    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = Some(side.into());
        self
    }

    /// Attach a broker-stated instrument type string.
    #[must_use]
    pub fn with_instrument_type(mut self, instrument_type: impl Into<String>) -> Self {
        self.instrument_type = Some(instrument_type.into());
        self
    }
}

/// Position side after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Long position (bought).
    Long,
    /// Short position (sold/written).
    Short,
    /// No usable side signal; callers must not act on this.
    Unknown,
}

impl PositionSide {
    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }

    /// Check if this is a short position.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        matches!(self, Self::Short)
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Short => write!(f, "short"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Instrument kind after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// An options contract.
    Option,
    /// An equity (shares).
    Equity,
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Option => write!(f, "option"),
            Self::Equity => write!(f, "equity"),
        }
    }
}
