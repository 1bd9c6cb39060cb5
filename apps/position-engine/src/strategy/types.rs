//! Strategy types, leg records, and inference results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbols::OptionKind;

/// Recognized strategy shapes.
///
/// Tags arriving from the grouping store are normalized into this closed set
/// once; anything unrecognized becomes [`StrategyType::Custom`]. Adding a
/// shape here is a compile error at every match that handles it, never a
/// silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Short iron condor (4 legs: call spread + put spread).
    IronCondor,
    /// Iron butterfly (4 legs, inner strikes converge).
    IronFly,
    /// Credit put spread (2 legs).
    CreditPutSpread,
    /// Credit call spread (2 legs).
    CreditCallSpread,
    /// Butterfly (3 legs).
    Butterfly,
    /// Straddle (2 legs, same strike).
    Straddle,
    /// Strangle (2 legs, different strikes).
    Strangle,
    /// Unclassified/user-defined grouping; no expected shape.
    #[serde(other)]
    Custom,
}

impl StrategyType {
    /// Normalize a free-form strategy tag.
    ///
    /// Unrecognized tags map to [`StrategyType::Custom`], the shape-less
    /// bucket, so an upstream typo degrades to "cannot verify" rather than
    /// an error.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "iron_condor" => Self::IronCondor,
            "iron_fly" => Self::IronFly,
            "credit_put_spread" => Self::CreditPutSpread,
            "credit_call_spread" => Self::CreditCallSpread,
            "butterfly" => Self::Butterfly,
            "straddle" => Self::Straddle,
            "strangle" => Self::Strangle,
            _ => Self::Custom,
        }
    }

    /// Expected leg count for this shape, `None` when no shape is defined.
    #[must_use]
    pub const fn expected_leg_count(&self) -> Option<usize> {
        match self {
            Self::IronCondor | Self::IronFly => Some(4),
            Self::Butterfly => Some(3),
            Self::CreditPutSpread | Self::CreditCallSpread | Self::Straddle | Self::Strangle => {
                Some(2)
            }
            Self::Custom => None,
        }
    }
}

impl std::fmt::Display for StrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::IronCondor => "iron_condor",
            Self::IronFly => "iron_fly",
            Self::CreditPutSpread => "credit_put_spread",
            Self::CreditCallSpread => "credit_call_spread",
            Self::Butterfly => "butterfly",
            Self::Straddle => "straddle",
            Self::Strangle => "strangle",
            Self::Custom => "custom",
        };
        write!(f, "{tag}")
    }
}

/// Side a leg was originally opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenSide {
    /// Sold to open: collected premium, short obligation.
    SellToOpen,
    /// Bought to open: paid premium, long right.
    BuyToOpen,
}

impl OpenSide {
    /// The order action that neutralizes a leg opened on this side.
    ///
    /// Always the exact economic inverse; there is no other mapping.
    #[must_use]
    pub const fn closing(&self) -> CloseSide {
        match self {
            Self::SellToOpen => CloseSide::BuyToClose,
            Self::BuyToOpen => CloseSide::SellToClose,
        }
    }
}

/// Order action that closes an option leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseSide {
    /// Buy back a sold-to-open leg.
    BuyToClose,
    /// Sell out a bought-to-open leg.
    SellToClose,
}

/// One leg's economics as known to the caller, before side assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegRecord {
    /// OCC option identifier.
    pub symbol: String,
    /// Premium at entry (per contract).
    pub entry_price: Decimal,
    /// Premium at exit, when known.
    #[serde(default)]
    pub exit_price: Option<Decimal>,
}

impl LegRecord {
    /// Create a leg record without an exit price.
    #[must_use]
    pub fn new(symbol: impl Into<String>, entry_price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            entry_price,
            exit_price: None,
        }
    }

    /// Attach a known exit price.
    #[must_use]
    pub const fn with_exit_price(mut self, exit_price: Decimal) -> Self {
        self.exit_price = Some(exit_price);
        self
    }
}

/// A leg with its inferred open/close sides and parsed contract fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredLeg {
    /// OCC option identifier.
    pub symbol: String,
    /// Premium at entry (per contract).
    pub entry_price: Decimal,
    /// Premium at exit, when known.
    pub exit_price: Option<Decimal>,
    /// Side the leg was opened on, per the shape's canonical construction.
    pub open_side: OpenSide,
    /// Closing action; always `open_side.closing()`.
    pub close_side: CloseSide,
    /// Kind parsed from the symbol (recorded verbatim, not forced to match
    /// the nominal spread type).
    pub kind: OptionKind,
    /// Strike parsed from the symbol.
    pub strike: Decimal,
}

impl InferredLeg {
    /// Build an inferred leg, deriving the close side from the open side.
    ///
    /// This is the only constructor, so the side-inverse invariant cannot be
    /// violated by any inference path.
    #[must_use]
    pub fn assign(record: &LegRecord, open_side: OpenSide, kind: OptionKind, strike: Decimal) -> Self {
        Self {
            symbol: record.symbol.clone(),
            entry_price: record.entry_price,
            exit_price: record.exit_price,
            open_side,
            close_side: open_side.closing(),
            kind,
            strike,
        }
    }

    /// Check whether this leg was sold to open.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        matches!(self.open_side, OpenSide::SellToOpen)
    }
}

/// Successful leg-side inference for one strategy group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegInference {
    /// Legs with assigned sides, calls by ascending strike then puts by
    /// ascending strike.
    pub legs: Vec<InferredLeg>,
    /// Premium collected minus premium paid at entry; positive for a
    /// strategy opened for a net credit.
    pub net_entry_credit: Decimal,
    /// Cost to unwind at the known exit prices. `None` (not zero) until
    /// every leg has an exit price.
    pub net_exit_debit: Option<Decimal>,
}

/// Leg-side inference failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// No legs were supplied.
    #[error("Missing strategy type or legs")]
    MissingLegs,

    /// The strategy type has no canonical construction to assign from.
    #[error("Unsupported strategy type: {strategy}")]
    UnsupportedStrategy {
        /// The unsupported type.
        strategy: StrategyType,
    },

    /// Wrong number of legs for the requested shape.
    #[error("Expected {expected} legs for {strategy}, found {actual}")]
    LegCountMismatch {
        /// Requested shape.
        strategy: StrategyType,
        /// Legs the shape requires.
        expected: usize,
        /// Legs actually supplied.
        actual: usize,
    },

    /// At least one leg symbol is not a valid option identifier.
    #[error("Could not parse all leg symbols: {symbol}")]
    UnparseableSymbol {
        /// The first symbol that failed to parse.
        symbol: String,
    },

    /// An iron condor needs exactly two calls and two puts.
    #[error("Expected 2 calls and 2 puts, found {calls} calls and {puts} puts")]
    KindSplitMismatch {
        /// Calls observed.
        calls: usize,
        /// Puts observed.
        puts: usize,
    },
}
