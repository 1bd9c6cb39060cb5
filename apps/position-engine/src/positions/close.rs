//! Close-instruction derivation.
//!
//! Maps a classified position onto the one order action that flattens it.
//! The mapping is a fixed truth table; there is no discretionary branch:
//!
//! | instrument | side  | closing action |
//! |------------|-------|----------------|
//! | option     | short | buy to close   |
//! | option     | long  | sell to close  |
//! | equity     | short | buy to cover   |
//! | equity     | long  | sell           |
//!
//! When the side cannot be determined or the reported quantity is zero, the
//! engine returns a typed error instead of guessing. Submitting an order on
//! the wrong side of the market would open fresh exposure rather than close
//! it, so refusal is the only acceptable failure mode here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::side::{infer_instrument, infer_side};
use super::types::{BrokerPosition, InstrumentKind, PositionSide};

/// Order action that flattens a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingOrderSide {
    /// Buy back a short option.
    BuyToClose,
    /// Sell out a long option.
    SellToClose,
    /// Buy back shorted shares.
    BuyToCover,
    /// Sell held shares.
    Sell,
}

impl std::fmt::Display for ClosingOrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BuyToClose => write!(f, "buy_to_close"),
            Self::SellToClose => write!(f, "sell_to_close"),
            Self::BuyToCover => write!(f, "buy_to_cover"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// The order instruction needed to flatten one position.
///
/// `quantity` is always a positive count; the zero case is rejected before
/// an instruction is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseInstruction {
    /// Instrument kind the order applies to.
    pub instrument: InstrumentKind,
    /// Inferred side of the open position (never `Unknown` here).
    pub side: PositionSide,
    /// Action to submit.
    pub close_side: ClosingOrderSide,
    /// Unsigned contract/share count to close.
    pub quantity: u64,
}

/// Refusal to derive a close instruction.
///
/// Both variants carry the full classification context so callers can log
/// or display exactly what the engine saw when it refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloseInstructionError {
    /// No usable side signal on the record.
    #[error(
        "Cannot close {symbol}: position side is unknown (quantity {quantity}, cost basis {cost_basis})"
    )]
    IndeterminateSide {
        /// Offending symbol.
        symbol: String,
        /// Instrument kind as classified.
        instrument: InstrumentKind,
        /// Side as classified (always `Unknown` for this variant).
        side: PositionSide,
        /// Reported signed quantity.
        quantity: i64,
        /// Reported cost basis.
        cost_basis: Decimal,
    },

    /// Reported quantity is exactly zero; there is nothing to size an order from.
    #[error("Cannot close {symbol}: reported quantity is zero (cost basis {cost_basis})")]
    ZeroQuantity {
        /// Offending symbol.
        symbol: String,
        /// Instrument kind as classified.
        instrument: InstrumentKind,
        /// Side as classified.
        side: PositionSide,
        /// Reported cost basis.
        cost_basis: Decimal,
    },
}

/// Derive the closing order instruction for one broker position.
///
/// Classification only: nothing is submitted anywhere. The caller owns the
/// order transport.
pub fn close_instruction(
    position: &BrokerPosition,
) -> Result<CloseInstruction, CloseInstructionError> {
    let instrument = infer_instrument(position);
    let side = infer_side(position);

    let close_side = match (side, instrument) {
        (PositionSide::Unknown, _) => {
            warn!(
                symbol = %position.symbol,
                quantity = position.quantity,
                cost_basis = %position.cost_basis,
                "Refusing to derive close instruction: side is indeterminate"
            );
            return Err(CloseInstructionError::IndeterminateSide {
                symbol: position.symbol.clone(),
                instrument,
                side,
                quantity: position.quantity,
                cost_basis: position.cost_basis,
            });
        }
        (PositionSide::Short, InstrumentKind::Option) => ClosingOrderSide::BuyToClose,
        (PositionSide::Long, InstrumentKind::Option) => ClosingOrderSide::SellToClose,
        (PositionSide::Short, InstrumentKind::Equity) => ClosingOrderSide::BuyToCover,
        (PositionSide::Long, InstrumentKind::Equity) => ClosingOrderSide::Sell,
    };

    if position.quantity == 0 {
        warn!(
            symbol = %position.symbol,
            "Refusing to derive close instruction: reported quantity is zero"
        );
        return Err(CloseInstructionError::ZeroQuantity {
            symbol: position.symbol.clone(),
            instrument,
            side,
            cost_basis: position.cost_basis,
        });
    }

    Ok(CloseInstruction {
        instrument,
        side,
        close_side,
        quantity: position.quantity.unsigned_abs(),
    })
}
