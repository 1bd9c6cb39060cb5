//! Side and instrument inference from incomplete broker metadata.
//!
//! The fallback chain is a fixed priority order; the first decisive signal
//! wins and later signals are never consulted:
//!
//! 1. a literal `"long"`/`"short"` side string (case-insensitive)
//! 2. the sign of the reported quantity
//! 3. the sign of the cost basis
//!
//! A position that survives all three with no decision is `Unknown`, and the
//! close-instruction engine refuses to act on it.

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{BrokerPosition, InstrumentKind, PositionSide};
use crate::symbols::OccSymbol;

/// Infer position side from the broker record.
#[must_use]
pub fn infer_side(position: &BrokerPosition) -> PositionSide {
    if let Some(side) = position.side.as_deref() {
        match side.to_ascii_lowercase().as_str() {
            "long" => return PositionSide::Long,
            "short" => return PositionSide::Short,
            other => {
                debug!(
                    symbol = %position.symbol,
                    side = other,
                    "Unrecognized broker side string, falling back to quantity sign"
                );
            }
        }
    }

    match position.quantity.cmp(&0) {
        std::cmp::Ordering::Less => PositionSide::Short,
        std::cmp::Ordering::Greater => PositionSide::Long,
        std::cmp::Ordering::Equal => {
            debug!(
                symbol = %position.symbol,
                cost_basis = %position.cost_basis,
                "Quantity is zero, falling back to cost-basis sign"
            );
            infer_side_from_cost_basis(position.cost_basis)
        }
    }
}

/// Infer position side from the cost-basis sign alone.
///
/// A negative basis means premium was collected (short entry), a positive
/// basis means premium was paid (long entry). Zero decides nothing.
#[must_use]
pub fn infer_side_from_cost_basis(cost_basis: Decimal) -> PositionSide {
    if cost_basis < Decimal::ZERO {
        PositionSide::Short
    } else if cost_basis > Decimal::ZERO {
        PositionSide::Long
    } else {
        PositionSide::Unknown
    }
}

/// Infer instrument kind from the broker record.
///
/// An explicit `instrument_type` containing `option` or `equity`/`stock`
/// (case-insensitive) is trusted; otherwise the symbol itself decides:
/// parses as an OCC identifier ⇒ option, anything else ⇒ equity.
#[must_use]
pub fn infer_instrument(position: &BrokerPosition) -> InstrumentKind {
    if let Some(stated) = position.instrument_type.as_deref() {
        let stated = stated.to_ascii_lowercase();
        if stated.contains("option") {
            return InstrumentKind::Option;
        }
        if stated.contains("equity") || stated.contains("stock") {
            return InstrumentKind::Equity;
        }
        debug!(
            symbol = %position.symbol,
            instrument_type = %stated,
            "Unrecognized broker instrument type, classifying by symbol"
        );
    }

    if OccSymbol::parse(&position.symbol).is_some() {
        InstrumentKind::Option
    } else {
        InstrumentKind::Equity
    }
}
