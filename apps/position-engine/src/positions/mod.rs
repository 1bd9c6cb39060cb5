//! Broker position records and per-position classification.
//!
//! Everything a brokerage reports about an open position is treated as
//! untrusted: the side string may be absent or nonsense, the quantity may be
//! zero, the cost basis may contradict both. This module normalizes those
//! free-form fields into closed enums once, at the boundary, and derives the
//! closing order instruction from the normalized values.

mod close;
mod side;
mod types;

pub use close::{CloseInstruction, CloseInstructionError, ClosingOrderSide, close_instruction};
pub use side::{infer_instrument, infer_side, infer_side_from_cost_basis};
pub use types::{BrokerPosition, InstrumentKind, PositionSide};
