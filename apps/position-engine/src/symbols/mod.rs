//! OCC option symbol parsing.
//!
//! Decodes identifiers in the fixed OCC format
//! `ROOT` + `YYMMDD` + `C`/`P` + 8-digit strike×1000
//! (e.g. `SPY260115C00693000` -> SPY, 2026-01-15, call, 693.00).
//!
//! A string that does not match the grammar is not an error: `parse`
//! returning `None` is the documented signal "not an option identifier",
//! which callers use to tell equities from options.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option kind (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionKind {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl std::fmt::Display for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Structural fields decoded from an OCC option identifier.
///
/// The expiry digit pairs are kept as parsed: the grammar is intentionally
/// permissive and accepts calendar-invalid dates (e.g. day 30 in February),
/// mirroring upstream broker data. Use [`OccSymbol::expiry_date`] when a
/// real calendar date is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccSymbol {
    /// Underlying root (uppercase letters).
    pub root: String,
    /// Expiry year (2000 + the two-digit year field).
    pub expiry_year: i32,
    /// Expiry month digits (01-12 in well-formed data).
    pub expiry_month: u32,
    /// Expiry day digits.
    pub expiry_day: u32,
    /// Call or put.
    pub kind: OptionKind,
    /// Strike price (8-digit field divided by 1000, exact).
    pub strike: Decimal,
}

fn occ_grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
        Regex::new(r"^([A-Z]+)(\d{2})(\d{2})(\d{2})([CP])(\d{8})$").unwrap()
    })
}

impl OccSymbol {
    /// Parse an OCC option identifier.
    ///
    /// Returns `None` for anything that deviates from the fixed grammar:
    /// wrong digit counts, lowercase letters, embedded whitespace, missing
    /// kind letter, or plain equity tickers.
    #[must_use]
    pub fn parse(symbol: &str) -> Option<Self> {
        let caps = occ_grammar().captures(symbol)?;

        let root = caps[1].to_string();
        let yy: i32 = caps[2].parse().ok()?;
        let month: u32 = caps[3].parse().ok()?;
        let day: u32 = caps[4].parse().ok()?;
        let kind = match &caps[5] {
            "C" => OptionKind::Call,
            "P" => OptionKind::Put,
            _ => return None,
        };
        let strike_thousandths: i64 = caps[6].parse().ok()?;

        Some(Self {
            root,
            expiry_year: 2000 + yy,
            expiry_month: month,
            expiry_day: day,
            kind,
            strike: Decimal::new(strike_thousandths, 3),
        })
    }

    /// Expiry as a calendar date.
    ///
    /// Returns `None` when the structurally-valid digit pairs do not form a
    /// real date (month 13, February 30, ...).
    #[must_use]
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.expiry_year, self.expiry_month, self.expiry_day)
    }

    /// Check if this is a call.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        matches!(self.kind, OptionKind::Call)
    }

    /// Check if this is a put.
    #[must_use]
    pub const fn is_put(&self) -> bool {
        matches!(self.kind, OptionKind::Put)
    }
}
