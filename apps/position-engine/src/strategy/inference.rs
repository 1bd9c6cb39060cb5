//! Canonical leg-side assignment for known strategy shapes.
//!
//! Assignment is fixed by the shape's standard construction and never
//! data-dependent: a short iron condor sells the inner strikes and buys the
//! outer wings, a credit call spread sells the lower strike, a credit put
//! spread sells the higher strike. A "reversed" (debit) condor is not
//! detected; it simply comes out with a negative net entry credit.

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{
    InferenceError, InferredLeg, LegInference, LegRecord, OpenSide, StrategyType,
};
use crate::symbols::{OccSymbol, OptionKind};

/// Assign open/close sides to a group of legs per the strategy's shape.
///
/// Supported shapes: iron condor / iron fly (4 legs) and credit put/call
/// spreads (2 legs). Every other type, including [`StrategyType::Custom`],
/// fails with [`InferenceError::UnsupportedStrategy`].
pub fn infer_leg_sides(
    legs: &[LegRecord],
    strategy: StrategyType,
) -> Result<LegInference, InferenceError> {
    if legs.is_empty() {
        return Err(InferenceError::MissingLegs);
    }

    match strategy {
        StrategyType::IronCondor | StrategyType::IronFly => infer_iron_condor(legs, strategy),
        StrategyType::CreditPutSpread => infer_credit_spread(legs, strategy, OptionKind::Put),
        StrategyType::CreditCallSpread => infer_credit_spread(legs, strategy, OptionKind::Call),
        StrategyType::Butterfly
        | StrategyType::Straddle
        | StrategyType::Strangle
        | StrategyType::Custom => Err(InferenceError::UnsupportedStrategy { strategy }),
    }
}

/// Parse every leg symbol, failing on the first non-option identifier.
fn parse_legs(legs: &[LegRecord]) -> Result<Vec<(&LegRecord, OccSymbol)>, InferenceError> {
    legs.iter()
        .map(|leg| {
            OccSymbol::parse(&leg.symbol)
                .map(|parsed| (leg, parsed))
                .ok_or_else(|| InferenceError::UnparseableSymbol {
                    symbol: leg.symbol.clone(),
                })
        })
        .collect()
}

/// Net entry credit and (when complete) net exit debit over assigned legs.
///
/// Entry: sold legs contribute +entry, bought legs -entry. Exit is the
/// mirror image: sold legs cost +exit to buy back, bought legs return -exit
/// when sold. The exit total stays `None` unless every leg has an exit
/// price; "not yet known" and "known to be zero" must remain distinct.
fn net_totals(legs: &[InferredLeg]) -> (Decimal, Option<Decimal>) {
    let net_entry_credit = legs
        .iter()
        .map(|leg| match leg.open_side {
            OpenSide::SellToOpen => leg.entry_price,
            OpenSide::BuyToOpen => -leg.entry_price,
        })
        .sum();

    let net_exit_debit = legs
        .iter()
        .map(|leg| {
            leg.exit_price.map(|exit| match leg.open_side {
                OpenSide::SellToOpen => exit,
                OpenSide::BuyToOpen => -exit,
            })
        })
        .sum::<Option<Decimal>>();

    (net_entry_credit, net_exit_debit)
}

fn infer_iron_condor(
    legs: &[LegRecord],
    strategy: StrategyType,
) -> Result<LegInference, InferenceError> {
    if legs.len() != 4 {
        return Err(InferenceError::LegCountMismatch {
            strategy,
            expected: 4,
            actual: legs.len(),
        });
    }

    let parsed = parse_legs(legs)?;

    let mut calls: Vec<_> = parsed.iter().filter(|(_, p)| p.is_call()).collect();
    let mut puts: Vec<_> = parsed.iter().filter(|(_, p)| p.is_put()).collect();
    if calls.len() != 2 || puts.len() != 2 {
        return Err(InferenceError::KindSplitMismatch {
            calls: calls.len(),
            puts: puts.len(),
        });
    }

    calls.sort_by_key(|(_, p)| p.strike);
    puts.sort_by_key(|(_, p)| p.strike);

    // Canonical short-condor construction: sell the inner strikes, buy the
    // outer wings. Lower call and higher put are the sold legs.
    let assigned = vec![
        assign(calls[0], OpenSide::SellToOpen),
        assign(calls[1], OpenSide::BuyToOpen),
        assign(puts[0], OpenSide::BuyToOpen),
        assign(puts[1], OpenSide::SellToOpen),
    ];

    let (net_entry_credit, net_exit_debit) = net_totals(&assigned);
    debug!(
        strategy = %strategy,
        net_entry_credit = %net_entry_credit,
        "Assigned iron-condor leg sides"
    );

    Ok(LegInference {
        legs: assigned,
        net_entry_credit,
        net_exit_debit,
    })
}

fn infer_credit_spread(
    legs: &[LegRecord],
    strategy: StrategyType,
    spread_kind: OptionKind,
) -> Result<LegInference, InferenceError> {
    if legs.len() != 2 {
        return Err(InferenceError::LegCountMismatch {
            strategy,
            expected: 2,
            actual: legs.len(),
        });
    }

    let mut parsed = parse_legs(legs)?;
    parsed.sort_by_key(|(_, p)| p.strike);

    // Call convention sells the lower strike; put convention sells the
    // higher strike. In both cases the sold leg is the one nearer the money.
    let (low_side, high_side) = match spread_kind {
        OptionKind::Call => (OpenSide::SellToOpen, OpenSide::BuyToOpen),
        OptionKind::Put => (OpenSide::BuyToOpen, OpenSide::SellToOpen),
    };

    let assigned = vec![
        assign(&parsed[0], low_side),
        assign(&parsed[1], high_side),
    ];

    let (net_entry_credit, net_exit_debit) = net_totals(&assigned);
    debug!(
        strategy = %strategy,
        net_entry_credit = %net_entry_credit,
        "Assigned credit-spread leg sides"
    );

    Ok(LegInference {
        legs: assigned,
        net_entry_credit,
        net_exit_debit,
    })
}

fn assign(leg: &(&LegRecord, OccSymbol), open_side: OpenSide) -> InferredLeg {
    let (record, parsed) = leg;
    InferredLeg::assign(record, open_side, parsed.kind, parsed.strike)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::types::CloseSide;
    use rust_decimal_macros::dec;

    fn condor_legs() -> Vec<LegRecord> {
        vec![
            LegRecord::new("SPY260115C00440000", dec!(1.20)),
            LegRecord::new("SPY260115C00460000", dec!(0.40)),
            LegRecord::new("SPY260115P00400000", dec!(1.00)),
            LegRecord::new("SPY260115P00380000", dec!(0.30)),
        ]
    }

    fn leg_for<'a>(inference: &'a LegInference, symbol: &str) -> &'a InferredLeg {
        inference
            .legs
            .iter()
            .find(|l| l.symbol == symbol)
            .expect("leg present")
    }

    #[test]
    fn iron_condor_canonical_assignment() {
        let inference = infer_leg_sides(&condor_legs(), StrategyType::IronCondor).unwrap();

        assert_eq!(
            leg_for(&inference, "SPY260115C00440000").open_side,
            OpenSide::SellToOpen
        );
        assert_eq!(
            leg_for(&inference, "SPY260115C00460000").open_side,
            OpenSide::BuyToOpen
        );
        assert_eq!(
            leg_for(&inference, "SPY260115P00380000").open_side,
            OpenSide::BuyToOpen
        );
        assert_eq!(
            leg_for(&inference, "SPY260115P00400000").open_side,
            OpenSide::SellToOpen
        );
    }

    #[test]
    fn iron_condor_assignment_is_input_order_independent() {
        let mut legs = condor_legs();
        legs.reverse();
        let reversed = infer_leg_sides(&legs, StrategyType::IronCondor).unwrap();
        let forward = infer_leg_sides(&condor_legs(), StrategyType::IronCondor).unwrap();

        for leg in &forward.legs {
            assert_eq!(
                leg_for(&reversed, &leg.symbol).open_side,
                leg.open_side,
                "assignment changed for {}",
                leg.symbol
            );
        }
        assert_eq!(forward.net_entry_credit, reversed.net_entry_credit);
    }

    #[test]
    fn iron_condor_net_entry_credit() {
        // (1.20 + 1.00) - (0.40 + 0.30) = 1.50
        let inference = infer_leg_sides(&condor_legs(), StrategyType::IronCondor).unwrap();
        assert_eq!(inference.net_entry_credit, dec!(1.50));
        assert!(inference.net_exit_debit.is_none());
    }

    #[test]
    fn iron_condor_net_exit_debit_requires_all_exits() {
        let mut legs = condor_legs();
        for leg in legs.iter_mut().take(3) {
            leg.exit_price = Some(dec!(0.50));
        }
        // One leg still missing an exit: debit stays unknown
        let inference = infer_leg_sides(&legs, StrategyType::IronCondor).unwrap();
        assert!(inference.net_exit_debit.is_none());

        legs[3].exit_price = Some(dec!(0.10));
        let inference = infer_leg_sides(&legs, StrategyType::IronCondor).unwrap();
        // Sold legs (call 440, put 400) cost 0.50 each to buy back; bought
        // legs (call 460 at 0.50, put 380 at 0.10) return their exits.
        assert_eq!(inference.net_exit_debit, Some(dec!(0.40)));
    }

    #[test]
    fn iron_condor_zero_exit_is_known_not_missing() {
        let mut legs = condor_legs();
        for leg in &mut legs {
            leg.exit_price = Some(Decimal::ZERO);
        }
        let inference = infer_leg_sides(&legs, StrategyType::IronCondor).unwrap();
        assert_eq!(inference.net_exit_debit, Some(Decimal::ZERO));
    }

    #[test]
    fn iron_condor_wrong_leg_count() {
        let legs = condor_legs();
        let err = infer_leg_sides(&legs[..3], StrategyType::IronCondor).unwrap_err();

        assert_eq!(
            err,
            InferenceError::LegCountMismatch {
                strategy: StrategyType::IronCondor,
                expected: 4,
                actual: 3,
            }
        );
        let message = err.to_string();
        assert!(message.contains('4') && message.contains('3'));
    }

    #[test]
    fn iron_condor_unparseable_symbol() {
        let mut legs = condor_legs();
        legs[2].symbol = "SPY".to_string();
        let err = infer_leg_sides(&legs, StrategyType::IronCondor).unwrap_err();

        assert!(matches!(
            err,
            InferenceError::UnparseableSymbol { ref symbol } if symbol == "SPY"
        ));
    }

    #[test]
    fn iron_condor_kind_split_mismatch() {
        let legs = vec![
            LegRecord::new("SPY260115C00440000", dec!(1.20)),
            LegRecord::new("SPY260115C00450000", dec!(0.80)),
            LegRecord::new("SPY260115C00460000", dec!(0.40)),
            LegRecord::new("SPY260115P00400000", dec!(1.00)),
        ];
        let err = infer_leg_sides(&legs, StrategyType::IronCondor).unwrap_err();
        assert_eq!(
            err,
            InferenceError::KindSplitMismatch { calls: 3, puts: 1 }
        );
    }

    #[test]
    fn iron_fly_uses_condor_shape() {
        // Iron fly: inner strikes converge; same canonical assignment
        let legs = vec![
            LegRecord::new("SPY260115C00420000", dec!(5.00)),
            LegRecord::new("SPY260115C00440000", dec!(1.00)),
            LegRecord::new("SPY260115P00420000", dec!(5.10)),
            LegRecord::new("SPY260115P00400000", dec!(1.10)),
        ];
        let inference = infer_leg_sides(&legs, StrategyType::IronFly).unwrap();

        assert_eq!(
            leg_for(&inference, "SPY260115C00420000").open_side,
            OpenSide::SellToOpen
        );
        assert_eq!(
            leg_for(&inference, "SPY260115P00420000").open_side,
            OpenSide::SellToOpen
        );
        assert_eq!(inference.net_entry_credit, dec!(8.00));
    }

    #[test]
    fn credit_call_spread_sells_lower_strike() {
        let legs = vec![
            LegRecord::new("QQQ250321C00450000", dec!(2.00)),
            LegRecord::new("QQQ250321C00440000", dec!(3.10)),
        ];
        let inference = infer_leg_sides(&legs, StrategyType::CreditCallSpread).unwrap();

        let low = leg_for(&inference, "QQQ250321C00440000");
        let high = leg_for(&inference, "QQQ250321C00450000");
        assert_eq!(low.open_side, OpenSide::SellToOpen);
        assert_eq!(high.open_side, OpenSide::BuyToOpen);
        assert_eq!(inference.net_entry_credit, dec!(1.10));
    }

    #[test]
    fn credit_put_spread_sells_higher_strike() {
        let legs = vec![
            LegRecord::new("QQQ250321P00400000", dec!(1.80)),
            LegRecord::new("QQQ250321P00390000", dec!(1.20)),
        ];
        let inference = infer_leg_sides(&legs, StrategyType::CreditPutSpread).unwrap();

        let low = leg_for(&inference, "QQQ250321P00390000");
        let high = leg_for(&inference, "QQQ250321P00400000");
        assert_eq!(low.open_side, OpenSide::BuyToOpen);
        assert_eq!(high.open_side, OpenSide::SellToOpen);
        assert_eq!(inference.net_entry_credit, dec!(0.60));
    }

    #[test]
    fn credit_spread_exit_debit() {
        let legs = vec![
            LegRecord::new("QQQ250321P00400000", dec!(1.80)).with_exit_price(dec!(0.90)),
            LegRecord::new("QQQ250321P00390000", dec!(1.20)).with_exit_price(dec!(0.50)),
        ];
        let inference = infer_leg_sides(&legs, StrategyType::CreditPutSpread).unwrap();
        // Buy back the sold 400 put at 0.90, sell out the bought 390 put at 0.50
        assert_eq!(inference.net_exit_debit, Some(dec!(0.40)));
    }

    #[test]
    fn credit_spread_wrong_leg_count() {
        let legs = vec![LegRecord::new("QQQ250321P00400000", dec!(1.80))];
        let err = infer_leg_sides(&legs, StrategyType::CreditPutSpread).unwrap_err();
        assert_eq!(
            err,
            InferenceError::LegCountMismatch {
                strategy: StrategyType::CreditPutSpread,
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn credit_spread_records_parsed_kind_verbatim() {
        // A "call spread" containing a put: the parsed kind is recorded
        // as-is, leaving the mismatch visible to the caller
        let legs = vec![
            LegRecord::new("QQQ250321C00450000", dec!(2.00)),
            LegRecord::new("QQQ250321P00440000", dec!(3.10)),
        ];
        let inference = infer_leg_sides(&legs, StrategyType::CreditCallSpread).unwrap();

        assert_eq!(
            leg_for(&inference, "QQQ250321P00440000").kind,
            OptionKind::Put
        );
    }

    #[test]
    fn unsupported_strategy_types_fail() {
        let legs = condor_legs();
        for strategy in [
            StrategyType::Butterfly,
            StrategyType::Straddle,
            StrategyType::Strangle,
            StrategyType::Custom,
        ] {
            let err = infer_leg_sides(&legs, strategy).unwrap_err();
            assert_eq!(err, InferenceError::UnsupportedStrategy { strategy });
            assert!(err.to_string().contains("Unsupported strategy type"));
        }
    }

    #[test]
    fn empty_legs_fail_before_dispatch() {
        assert_eq!(
            infer_leg_sides(&[], StrategyType::IronCondor).unwrap_err(),
            InferenceError::MissingLegs
        );
        assert_eq!(
            infer_leg_sides(&[], StrategyType::Custom).unwrap_err(),
            InferenceError::MissingLegs
        );
    }

    #[test]
    fn close_side_is_always_inverse_of_open_side() {
        let inference = infer_leg_sides(&condor_legs(), StrategyType::IronCondor).unwrap();
        for leg in &inference.legs {
            assert_eq!(leg.close_side, leg.open_side.closing());
            match leg.open_side {
                OpenSide::SellToOpen => assert_eq!(leg.close_side, CloseSide::BuyToClose),
                OpenSide::BuyToOpen => assert_eq!(leg.close_side, CloseSide::SellToClose),
            }
        }
    }

    #[test]
    fn inference_is_idempotent() {
        let legs = condor_legs();
        assert_eq!(
            infer_leg_sides(&legs, StrategyType::IronCondor).unwrap(),
            infer_leg_sides(&legs, StrategyType::IronCondor).unwrap()
        );
    }
}
