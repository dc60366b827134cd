//! American-odds arithmetic. Pure, `Decimal`-exact, no storage access.

use rust_decimal::Decimal;

use crate::error::EngineError;
use wager_db::types::BetResult;

/// Profit per unit staked for the given American odds.
///
/// Positive odds X: a 100-unit stake returns X profit. Negative odds -X:
/// an X-unit stake returns 100 profit. Zero odds are meaningless.
pub fn payout_ratio(odds_american: i32) -> Result<Decimal, EngineError> {
    if odds_american == 0 {
        return Err(EngineError::invalid_input("american odds cannot be 0"));
    }
    let hundred = Decimal::ONE_HUNDRED;
    if odds_american > 0 {
        Ok(Decimal::from(odds_american) / hundred)
    } else {
        Ok(hundred / Decimal::from(odds_american.unsigned_abs()))
    }
}

/// Profit (excluding the returned stake) if the bet wins, rounded to cents.
pub fn potential_return(stake: Decimal, odds_american: i32) -> Result<Decimal, EngineError> {
    Ok((stake * payout_ratio(odds_american)?).round_dp(2))
}

/// Profit expressed as a multiple of the stake ("units"), decoupling
/// dollar amounts from unit size.
pub fn units_on_win(stake: Decimal, odds_american: i32) -> Result<Decimal, EngineError> {
    if stake <= Decimal::ZERO {
        return Err(EngineError::invalid_input("stake must be positive"));
    }
    Ok(potential_return(stake, odds_american)? / stake)
}

/// Realized return on a settled bet: won yields the profit fraction, a loss
/// is always -100%, a push is flat.
pub fn roi_on_settled(result: BetResult, stake: Decimal, actual_return: Decimal) -> Decimal {
    match result {
        BetResult::Won => {
            if stake.is_zero() {
                Decimal::ZERO
            } else {
                (actual_return - stake) / stake
            }
        }
        BetResult::Lost => -Decimal::ONE,
        BetResult::Push | BetResult::Pending => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn payout_ratio_positive_odds() {
        assert_eq!(payout_ratio(150).unwrap(), dec!(1.5));
        assert_eq!(payout_ratio(100).unwrap(), dec!(1));
    }

    #[test]
    fn payout_ratio_negative_odds() {
        assert_eq!(payout_ratio(-200).unwrap(), dec!(0.5));
        assert_eq!(payout_ratio(-100).unwrap(), dec!(1));
    }

    #[test]
    fn zero_odds_are_rejected() {
        assert!(matches!(
            payout_ratio(0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            potential_return(dec!(100), 0),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn potential_return_rounds_to_cents() {
        // stake=100 at -110 is the canonical juice line
        assert_eq!(potential_return(dec!(100), -110).unwrap(), dec!(90.91));
        assert_eq!(potential_return(dec!(50), 150).unwrap(), dec!(75.00));
    }

    #[test]
    fn units_on_win_normalizes_stake() {
        assert_eq!(units_on_win(dec!(100), -110).unwrap(), dec!(0.9091));
        assert_eq!(units_on_win(dec!(25), 100).unwrap(), dec!(1));
        assert!(units_on_win(dec!(0), 100).is_err());
    }

    #[test]
    fn roi_on_settled_results() {
        // won at -110: actual return 190.91 on a 100 stake
        assert_eq!(
            roi_on_settled(BetResult::Won, dec!(100), dec!(190.91)),
            dec!(0.9091)
        );
        assert_eq!(
            roi_on_settled(BetResult::Lost, dec!(100), Decimal::ZERO),
            dec!(-1)
        );
        assert_eq!(
            roi_on_settled(BetResult::Push, dec!(100), dec!(100)),
            Decimal::ZERO
        );
    }
}
