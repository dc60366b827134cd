//! Settlement coordination: the one-way `pending -> {won, lost, push}`
//! transition for bets and picks, plus the fan-out to statistics and the
//! bankroll ledger.
//!
//! The terminal transition is the primary fact and must be serialized by the
//! storage layer (update-if-pending). The two side effects are deliberately
//! best-effort and unordered: each is individually atomic and idempotent, so
//! a failure in either leaves a self-healing derived cache, never corrupt
//! financial history.

use std::sync::Arc;

use chrono::Utc;
use deadpool_diesel::postgres::Pool;
use diesel::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineError;
use crate::ledger::BankrollLedger;
use crate::odds;
use crate::stats::StatsAggregator;
use wager_db::WagerPool;
use wager_db::models::{Bet, Pick, PickFollow};
use wager_db::types::BetResult;

pub struct SettlementCoordinator {
    pool: Pool,
    stats: Arc<StatsAggregator>,
    ledger: Arc<BankrollLedger>,
}

/// What the bettor gets back for a terminal result: stake plus profit on a
/// win, the bare stake on a push, nothing on a loss.
pub fn actual_return_for(result: BetResult, stake: Decimal, potential_return: Decimal) -> Decimal {
    match result {
        BetResult::Won => potential_return + stake,
        BetResult::Push => stake,
        BetResult::Lost | BetResult::Pending => Decimal::ZERO,
    }
}

impl SettlementCoordinator {
    pub fn new(pool: Pool, stats: Arc<StatsAggregator>, ledger: Arc<BankrollLedger>) -> Self {
        Self {
            pool,
            stats,
            ledger,
        }
    }

    /// Settle a bet. Validation and ownership failures abort with no
    /// partial effect; losing the transition race to a concurrent settlement
    /// surfaces as `AlreadySettled`.
    pub async fn settle_bet(
        &self,
        bet_id: Uuid,
        caller_user_id: Uuid,
        community_id: &str,
        result: BetResult,
    ) -> Result<Bet, EngineError> {
        if !result.is_terminal() {
            return Err(EngineError::invalid_input(
                "result must be won, lost or push",
            ));
        }

        let community = community_id.to_string();
        let settled = self
            .pool
            .interact_with_context("settle bet".into(), move |conn| {
                let bet = Bet::find_by_id_scoped(bet_id, &community, conn)?;
                if bet.user_id != caller_user_id {
                    return Ok(SettleOutcome::NotOwner);
                }
                let actual_return = actual_return_for(result, bet.stake, bet.potential_return);
                let updated =
                    Bet::settle_if_pending(bet_id, result, actual_return, Utc::now(), conn)?;
                Ok::<_, diesel::result::Error>(match updated {
                    Some(bet) => SettleOutcome::Settled(bet),
                    None => SettleOutcome::Raced,
                })
            })
            .await
            .map_err(|e| EngineError::from_db(e, "bet"))?;

        let bet = settled.into_result(
            &format!("bet {bet_id}"),
            "bet belongs to a different user",
        )?;

        tracing::info!(
            bet_id = %bet.id,
            user_id = %bet.user_id,
            result = result.as_str(),
            actual_return = %bet.actual_return,
            "Bet settled"
        );

        self.fan_out(&bet, result).await;
        Ok(bet)
    }

    /// Post-commit side effects. Failures here are logged and swallowed:
    /// stats and ledger are derived state, reconciled by the next recompute
    /// or replay. A user without an active bankroll is expected.
    async fn fan_out(&self, bet: &Bet, result: BetResult) {
        if let Err(e) = self.stats.recompute(bet.user_id, &bet.community_id).await {
            tracing::error!(
                bet_id = %bet.id,
                user_id = %bet.user_id,
                error = %e,
                "Stats recompute after settlement failed"
            );
        }

        match self.ledger.apply_settlement(bet, result).await {
            Ok(_) => {}
            Err(EngineError::NoActiveBankroll(user_id)) => {
                tracing::info!(bet_id = %bet.id, %user_id, "No active bankroll, settlement not posted to ledger");
            }
            Err(e) => {
                tracing::error!(
                    bet_id = %bet.id,
                    user_id = %bet.user_id,
                    error = %e,
                    "Ledger update after settlement failed"
                );
            }
        }
    }

    /// Settle a capper's pick and cascade the outcome onto every follower's
    /// recorded tail, using each follower's own stake and odds.
    pub async fn settle_pick(
        &self,
        pick_id: Uuid,
        caller_user_id: Uuid,
        community_id: &str,
        result: BetResult,
        actual_odds_american: Option<i32>,
    ) -> Result<Pick, EngineError> {
        if !result.is_terminal() {
            return Err(EngineError::invalid_input(
                "result must be won, lost or push",
            ));
        }

        let community = community_id.to_string();
        let outcome = self
            .pool
            .interact_with_context("settle pick".into(), move |conn| {
                let pick = Pick::find_by_id_scoped(pick_id, &community, conn)?;
                if pick.capper_id != caller_user_id {
                    return Ok(SettleOutcome::NotOwner);
                }

                let graded_odds = actual_odds_american.unwrap_or(pick.odds_american);
                let roi = pick_roi(result, graded_odds);

                conn.transaction(|conn| {
                    let Some(pick) = Pick::settle_if_pending(
                        pick_id,
                        result,
                        actual_odds_american,
                        roi,
                        Utc::now(),
                        conn,
                    )?
                    else {
                        return Ok(SettleOutcome::Raced);
                    };

                    // Cascade: same result, profit/loss from the follower's
                    // recorded figures, all-or-nothing with the pick itself.
                    for follow in PickFollow::find_by_pick(pick_id, conn)? {
                        let profit_loss =
                            follow_profit_loss(result, follow.stake, follow.odds_american);
                        PickFollow::apply_outcome(follow.id, result, profit_loss, conn)?;
                    }
                    Ok::<_, diesel::result::Error>(SettleOutcome::Settled(pick))
                })
            })
            .await
            .map_err(|e| EngineError::from_db(e, "pick"))?;

        let pick = outcome.into_result(
            &format!("pick {pick_id}"),
            "only the pick's capper may settle it",
        )?;

        tracing::info!(
            pick_id = %pick.id,
            capper_id = %pick.capper_id,
            result = result.as_str(),
            roi = %pick.roi,
            "Pick settled and cascaded to followers"
        );

        // Best-effort, same policy as bet settlement.
        if let Err(e) = self
            .stats
            .recompute(pick.capper_id, &pick.community_id)
            .await
        {
            tracing::error!(
                pick_id = %pick.id,
                capper_id = %pick.capper_id,
                error = %e,
                "Stats recompute after pick settlement failed"
            );
        }

        Ok(pick)
    }
}

enum SettleOutcome<T> {
    Settled(T),
    NotOwner,
    Raced,
}

impl<T> SettleOutcome<T> {
    /// Map a failed ownership check or a lost transition race onto the
    /// caller-facing errors. `what` names the record being settled, `denied`
    /// is the refusal message for a non-owner.
    fn into_result(self, what: &str, denied: &str) -> Result<T, EngineError> {
        match self {
            Self::Settled(record) => Ok(record),
            Self::NotOwner => Err(EngineError::Forbidden(denied.to_string())),
            Self::Raced => Err(EngineError::AlreadySettled(what.to_string())),
        }
    }
}

/// A pick's realized return is odds-derived: the payout ratio of the graded
/// odds on a win, -100% on a loss, flat on a push. Odds of 0 cannot be
/// recorded, so the ratio is total here.
fn pick_roi(result: BetResult, graded_odds: i32) -> Decimal {
    match result {
        BetResult::Won => odds::payout_ratio(graded_odds).unwrap_or(Decimal::ZERO),
        BetResult::Lost => -Decimal::ONE,
        BetResult::Push | BetResult::Pending => Decimal::ZERO,
    }
}

/// Dollar profit or loss for one follower's tail of a settled pick.
fn follow_profit_loss(result: BetResult, stake: Decimal, odds_american: i32) -> Decimal {
    match result {
        BetResult::Won => odds::potential_return(stake, odds_american).unwrap_or(Decimal::ZERO),
        BetResult::Lost => -stake,
        BetResult::Push | BetResult::Pending => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn actual_return_per_result() {
        assert_eq!(
            actual_return_for(BetResult::Won, dec!(100), dec!(90.91)),
            dec!(190.91)
        );
        assert_eq!(
            actual_return_for(BetResult::Push, dec!(100), dec!(90.91)),
            dec!(100)
        );
        assert_eq!(
            actual_return_for(BetResult::Lost, dec!(100), dec!(90.91)),
            Decimal::ZERO
        );
    }

    #[test]
    fn pick_roi_uses_graded_odds() {
        assert_eq!(pick_roi(BetResult::Won, 150), dec!(1.5));
        assert_eq!(pick_roi(BetResult::Won, -110), dec!(100) / dec!(110));
        assert_eq!(pick_roi(BetResult::Lost, 150), dec!(-1));
        assert_eq!(pick_roi(BetResult::Push, 150), Decimal::ZERO);
    }

    #[test]
    fn lost_transition_race_reads_as_already_settled() {
        let outcome: SettleOutcome<()> = SettleOutcome::Raced;
        match outcome.into_result("bet 7", "bet belongs to a different user") {
            Err(EngineError::AlreadySettled(what)) => assert_eq!(what, "bet 7"),
            other => panic!("expected AlreadySettled, got {other:?}"),
        }
    }

    #[test]
    fn non_owner_settlement_is_forbidden() {
        let outcome: SettleOutcome<()> = SettleOutcome::NotOwner;
        match outcome.into_result("pick 7", "only the pick's capper may settle it") {
            Err(EngineError::Forbidden(msg)) => {
                assert_eq!(msg, "only the pick's capper may settle it");
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn won_transition_passes_the_record_through() {
        let outcome = SettleOutcome::Settled(7u32);
        assert_eq!(outcome.into_result("bet 7", "denied").unwrap(), 7);
    }

    #[test]
    fn follower_outcome_uses_follower_figures() {
        // follower tailed with 50 at +120, capper's odds are irrelevant
        assert_eq!(
            follow_profit_loss(BetResult::Won, dec!(50), 120),
            dec!(60.00)
        );
        assert_eq!(follow_profit_loss(BetResult::Lost, dec!(50), 120), dec!(-50));
        assert_eq!(
            follow_profit_loss(BetResult::Push, dec!(50), 120),
            Decimal::ZERO
        );
    }
}
