//! Statistics recomputation. The `user_stats` row is a pure cache: every
//! recompute derives all aggregates from the user's bet rows from scratch,
//! so calling it redundantly (after every settlement) is always safe and
//! always converges to the same values.

use chrono::Utc;
use deadpool_diesel::postgres::Pool;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineError;
use crate::odds;
use wager_db::WagerPool;
use wager_db::models::{Bet, NewUserStats, UserStats};
use wager_db::types::BetResult;

pub struct StatsAggregator {
    pool: Pool,
}

/// All derived aggregates for one user, prior to persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_bets: i32,
    pub wins: i32,
    pub losses: i32,
    pub pushes: i32,
    pub pending: i32,
    pub win_rate: Decimal,
    pub roi: Decimal,
    pub net_profit: Decimal,
    pub current_streak: i32,
    pub units_won: Decimal,
}

/// Derive the full snapshot from settled bets (in settlement order, oldest
/// first) plus the count of still-pending bets. Pure and deterministic:
/// identical input rows produce an identical snapshot regardless of how
/// often or in what order recomputation runs.
pub fn compute_snapshot(settled: &[Bet], pending: i64) -> StatsSnapshot {
    let mut wins = 0i32;
    let mut losses = 0i32;
    let mut pushes = 0i32;
    let mut net_profit = Decimal::ZERO;
    let mut total_staked = Decimal::ZERO;
    let mut units_won = Decimal::ZERO;

    for bet in settled {
        total_staked += bet.stake;
        let Some(result) = BetResult::parse(&bet.result) else {
            continue;
        };
        units_won += odds::roi_on_settled(result, bet.stake, bet.actual_return);
        match result {
            BetResult::Won => {
                wins += 1;
                net_profit += bet.actual_return - bet.stake;
            }
            BetResult::Lost => {
                losses += 1;
                net_profit -= bet.stake;
            }
            BetResult::Push => pushes += 1,
            BetResult::Pending => {}
        }
    }

    let total_bets = settled.len() as i32;
    let win_rate = if total_bets == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(wins) / Decimal::from(total_bets) * Decimal::ONE_HUNDRED
    };
    let roi = if total_staked.is_zero() {
        Decimal::ZERO
    } else {
        net_profit / total_staked * Decimal::ONE_HUNDRED
    };

    StatsSnapshot {
        total_bets,
        wins,
        losses,
        pushes,
        pending: pending as i32,
        win_rate,
        roi,
        net_profit,
        current_streak: current_streak(settled),
        units_won,
    }
}

/// Scan backwards from the most recent settled bet, counting consecutive
/// wins. Pushes are transparent to the scan. A loss ends it: a loss at the
/// tail yields exactly -1 (a single loss resets the streak, it is never the
/// count of consecutive losses), while a loss behind one or more wins merely
/// terminates the win run.
fn current_streak(settled: &[Bet]) -> i32 {
    let mut streak = 0i32;
    for bet in settled.iter().rev() {
        match BetResult::parse(&bet.result) {
            Some(BetResult::Won) => streak += 1,
            Some(BetResult::Lost) => {
                if streak == 0 {
                    streak = -1;
                }
                break;
            }
            _ => {}
        }
    }
    streak
}

impl StatsAggregator {
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Recompute and upsert the stats row for one user. Authoritative and
    /// idempotent; this is the self-healing path for any divergence.
    pub async fn recompute(
        &self,
        user_id: Uuid,
        community_id: &str,
    ) -> Result<UserStats, EngineError> {
        let community = community_id.to_string();
        self.pool
            .interact_with_context("recompute user stats".into(), move |conn| {
                let settled = Bet::find_settled_chronological(user_id, &community, conn)?;
                let pending = Bet::count_pending(user_id, &community, conn)?;
                let snapshot = compute_snapshot(&settled, pending);

                UserStats::upsert(
                    &NewUserStats {
                        user_id,
                        community_id: community,
                        total_bets: snapshot.total_bets,
                        wins: snapshot.wins,
                        losses: snapshot.losses,
                        pushes: snapshot.pushes,
                        pending: snapshot.pending,
                        win_rate: snapshot.win_rate,
                        roi: snapshot.roi,
                        net_profit: snapshot.net_profit,
                        current_streak: snapshot.current_streak,
                        units_won: snapshot.units_won,
                        updated_at: Utc::now(),
                    },
                    conn,
                )
            })
            .await
            .map_err(|e| EngineError::from_db(e, "user stats"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use rust_decimal_macros::dec;

    fn settled_bet(seq: i64, result: BetResult, stake: Decimal, actual_return: Decimal) -> Bet {
        let t0: DateTime<Utc> = DateTime::UNIX_EPOCH;
        Bet {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            community_id: "community".to_string(),
            sport: "nba".to_string(),
            bet_type: "spread".to_string(),
            description: format!("bet {seq}"),
            odds_american: -110,
            stake,
            potential_return: dec!(0),
            actual_return,
            result: result.as_str().to_string(),
            sportsbook: None,
            game_date: None,
            notes: None,
            created_at: t0 + Duration::minutes(seq),
            settled_at: Some(t0 + Duration::hours(seq)),
        }
    }

    fn results(sequence: &[BetResult]) -> Vec<Bet> {
        sequence
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let actual = match r {
                    BetResult::Won => dec!(190.91),
                    BetResult::Push => dec!(100),
                    _ => dec!(0),
                };
                settled_bet(i as i64, *r, dec!(100), actual)
            })
            .collect()
    }

    #[test]
    fn empty_history_is_all_zeros() {
        let snapshot = compute_snapshot(&[], 0);
        assert_eq!(snapshot.total_bets, 0);
        assert_eq!(snapshot.win_rate, Decimal::ZERO);
        assert_eq!(snapshot.roi, Decimal::ZERO);
        assert_eq!(snapshot.current_streak, 0);
    }

    #[test]
    fn streak_survives_a_loss_behind_wins() {
        // oldest -> newest: W W L W, most recent win run has length 1
        use BetResult::{Lost, Won};
        let bets = results(&[Won, Won, Lost, Won]);
        assert_eq!(compute_snapshot(&bets, 0).current_streak, 1);
    }

    #[test]
    fn streak_counts_consecutive_wins() {
        use BetResult::Won;
        let bets = results(&[Won, Won, Won]);
        assert_eq!(compute_snapshot(&bets, 0).current_streak, 3);
    }

    #[test]
    fn single_loss_resets_streak_to_minus_one() {
        use BetResult::Lost;
        let bets = results(&[Lost]);
        assert_eq!(compute_snapshot(&bets, 0).current_streak, -1);
        // Multiple consecutive losses still read -1, never a loss count.
        let bets = results(&[Lost, Lost, Lost]);
        assert_eq!(compute_snapshot(&bets, 0).current_streak, -1);
    }

    #[test]
    fn pushes_are_transparent_to_the_streak_scan() {
        use BetResult::{Push, Won};
        let bets = results(&[Won, Won, Push]);
        assert_eq!(compute_snapshot(&bets, 0).current_streak, 2);
    }

    #[test]
    fn single_won_bet_at_minus_110() {
        use BetResult::Won;
        let bets = results(&[Won]);
        let snapshot = compute_snapshot(&bets, 0);
        assert_eq!(snapshot.net_profit, dec!(90.91));
        assert_eq!(snapshot.roi, dec!(90.91));
        assert_eq!(snapshot.units_won, dec!(0.9091));
        assert_eq!(snapshot.win_rate, dec!(100));
    }

    #[test]
    fn aggregates_across_mixed_results() {
        use BetResult::{Lost, Push, Won};
        let bets = results(&[Won, Lost, Push]);
        let snapshot = compute_snapshot(&bets, 2);
        assert_eq!(snapshot.total_bets, 3);
        assert_eq!(snapshot.wins, 1);
        assert_eq!(snapshot.losses, 1);
        assert_eq!(snapshot.pushes, 1);
        assert_eq!(snapshot.pending, 2);
        // net: +90.91 - 100; staked: 300
        assert_eq!(snapshot.net_profit, dec!(-9.09));
        assert_eq!(snapshot.roi, dec!(-3.03));
        assert_eq!(snapshot.units_won, dec!(-0.0909));
    }

    #[test]
    fn recomputation_is_idempotent() {
        use BetResult::{Lost, Won};
        let bets = results(&[Won, Lost, Won, Won]);
        let first = compute_snapshot(&bets, 1);
        let second = compute_snapshot(&bets, 1);
        assert_eq!(first, second);
    }
}
