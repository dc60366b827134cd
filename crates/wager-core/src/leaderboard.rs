//! Tenant-wide leaderboard over cached user statistics, memoized with a
//! TTL. Recomputing the ranking scans every stats row in the community, the
//! most expensive repeated read in the system; the cache trades up to one
//! hour of staleness for skipping that scan on every view.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use deadpool_diesel::postgres::Pool;
use moka::sync::Cache;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::EngineError;
use wager_db::WagerPool;
use wager_db::models::{User, UserStats};
use wager_db::types::Timeframe;

/// Eligibility floor: users need this many settled bets to be ranked.
pub const MIN_LEADERBOARD_BETS: i32 = 10;

/// Fixed snapshot lifetime.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

const MAX_CACHED_BOARDS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardKey {
    pub community_id: String,
    pub timeframe: Timeframe,
    pub sport: Option<String>,
    pub bet_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankedEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub external_user_id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_verified: bool,
    pub is_capper: bool,
    pub total_bets: i32,
    pub win_rate: Decimal,
    pub roi: Decimal,
    pub net_profit: Decimal,
    pub current_streak: i32,
}

/// An immutable ranking computed at one instant. Snapshots are re-derivable
/// at any time, so evicting or overwriting one is always safe.
#[derive(Debug, Clone)]
pub struct LeaderboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RankedEntry>,
}

/// The ranking handed back to callers, flagged with whether it was served
/// from cache and when it was originally generated.
#[derive(Debug, Clone)]
pub struct LeaderboardView {
    pub cached: bool,
    pub snapshot: Arc<LeaderboardSnapshot>,
}

/// TTL-bounded memo of computed rankings. Concurrent misses on the same key
/// may each compute and store; last-writer-wins is fine for pure snapshots.
pub struct LeaderboardCache {
    inner: Cache<LeaderboardKey, Arc<LeaderboardSnapshot>>,
}

impl LeaderboardCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CACHED_BOARDS)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn lookup(&self, key: &LeaderboardKey) -> Option<Arc<LeaderboardSnapshot>> {
        self.inner.get(key)
    }

    pub fn store(&self, key: LeaderboardKey, snapshot: Arc<LeaderboardSnapshot>) {
        self.inner.insert(key, snapshot);
    }
}

/// Assign dense ranks over rows already sorted by ROI descending. The sort
/// is stable upstream, so ties keep their query order; there is no further
/// tie-break rule. Rows under the eligibility floor never rank.
pub fn rank_rows(rows: Vec<(UserStats, User)>) -> Vec<RankedEntry> {
    rows.into_iter()
        .filter(|(stats, _)| stats.total_bets >= MIN_LEADERBOARD_BETS)
        .enumerate()
        .map(|(i, (stats, user))| RankedEntry {
            rank: i + 1,
            user_id: user.id,
            external_user_id: user.external_user_id,
            username: user.username,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            is_verified: user.is_verified,
            is_capper: user.is_capper,
            total_bets: stats.total_bets,
            win_rate: stats.win_rate,
            roi: stats.roi,
            net_profit: stats.net_profit,
            current_streak: stats.current_streak,
        })
        .collect()
}

pub struct LeaderboardRanker {
    pool: Pool,
    cache: LeaderboardCache,
}

impl LeaderboardRanker {
    pub fn new(pool: Pool) -> Self {
        Self::with_ttl(pool, CACHE_TTL)
    }

    pub fn with_ttl(pool: Pool, ttl: Duration) -> Self {
        Self {
            pool,
            cache: LeaderboardCache::new(ttl),
        }
    }

    /// Ranked view for one community and window. Served from cache when a
    /// live snapshot exists; recomputed, stored and returned otherwise.
    pub async fn get_leaderboard(
        &self,
        community_id: &str,
        timeframe: Timeframe,
        sport: Option<String>,
        bet_type: Option<String>,
        limit: i64,
    ) -> Result<LeaderboardView, EngineError> {
        if limit <= 0 {
            return Err(EngineError::invalid_input("limit must be positive"));
        }

        let key = LeaderboardKey {
            community_id: community_id.to_string(),
            timeframe,
            sport,
            bet_type,
        };

        if let Some(snapshot) = self.cache.lookup(&key) {
            tracing::debug!(
                community_id,
                timeframe = timeframe.as_str(),
                generated_at = %snapshot.generated_at,
                "Leaderboard served from cache"
            );
            return Ok(LeaderboardView {
                cached: true,
                snapshot,
            });
        }

        let now = Utc::now();
        let cutoff = timeframe.cutoff(now);
        let community = key.community_id.clone();
        let rows = self
            .pool
            .interact_with_context("compute leaderboard".into(), move |conn| {
                UserStats::find_leaderboard_rows(
                    &community,
                    cutoff,
                    MIN_LEADERBOARD_BETS,
                    limit,
                    conn,
                )
            })
            .await
            .map_err(|e| EngineError::from_db(e, "leaderboard"))?;

        let snapshot = Arc::new(LeaderboardSnapshot {
            generated_at: now,
            entries: rank_rows(rows),
        });
        self.cache.store(key, snapshot.clone());

        tracing::debug!(
            community_id,
            timeframe = timeframe.as_str(),
            entries = snapshot.entries.len(),
            "Leaderboard recomputed"
        );
        Ok(LeaderboardView {
            cached: false,
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stats_row(total_bets: i32, roi: Decimal) -> (UserStats, User) {
        let user_id = Uuid::new_v4();
        (
            UserStats {
                id: Uuid::new_v4(),
                user_id,
                community_id: "community".to_string(),
                total_bets,
                wins: total_bets / 2,
                losses: total_bets - total_bets / 2,
                pushes: 0,
                pending: 0,
                win_rate: dec!(50),
                roi,
                net_profit: roi,
                current_streak: 1,
                units_won: dec!(1),
                updated_at: Utc::now(),
            },
            User {
                id: user_id,
                external_user_id: format!("ext_{user_id}"),
                community_id: "community".to_string(),
                username: "someone".to_string(),
                display_name: "Someone".to_string(),
                avatar_url: None,
                is_capper: false,
                is_verified: false,
                is_active: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        )
    }

    #[test]
    fn ranks_are_dense_and_follow_input_order() {
        let rows = vec![
            stats_row(20, dec!(40)),
            stats_row(15, dec!(25)),
            stats_row(12, dec!(25)),
        ];
        let second_id = rows[1].1.id;
        let third_id = rows[2].1.id;

        let entries = rank_rows(rows);
        assert_eq!(
            entries.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        // Tied ROI keeps the stable input order.
        assert_eq!(entries[1].user_id, second_id);
        assert_eq!(entries[2].user_id, third_id);
    }

    #[test]
    fn nine_settled_bets_never_rank() {
        let entries = rank_rows(vec![stats_row(9, dec!(500)), stats_row(10, dec!(1))]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_bets, 10);
        assert_eq!(entries[0].rank, 1);
    }

    #[test]
    fn cache_returns_original_snapshot_within_ttl() {
        let cache = LeaderboardCache::new(Duration::from_secs(60));
        let key = LeaderboardKey {
            community_id: "community".to_string(),
            timeframe: Timeframe::Weekly,
            sport: None,
            bet_type: None,
        };
        let snapshot = Arc::new(LeaderboardSnapshot {
            generated_at: Utc::now(),
            entries: rank_rows(vec![stats_row(10, dec!(12))]),
        });
        cache.store(key.clone(), snapshot.clone());

        let hit = cache.lookup(&key).expect("entry should still be live");
        assert_eq!(hit.generated_at, snapshot.generated_at);
        assert_eq!(hit.entries.len(), 1);
        assert_eq!(hit.entries[0].roi, snapshot.entries[0].roi);
    }

    #[test]
    fn cache_misses_after_expiry_and_on_different_keys() {
        let cache = LeaderboardCache::new(Duration::from_millis(50));
        let key = LeaderboardKey {
            community_id: "community".to_string(),
            timeframe: Timeframe::Daily,
            sport: Some("nba".to_string()),
            bet_type: None,
        };
        cache.store(
            key.clone(),
            Arc::new(LeaderboardSnapshot {
                generated_at: Utc::now(),
                entries: Vec::new(),
            }),
        );

        let other_sport = LeaderboardKey {
            sport: Some("nfl".to_string()),
            ..key.clone()
        };
        assert!(cache.lookup(&other_sport).is_none());

        std::thread::sleep(Duration::from_millis(80));
        assert!(cache.lookup(&key).is_none());
    }
}
