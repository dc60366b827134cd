use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::User;
use crate::schema::{user_stats, users};

/// Cached aggregate of a user's settled bets. Fully derived: any divergence
/// from a replay of the underlying bet rows is a bug, and a recompute
/// overwrites the row wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = user_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserStats {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: String,
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
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = user_stats)]
pub struct NewUserStats {
    pub user_id: Uuid,
    pub community_id: String,
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
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    pub fn find_by_user(
        user_id: Uuid,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        user_stats::table
            .filter(user_stats::user_id.eq(user_id))
            .filter(user_stats::community_id.eq(community_id))
            .first(conn)
    }

    /// Upsert the single stats row for (user, community).
    pub fn upsert(stats: &NewUserStats, conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        use diesel::pg::upsert::excluded;

        diesel::insert_into(user_stats::table)
            .values(stats)
            .on_conflict((user_stats::user_id, user_stats::community_id))
            .do_update()
            .set((
                user_stats::total_bets.eq(excluded(user_stats::total_bets)),
                user_stats::wins.eq(excluded(user_stats::wins)),
                user_stats::losses.eq(excluded(user_stats::losses)),
                user_stats::pushes.eq(excluded(user_stats::pushes)),
                user_stats::pending.eq(excluded(user_stats::pending)),
                user_stats::win_rate.eq(excluded(user_stats::win_rate)),
                user_stats::roi.eq(excluded(user_stats::roi)),
                user_stats::net_profit.eq(excluded(user_stats::net_profit)),
                user_stats::current_streak.eq(excluded(user_stats::current_streak)),
                user_stats::units_won.eq(excluded(user_stats::units_won)),
                user_stats::updated_at.eq(excluded(user_stats::updated_at)),
            ))
            .get_result(conn)
    }

    /// Leaderboard source rows: eligible stats joined with their owner's
    /// display fields, best ROI first. Sort is stable; ties keep query order.
    pub fn find_leaderboard_rows(
        community_id: &str,
        cutoff: DateTime<Utc>,
        min_bets: i32,
        limit: i64,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<(Self, User)>> {
        user_stats::table
            .inner_join(users::table)
            .filter(user_stats::community_id.eq(community_id))
            .filter(user_stats::updated_at.ge(cutoff))
            .filter(user_stats::total_bets.ge(min_bets))
            .order(user_stats::roi.desc())
            .limit(limit)
            .select((Self::as_select(), User::as_select()))
            .load(conn)
    }
}
