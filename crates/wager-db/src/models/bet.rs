use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::bets;
use crate::types::BetResult;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: String,
    pub sport: String,
    pub bet_type: String,
    pub description: String,
    pub odds_american: i32,
    pub stake: Decimal,
    pub potential_return: Decimal,
    pub actual_return: Decimal,
    pub result: String,
    pub sportsbook: Option<String>,
    pub game_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = bets)]
pub struct NewBet {
    pub user_id: Uuid,
    pub community_id: String,
    pub sport: String,
    pub bet_type: String,
    pub description: String,
    pub odds_american: i32,
    pub stake: Decimal,
    pub potential_return: Decimal,
    pub actual_return: Decimal,
    pub result: String,
    pub sportsbook: Option<String>,
    pub game_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl Bet {
    pub fn find_by_id_scoped(
        id: Uuid,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        bets::table
            .filter(bets::id.eq(id))
            .filter(bets::community_id.eq(community_id))
            .first(conn)
    }

    /// A user's bets, newest first.
    pub fn find_by_user(
        user_id: Uuid,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        bets::table
            .filter(bets::user_id.eq(user_id))
            .filter(bets::community_id.eq(community_id))
            .order(bets::created_at.desc())
            .load(conn)
    }

    /// Terminal bets in settlement order (oldest first). This is the input
    /// set for every statistics recomputation.
    pub fn find_settled_chronological(
        user_id: Uuid,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        bets::table
            .filter(bets::user_id.eq(user_id))
            .filter(bets::community_id.eq(community_id))
            .filter(bets::result.eq_any(BetResult::TERMINAL))
            .order((bets::settled_at.asc(), bets::created_at.asc()))
            .load(conn)
    }

    pub fn count_pending(
        user_id: Uuid,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<i64> {
        bets::table
            .filter(bets::user_id.eq(user_id))
            .filter(bets::community_id.eq(community_id))
            .filter(bets::result.eq(BetResult::Pending.as_str()))
            .count()
            .get_result(conn)
    }

    pub fn create(new_bet: &NewBet, conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        diesel::insert_into(bets::table)
            .values(new_bet)
            .get_result(conn)
    }

    /// Atomic conditional transition out of `pending`. Returns `None` when
    /// the row is already terminal, which is how a lost settlement race
    /// surfaces: the guard lives in the storage layer, not in a
    /// read-then-write in application code.
    pub fn settle_if_pending(
        id: Uuid,
        result: BetResult,
        actual_return: Decimal,
        settled_at: DateTime<Utc>,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Option<Self>> {
        diesel::update(pending_row(id))
            .set((
                bets::result.eq(result.as_str()),
                bets::actual_return.eq(actual_return),
                bets::settled_at.eq(settled_at),
            ))
            .get_result(conn)
            .optional()
    }
}

type PendingBet = diesel::dsl::Filter<
    diesel::dsl::Filter<bets::table, diesel::dsl::Eq<bets::id, Uuid>>,
    diesel::dsl::Eq<bets::result, &'static str>,
>;

/// Update target for settlement: the row, but only while still pending.
fn pending_row(id: Uuid) -> PendingBet {
    bets::table
        .filter(bets::id.eq(id))
        .filter(bets::result.eq(BetResult::Pending.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_update_carries_the_pending_guard() {
        let query = diesel::update(pending_row(Uuid::nil()))
            .set(bets::result.eq(BetResult::Won.as_str()));
        let sql = diesel::debug_query::<diesel::pg::Pg, _>(&query).to_string();
        assert!(sql.contains(r#""bets"."result" ="#), "{sql}");
        assert!(sql.contains("\"pending\""), "{sql}");
    }
}
