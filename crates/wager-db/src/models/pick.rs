use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::picks;
use crate::types::{AccessTier, BetResult};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = picks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Pick {
    pub id: Uuid,
    pub capper_id: Uuid,
    pub community_id: String,
    pub sport: String,
    pub league: Option<String>,
    pub bet_type: String,
    pub description: String,
    pub reasoning: Option<String>,
    pub confidence: Option<i32>,
    pub odds_american: i32,
    pub actual_odds_american: Option<i32>,
    pub recommended_units: Option<Decimal>,
    pub result: String,
    pub roi: Decimal,
    pub access_tier: String,
    pub price: Option<Decimal>,
    pub is_premium: bool,
    pub views: i32,
    pub follows: i32,
    pub posted_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = picks)]
pub struct NewPick {
    pub capper_id: Uuid,
    pub community_id: String,
    pub sport: String,
    pub league: Option<String>,
    pub bet_type: String,
    pub description: String,
    pub reasoning: Option<String>,
    pub confidence: Option<i32>,
    pub odds_american: i32,
    pub recommended_units: Option<Decimal>,
    pub result: String,
    pub access_tier: String,
    pub price: Option<Decimal>,
    pub is_premium: bool,
}

impl Pick {
    pub fn find_by_id_scoped(
        id: Uuid,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        picks::table
            .filter(picks::id.eq(id))
            .filter(picks::community_id.eq(community_id))
            .first(conn)
    }

    /// Community feed, newest first. Premium viewers see both tiers, public
    /// viewers only the public one.
    pub fn list(
        community_id: &str,
        capper_id: Option<Uuid>,
        sport: Option<String>,
        viewer_tier: AccessTier,
        limit: i64,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        let mut query = picks::table
            .filter(picks::community_id.eq(community_id))
            .into_boxed();

        if let Some(capper) = capper_id {
            query = query.filter(picks::capper_id.eq(capper));
        }
        if let Some(sport) = sport {
            query = query.filter(picks::sport.eq(sport));
        }
        if matches!(viewer_tier, AccessTier::Public) {
            query = query.filter(picks::access_tier.eq(AccessTier::Public.as_str()));
        }

        query
            .order(picks::posted_at.desc())
            .limit(limit)
            .load(conn)
    }

    pub fn create(new_pick: &NewPick, conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        diesel::insert_into(picks::table)
            .values(new_pick)
            .get_result(conn)
    }

    /// Same storage-level transition guard as bet settlement: only a pending
    /// pick can reach a terminal result, exactly once.
    pub fn settle_if_pending(
        id: Uuid,
        result: BetResult,
        actual_odds_american: Option<i32>,
        roi: Decimal,
        settled_at: DateTime<Utc>,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Option<Self>> {
        diesel::update(
            picks::table
                .filter(picks::id.eq(id))
                .filter(picks::result.eq(BetResult::Pending.as_str())),
        )
        .set((
            picks::result.eq(result.as_str()),
            picks::actual_odds_american.eq(actual_odds_american),
            picks::roi.eq(roi),
            picks::settled_at.eq(settled_at),
        ))
        .get_result(conn)
        .optional()
    }

    /// Atomic counter update; never computed from a stale in-memory read.
    pub fn adjust_follows(
        id: Uuid,
        delta: i32,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<usize> {
        diesel::update(picks::table.filter(picks::id.eq(id)))
            .set(picks::follows.eq(diesel::dsl::sql::<diesel::sql_types::Int4>(
                "GREATEST(follows + ",
            )
            .bind::<diesel::sql_types::Int4, _>(delta)
            .sql(", 0)")))
            .execute(conn)
    }
}
