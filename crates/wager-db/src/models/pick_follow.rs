use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::pick_follows;
use crate::types::BetResult;

/// A follower's tail of a capper's pick, recorded with the follower's own
/// stake and odds. Settlement of the pick cascades its outcome onto these
/// rows using those recorded figures, not the capper's.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = pick_follows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PickFollow {
    pub id: Uuid,
    pub pick_id: Uuid,
    pub follower_id: Uuid,
    pub capper_id: Uuid,
    pub community_id: String,
    pub stake: Decimal,
    pub odds_american: i32,
    pub result: String,
    pub profit_loss: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = pick_follows)]
pub struct NewPickFollow {
    pub pick_id: Uuid,
    pub follower_id: Uuid,
    pub capper_id: Uuid,
    pub community_id: String,
    pub stake: Decimal,
    pub odds_american: i32,
    pub result: String,
}

impl PickFollow {
    pub fn find_by_pick(pick_id: Uuid, conn: &mut diesel::PgConnection) -> QueryResult<Vec<Self>> {
        pick_follows::table
            .filter(pick_follows::pick_id.eq(pick_id))
            .load(conn)
    }

    pub fn exists(
        pick_id: Uuid,
        follower_id: Uuid,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<bool> {
        diesel::select(diesel::dsl::exists(
            pick_follows::table
                .filter(pick_follows::pick_id.eq(pick_id))
                .filter(pick_follows::follower_id.eq(follower_id)),
        ))
        .get_result(conn)
    }

    pub fn create(
        new_follow: &NewPickFollow,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        diesel::insert_into(pick_follows::table)
            .values(new_follow)
            .get_result(conn)
    }

    pub fn delete(
        pick_id: Uuid,
        follower_id: Uuid,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<usize> {
        diesel::delete(
            pick_follows::table
                .filter(pick_follows::pick_id.eq(pick_id))
                .filter(pick_follows::follower_id.eq(follower_id)),
        )
        .execute(conn)
    }

    /// Copy a settlement outcome onto one follow row.
    pub fn apply_outcome(
        id: Uuid,
        result: BetResult,
        profit_loss: Decimal,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<usize> {
        diesel::update(pick_follows::table.filter(pick_follows::id.eq(id)))
            .set((
                pick_follows::result.eq(result.as_str()),
                pick_follows::profit_loss.eq(profit_loss),
            ))
            .execute(conn)
    }
}
