use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::bankrolls;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bankrolls)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bankroll {
    pub id: Uuid,
    pub user_id: Uuid,
    pub community_id: String,
    pub name: String,
    pub currency: String,
    pub sport: Option<String>,
    pub sportsbook: Option<String>,
    pub starting_amount: Decimal,
    pub current_amount: Decimal,
    pub total_deposited: Decimal,
    pub total_withdrawn: Decimal,
    pub max_bet_percentage: Option<Decimal>,
    pub stop_loss_threshold: Option<Decimal>,
    pub target_profit: Option<Decimal>,
    pub is_active: bool,
    pub last_transaction_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = bankrolls)]
pub struct NewBankroll {
    pub user_id: Uuid,
    pub community_id: String,
    pub name: String,
    pub currency: String,
    pub sport: Option<String>,
    pub sportsbook: Option<String>,
    pub starting_amount: Decimal,
    pub current_amount: Decimal,
    pub max_bet_percentage: Option<Decimal>,
    pub stop_loss_threshold: Option<Decimal>,
    pub target_profit: Option<Decimal>,
}

impl Bankroll {
    pub fn find_by_id_scoped(
        id: Uuid,
        user_id: Uuid,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        bankrolls::table
            .filter(bankrolls::id.eq(id))
            .filter(bankrolls::user_id.eq(user_id))
            .first(conn)
    }

    /// Active bankrolls, newest first. Deactivated bankrolls keep their
    /// history but stop receiving settlements.
    pub fn find_active_by_user(
        user_id: Uuid,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        bankrolls::table
            .filter(bankrolls::user_id.eq(user_id))
            .filter(bankrolls::is_active.eq(true))
            .order(bankrolls::created_at.desc())
            .load(conn)
    }

    pub fn create(
        new_bankroll: &NewBankroll,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        diesel::insert_into(bankrolls::table)
            .values(new_bankroll)
            .get_result(conn)
    }

    /// Apply a signed balance delta as an atomic SQL increment. The balance
    /// is never recomputed from an in-memory read, so concurrent ledger
    /// mutations on the same bankroll serialize at the row.
    pub fn apply_balance_delta(
        id: Uuid,
        delta: Decimal,
        deposited: Decimal,
        withdrawn: Decimal,
        now: DateTime<Utc>,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<usize> {
        diesel::update(bankrolls::table.filter(bankrolls::id.eq(id)))
            .set((
                bankrolls::current_amount.eq(bankrolls::current_amount + delta),
                bankrolls::total_deposited.eq(bankrolls::total_deposited + deposited),
                bankrolls::total_withdrawn.eq(bankrolls::total_withdrawn + withdrawn),
                bankrolls::last_transaction_at.eq(now),
                bankrolls::updated_at.eq(now),
            ))
            .execute(conn)
    }
}
