use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::transactions;

/// Append-only ledger entry. Rows are never updated or deleted; the bankroll
/// balance must always be reconstructible by replaying them in order.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Transaction {
    pub id: Uuid,
    pub bankroll_id: Uuid,
    pub user_id: Uuid,
    pub community_id: String,
    pub kind: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransaction {
    pub bankroll_id: Uuid,
    pub user_id: Uuid,
    pub community_id: String,
    pub kind: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl Transaction {
    /// Full history of one bankroll, oldest first (replay order).
    pub fn find_by_bankroll_chronological(
        bankroll_id: Uuid,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        transactions::table
            .filter(transactions::bankroll_id.eq(bankroll_id))
            .order(transactions::created_at.asc())
            .load(conn)
    }

    /// Recent activity across a user's bankrolls, newest first.
    pub fn find_by_user(
        user_id: Uuid,
        bankroll_id: Option<Uuid>,
        limit: i64,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        let mut query = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .into_boxed();
        if let Some(bankroll_id) = bankroll_id {
            query = query.filter(transactions::bankroll_id.eq(bankroll_id));
        }
        query
            .order(transactions::created_at.desc())
            .limit(limit)
            .load(conn)
    }

    pub fn create(
        new_transaction: &NewTransaction,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        diesel::insert_into(transactions::table)
            .values(new_transaction)
            .get_result(conn)
    }
}
