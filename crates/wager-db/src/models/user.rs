use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::users;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub external_user_id: String,
    pub community_id: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_capper: bool,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub external_user_id: String,
    pub community_id: String,
    pub username: String,
    pub display_name: String,
}

impl User {
    /// A user identity is scoped to a single community; the same external id
    /// in two communities is two distinct users.
    pub fn find_by_external(
        external_user_id: &str,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        users::table
            .filter(users::external_user_id.eq(external_user_id))
            .filter(users::community_id.eq(community_id))
            .first(conn)
    }

    pub fn create(new_user: &NewUser, conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        diesel::insert_into(users::table)
            .values(new_user)
            .get_result(conn)
    }

    /// Users are created lazily on their first interaction within a
    /// community. The generated username mirrors the tail of the external id
    /// until the profile is filled in.
    pub fn find_or_create(
        external_user_id: &str,
        community_id: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Self> {
        match Self::find_by_external(external_user_id, community_id, conn) {
            Ok(user) => Ok(user),
            Err(diesel::NotFound) => {
                let suffix: String = external_user_id
                    .chars()
                    .rev()
                    .take(6)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                let new_user = NewUser {
                    external_user_id: external_user_id.to_string(),
                    community_id: community_id.to_string(),
                    username: format!("user_{suffix}"),
                    display_name: format!("User {suffix}"),
                };
                Self::create(&new_user, conn)
            }
            Err(e) => Err(e),
        }
    }
}
