use deadpool_diesel::postgres::Pool;

use crate::errors::ApiError;
use wager_db::WagerPool;
use wager_db::models::User;
use wager_db::types::AccessTier;

/// Resolve the caller's identity, creating the user on first contact. Every
/// handler that acts on behalf of a caller goes through this.
pub async fn resolve_user(
    pool: &Pool,
    external_user_id: &str,
    community_id: &str,
) -> Result<User, ApiError> {
    let external = external_user_id.to_string();
    let community = community_id.to_string();
    pool.interact_with_context("resolve user identity".into(), move |conn| {
        User::find_or_create(&external, &community, conn)
    })
    .await
    .map_err(Into::into)
}

/// Anything but an explicit "premium" is treated as a public viewer.
pub fn viewer_tier(raw: Option<&str>) -> AccessTier {
    match raw {
        Some("premium") => AccessTier::Premium,
        _ => AccessTier::Public,
    }
}

pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_viewer_tier_reads_as_public() {
        assert_eq!(viewer_tier(None), AccessTier::Public);
        assert_eq!(viewer_tier(Some("vip")), AccessTier::Public);
        assert_eq!(viewer_tier(Some("premium")), AccessTier::Premium);
    }

    #[test]
    fn limits_are_clamped_to_range() {
        assert_eq!(clamp_limit(None, 50, 100), 50);
        assert_eq!(clamp_limit(Some(0), 50, 100), 1);
        assert_eq!(clamp_limit(Some(500), 50, 100), 100);
        assert_eq!(clamp_limit(Some(25), 50, 100), 25);
    }
}
