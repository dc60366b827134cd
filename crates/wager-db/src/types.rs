use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a bet or pick. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BetResult {
    Pending,
    Won,
    Lost,
    Push,
}

impl BetResult {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Push => "push",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "won" => Some(Self::Won),
            "lost" => Some(Self::Lost),
            "push" => Some(Self::Push),
            _ => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The three terminal results, as stored in the `result` column.
    pub const TERMINAL: [&'static str; 3] = ["won", "lost", "push"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Bet,
    Win,
    Loss,
}

impl TransactionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Bet => "bet",
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "bet" => Some(Self::Bet),
            "win" => Some(Self::Win),
            "loss" => Some(Self::Loss),
            _ => None,
        }
    }

    /// Sign applied to the stored (positive) amount when replaying a
    /// bankroll's history. Deposits and wins credit the balance, everything
    /// else debits it.
    pub const fn sign(&self) -> i64 {
        match self {
            Self::Deposit | Self::Win => 1,
            Self::Withdrawal | Self::Bet | Self::Loss => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    Public,
    Premium,
}

impl AccessTier {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Premium => "premium",
        }
    }
}

/// Leaderboard time window. Unrecognized values fall back to `Monthly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
    AllTime,
}

impl Timeframe {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::AllTime => "all_time",
        }
    }

    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "all_time" => Self::AllTime,
            _ => Self::Monthly,
        }
    }

    /// Inclusive lower bound on `updated_at` for this window.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Daily => now - Duration::days(1),
            Self::Weekly => now - Duration::days(7),
            Self::Monthly => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(DateTime::UNIX_EPOCH),
            Self::AllTime => DateTime::UNIX_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_timeframe_defaults_to_monthly() {
        assert_eq!(Timeframe::parse_or_default("hourly"), Timeframe::Monthly);
        assert_eq!(Timeframe::parse_or_default(""), Timeframe::Monthly);
        assert_eq!(Timeframe::parse_or_default("daily"), Timeframe::Daily);
        assert_eq!(Timeframe::parse_or_default("all_time"), Timeframe::AllTime);
    }

    #[test]
    fn all_time_cutoff_is_epoch() {
        let now = Utc::now();
        assert_eq!(Timeframe::AllTime.cutoff(now), DateTime::UNIX_EPOCH);
        assert_eq!(Timeframe::Daily.cutoff(now), now - Duration::days(1));
    }

    #[test]
    fn transaction_kind_signs() {
        assert_eq!(TransactionKind::Deposit.sign(), 1);
        assert_eq!(TransactionKind::Win.sign(), 1);
        assert_eq!(TransactionKind::Withdrawal.sign(), -1);
        assert_eq!(TransactionKind::Bet.sign(), -1);
        assert_eq!(TransactionKind::Loss.sign(), -1);
    }
}
