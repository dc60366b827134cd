//! Bankroll ledger: named pools of capital, each backed by an append-only
//! transaction history. The running balance is a derived value kept
//! consistent with that history inside a single database transaction per
//! mutation; it must always be reconstructible by replay.

use chrono::Utc;
use deadpool_diesel::postgres::Pool;
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineError;
use wager_db::WagerPool;
use wager_db::models::{Bankroll, Bet, NewBankroll, NewTransaction, Transaction};
use wager_db::types::{BetResult, TransactionKind};

pub struct BankrollLedger {
    pool: Pool,
}

/// Arguments for opening a bankroll, mirroring the exposed operation.
#[derive(Debug, Clone)]
pub struct OpenBankroll {
    pub name: Option<String>,
    pub currency: Option<String>,
    pub sport: Option<String>,
    pub sportsbook: Option<String>,
    pub starting_amount: Decimal,
    pub max_bet_percentage: Option<Decimal>,
    pub stop_loss_threshold: Option<Decimal>,
    pub target_profit: Option<Decimal>,
}

/// Outcome of a ledger replay audit for one bankroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub bankroll_id: Uuid,
    pub expected: Decimal,
    pub actual: Decimal,
}

impl ReplayReport {
    pub fn is_consistent(&self) -> bool {
        self.expected == self.actual
    }
}

/// Replay a transaction history from a starting balance. Every prefix of the
/// history replayed this way must equal the balance at that point in time.
pub fn replay_balance<'a, I>(starting_amount: Decimal, entries: I) -> Decimal
where
    I: IntoIterator<Item = (TransactionKind, &'a Decimal)>,
{
    entries
        .into_iter()
        .fold(starting_amount, |balance, (kind, amount)| {
            balance + Decimal::from(kind.sign()) * *amount
        })
}

/// The ledger entry a settlement produces: `(kind, amount, balance delta)`.
/// A push returns the stake untouched, so it writes nothing.
pub fn settlement_entry(
    result: BetResult,
    stake: Decimal,
    actual_return: Decimal,
) -> Option<(TransactionKind, Decimal, Decimal)> {
    match result {
        BetResult::Won => {
            let profit = actual_return - stake;
            Some((TransactionKind::Win, profit, profit))
        }
        BetResult::Lost => Some((TransactionKind::Loss, stake, -stake)),
        BetResult::Push | BetResult::Pending => None,
    }
}

impl BankrollLedger {
    pub const fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Open a new bankroll for a user. The starting amount seeds
    /// `current_amount` directly; deposits and withdrawals from then on go
    /// through the transaction log.
    pub async fn open_bankroll(
        &self,
        user_id: Uuid,
        community_id: &str,
        args: OpenBankroll,
    ) -> Result<Bankroll, EngineError> {
        if args.starting_amount <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "starting amount must be positive",
            ));
        }

        let new_bankroll = NewBankroll {
            user_id,
            community_id: community_id.to_string(),
            name: args.name.unwrap_or_else(|| "Main Bankroll".to_string()),
            currency: args.currency.unwrap_or_else(|| "USD".to_string()),
            sport: args.sport,
            sportsbook: args.sportsbook,
            starting_amount: args.starting_amount,
            current_amount: args.starting_amount,
            max_bet_percentage: args.max_bet_percentage,
            stop_loss_threshold: args.stop_loss_threshold,
            target_profit: args.target_profit,
        };

        self.pool
            .interact_with_context("open bankroll".into(), move |conn| {
                Bankroll::create(&new_bankroll, conn)
            })
            .await
            .map_err(|e| EngineError::from_db(e, "bankroll"))
    }

    /// Record a manual deposit or withdrawal. The transaction insert and the
    /// balance increment commit together or not at all, and the increment is
    /// applied in SQL so concurrent mutations on the same bankroll serialize
    /// at the storage layer.
    pub async fn record_transaction(
        &self,
        user_id: Uuid,
        community_id: &str,
        bankroll_id: Uuid,
        kind: TransactionKind,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Transaction, EngineError> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::invalid_input("amount must be positive"));
        }
        let (delta, deposited, withdrawn) = match kind {
            TransactionKind::Deposit => (amount, amount, Decimal::ZERO),
            TransactionKind::Withdrawal => (-amount, Decimal::ZERO, amount),
            other => {
                return Err(EngineError::InvalidInput(format!(
                    "transaction kind '{}' is reserved for settlements",
                    other.as_str()
                )));
            }
        };

        let community_id = community_id.to_string();
        self.pool
            .interact_with_context("record bankroll transaction".into(), move |conn| {
                // Ownership check first: a foreign bankroll reads as absent.
                let bankroll = Bankroll::find_by_id_scoped(bankroll_id, user_id, conn)?;

                conn.transaction(|conn| {
                    let entry = Transaction::create(
                        &NewTransaction {
                            bankroll_id: bankroll.id,
                            user_id,
                            community_id,
                            kind: kind.as_str().to_string(),
                            amount,
                            description,
                        },
                        conn,
                    )?;
                    Bankroll::apply_balance_delta(
                        bankroll.id,
                        delta,
                        deposited,
                        withdrawn,
                        Utc::now(),
                        conn,
                    )?;
                    Ok::<_, diesel::result::Error>(entry)
                })
            })
            .await
            .map_err(|e| EngineError::from_db(e, "bankroll"))
    }

    /// Post a settled bet's profit or loss to the owner's bankroll: the
    /// sport-matching active bankroll if one exists, otherwise the first
    /// active one. Returns the appended transaction, or `None` for a push.
    pub async fn apply_settlement(
        &self,
        bet: &Bet,
        result: BetResult,
    ) -> Result<Option<Transaction>, EngineError> {
        let Some((kind, amount, delta)) = settlement_entry(result, bet.stake, bet.actual_return)
        else {
            return Ok(None);
        };

        let user_id = bet.user_id;
        let community_id = bet.community_id.clone();
        let sport = bet.sport.clone();
        let description = format!("Bet {}: {}", result.as_str(), bet.description);

        let posted = self
            .pool
            .interact_with_context("apply settlement to bankroll".into(), move |conn| {
                let bankrolls = Bankroll::find_active_by_user(user_id, conn)?;
                let Some(target) = bankrolls
                    .iter()
                    .find(|b| b.sport.as_deref() == Some(sport.as_str()))
                    .or_else(|| bankrolls.first())
                else {
                    return Ok(SettlementPost::NoBankroll);
                };
                let target_id = target.id;

                let posted = conn.transaction(|conn| {
                    let entry = Transaction::create(
                        &NewTransaction {
                            bankroll_id: target_id,
                            user_id,
                            community_id,
                            kind: kind.as_str().to_string(),
                            amount,
                            description: Some(description),
                        },
                        conn,
                    )?;
                    let updated = Bankroll::apply_balance_delta(
                        target_id,
                        delta,
                        Decimal::ZERO,
                        Decimal::ZERO,
                        Utc::now(),
                        conn,
                    )?;
                    if updated == 0 {
                        // Bankroll vanished between selection and update;
                        // roll the insert back rather than strand the entry.
                        return Err(diesel::result::Error::RollbackTransaction);
                    }
                    Ok::<_, diesel::result::Error>(SettlementPost::Posted(entry))
                });
                match posted {
                    Err(diesel::result::Error::RollbackTransaction) => {
                        Ok(SettlementPost::Vanished)
                    }
                    other => other,
                }
            })
            .await
            .map_err(|e| EngineError::from_db(e, "bankroll"))?;

        posted.into_result(user_id).map(Some)
    }

    /// Audit one bankroll: replaying its full history from `starting_amount`
    /// must reproduce `current_amount` exactly, decimal-accurate. Operator
    /// hook, not on any request path; the replay arithmetic itself is
    /// `replay_balance`.
    pub async fn verify_replay(&self, bankroll_id: Uuid) -> Result<ReplayReport, EngineError> {
        let report = self
            .pool
            .interact_with_context("verify bankroll replay".into(), move |conn| {
                let bankroll: Bankroll = wager_db::schema::bankrolls::table
                    .find(bankroll_id)
                    .first(conn)?;
                let history = Transaction::find_by_bankroll_chronological(bankroll_id, conn)?;
                let expected = replay_balance(
                    bankroll.starting_amount,
                    history.iter().filter_map(|t| {
                        TransactionKind::parse(&t.kind).map(|kind| (kind, &t.amount))
                    }),
                );
                Ok::<_, diesel::result::Error>(ReplayReport {
                    bankroll_id,
                    expected,
                    actual: bankroll.current_amount,
                })
            })
            .await
            .map_err(|e| EngineError::from_db(e, "bankroll"))?;

        if !report.is_consistent() {
            tracing::error!(
                bankroll_id = %report.bankroll_id,
                expected = %report.expected,
                actual = %report.actual,
                "Bankroll balance diverged from transaction replay"
            );
        }
        Ok(report)
    }
}

/// What posting a settlement to storage produced. Distinguishes the two
/// expected non-postings from real query failures, which stay errors.
enum SettlementPost {
    Posted(Transaction),
    NoBankroll,
    Vanished,
}

impl SettlementPost {
    fn into_result(self, user_id: Uuid) -> Result<Transaction, EngineError> {
        match self {
            Self::Posted(entry) => Ok(entry),
            Self::NoBankroll => Err(EngineError::NoActiveBankroll(user_id)),
            Self::Vanished => Err(EngineError::StorageConflict(
                "bankroll changed during settlement".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entries(
        raw: &[(TransactionKind, Decimal)],
    ) -> impl Iterator<Item = (TransactionKind, &Decimal)> {
        raw.iter().map(|(k, a)| (*k, a))
    }

    #[test]
    fn replay_applies_signed_amounts() {
        let history = [
            (TransactionKind::Deposit, dec!(500)),
            (TransactionKind::Win, dec!(90.91)),
            (TransactionKind::Loss, dec!(100)),
            (TransactionKind::Withdrawal, dec!(50)),
        ];
        assert_eq!(
            replay_balance(dec!(1000), entries(&history)),
            dec!(1440.91)
        );
    }

    #[test]
    fn replay_invariant_holds_for_every_prefix() {
        let history = [
            (TransactionKind::Deposit, dec!(200)),
            (TransactionKind::Loss, dec!(75)),
            (TransactionKind::Bet, dec!(25)),
            (TransactionKind::Win, dec!(37.50)),
        ];
        let expected = [dec!(1200), dec!(1125), dec!(1100), dec!(1137.50)];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(
                replay_balance(dec!(1000), entries(&history[..=i])),
                *want,
                "prefix of length {}",
                i + 1
            );
        }
    }

    #[test]
    fn settlement_entry_for_win_posts_profit_only() {
        let (kind, amount, delta) =
            settlement_entry(BetResult::Won, dec!(100), dec!(190.91)).unwrap();
        assert_eq!(kind, TransactionKind::Win);
        assert_eq!(amount, dec!(90.91));
        assert_eq!(delta, dec!(90.91));
    }

    #[test]
    fn settlement_entry_for_loss_debits_stake() {
        let (kind, amount, delta) =
            settlement_entry(BetResult::Lost, dec!(100), Decimal::ZERO).unwrap();
        assert_eq!(kind, TransactionKind::Loss);
        assert_eq!(amount, dec!(100));
        assert_eq!(delta, dec!(-100));
    }

    #[test]
    fn settlement_entry_for_push_writes_nothing() {
        assert!(settlement_entry(BetResult::Push, dec!(100), dec!(100)).is_none());
    }

    fn ledger_entry() -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            bankroll_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            community_id: "community".to_string(),
            kind: TransactionKind::Win.as_str().to_string(),
            amount: dec!(90.91),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn posting_without_an_active_bankroll_names_the_user() {
        let user_id = Uuid::new_v4();
        match SettlementPost::NoBankroll.into_result(user_id) {
            Err(EngineError::NoActiveBankroll(id)) => assert_eq!(id, user_id),
            other => panic!("expected NoActiveBankroll, got {other:?}"),
        }
    }

    #[test]
    fn posting_against_a_vanished_bankroll_is_a_storage_conflict() {
        assert!(matches!(
            SettlementPost::Vanished.into_result(Uuid::new_v4()),
            Err(EngineError::StorageConflict(_))
        ));
    }

    #[test]
    fn posted_settlement_passes_the_entry_through() {
        let entry = ledger_entry();
        let posted = SettlementPost::Posted(entry.clone())
            .into_result(entry.user_id)
            .unwrap();
        assert_eq!(posted.id, entry.id);
        assert_eq!(posted.amount, dec!(90.91));
    }
}
