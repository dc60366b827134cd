use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use wager_db::models::{Bankroll, Transaction};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OpenBankrollRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub sport: Option<String>,
    pub sportsbook: Option<String>,
    pub starting_amount: Decimal,
    pub max_bet_percentage: Option<Decimal>,
    pub stop_loss_threshold: Option<Decimal>,
    pub target_profit: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListBankrollsQuery {
    pub external_user_id: String,
    pub community_id: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecordTransactionRequest {
    pub external_user_id: String,
    pub community_id: String,
    pub bankroll_id: Uuid,
    /// "deposit" or "withdrawal"; settlement kinds are written by the engine.
    pub kind: String,
    pub amount: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListTransactionsQuery {
    pub external_user_id: String,
    pub community_id: String,
    pub bankroll_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BankrollResponse {
    pub id: Uuid,
    pub user_id: Uuid,
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
}

impl From<Bankroll> for BankrollResponse {
    fn from(bankroll: Bankroll) -> Self {
        Self {
            id: bankroll.id,
            user_id: bankroll.user_id,
            name: bankroll.name,
            currency: bankroll.currency,
            sport: bankroll.sport,
            sportsbook: bankroll.sportsbook,
            starting_amount: bankroll.starting_amount,
            current_amount: bankroll.current_amount,
            total_deposited: bankroll.total_deposited,
            total_withdrawn: bankroll.total_withdrawn,
            max_bet_percentage: bankroll.max_bet_percentage,
            stop_loss_threshold: bankroll.stop_loss_threshold,
            target_profit: bankroll.target_profit,
            is_active: bankroll.is_active,
            last_transaction_at: bankroll.last_transaction_at,
            created_at: bankroll.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub bankroll_id: Uuid,
    pub kind: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            bankroll_id: transaction.bankroll_id,
            kind: transaction.kind,
            amount: transaction.amount,
            description: transaction.description,
            created_at: transaction.created_at,
        }
    }
}
