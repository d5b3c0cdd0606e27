use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic kind of a ledger transaction.
///
/// The store encodes this as an integer column: `0` is a deposit, `1` a
/// withdrawal. Only those two codes are accepted at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

/// Raised when a row carries a transaction type code outside `{0, 1}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported transaction type code {0}, expected 0 or 1")]
pub struct UnknownTypeCode(pub u8);

impl TransactionKind {
    /// Total classification: `0` is a deposit, any other code a withdrawal.
    ///
    /// Use [`TryFrom`] instead when rejecting out-of-range codes matters.
    pub fn classify(code: u8) -> Self {
        if code == 0 {
            TransactionKind::Deposit
        } else {
            TransactionKind::Withdraw
        }
    }

    pub fn is_deposit(self) -> bool {
        self == TransactionKind::Deposit
    }

    pub fn is_withdraw(self) -> bool {
        self == TransactionKind::Withdraw
    }

    /// Fixed label used in report table cells.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
        }
    }
}

impl TryFrom<u8> for TransactionKind {
    type Error = UnknownTypeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TransactionKind::Deposit),
            1 => Ok(TransactionKind::Withdraw),
            other => Err(UnknownTypeCode(other)),
        }
    }
}

impl From<TransactionKind> for u8 {
    fn from(kind: TransactionKind) -> u8 {
        match kind {
            TransactionKind::Deposit => 0,
            TransactionKind::Withdraw => 1,
        }
    }
}

/// A ledger transaction row as stored upstream.
///
/// Field renames mirror the store's wire column names (including its
/// `widthdraw_charges` spelling) so rows deserialize unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "transaction_type")]
    pub kind: TransactionKind,
    pub client_id: u64,
    pub client_name: String,
    #[serde(rename = "transaction_amount")]
    pub amount: Decimal,
    /// Fee percentage in `[0, 100]`, applied to the face amount.
    #[serde(rename = "widthdraw_charges")]
    pub charge_percent: Decimal,
    pub bank_name: Option<String>,
    pub card_name: Option<String>,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    pub remark: Option<String>,
}

/// Validation failures for a single transaction row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTransaction {
    #[error("transaction amount must not be negative")]
    NegativeAmount,
    #[error("withdraw charge percentage must be within [0, 100]")]
    ChargeOutOfRange,
    #[error("client name must not be blank")]
    BlankClientName,
}

impl Transaction {
    /// Check the row-level invariants the boundary enforces.
    pub fn validate(&self) -> Result<(), InvalidTransaction> {
        if self.amount < Decimal::ZERO {
            return Err(InvalidTransaction::NegativeAmount);
        }
        if self.charge_percent < Decimal::ZERO || self.charge_percent > Decimal::ONE_HUNDRED {
            return Err(InvalidTransaction::ChargeOutOfRange);
        }
        if self.client_name.trim().is_empty() {
            return Err(InvalidTransaction::BlankClientName);
        }
        Ok(())
    }

    /// Percentage-based fee for this row.
    ///
    /// Computed for every kind; deposits normally carry a zero charge, but a
    /// nonzero one still contributes to the fee total.
    pub fn fee_amount(&self) -> Decimal {
        self.amount * self.charge_percent / Decimal::ONE_HUNDRED
    }
}
