use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::format::{format_currency, format_percent};
use crate::models::TransactionKind;

/// Derived per-transaction view carried into the report, never persisted.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// `amount * charge_percent / 100`, computed for every kind.
    pub fee: Decimal,
    pub charge_percent: Decimal,
    pub bank_name: String,
    pub card_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl LineItem {
    pub fn amount_display(&self) -> String {
        format_currency(self.amount)
    }

    pub fn fee_display(&self) -> String {
        format_currency(self.fee)
    }

    pub fn charge_display(&self) -> String {
        format_percent(self.charge_percent)
    }

    pub fn date_display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_display(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// Raw accumulators for one client group.
#[derive(Debug, Clone)]
pub struct ClientAggregate {
    /// Signed net volume: deposits add, withdrawals subtract.
    pub total_gross: Decimal,
    /// Fee sum over every transaction, deposits and withdrawals alike.
    pub total_fee: Decimal,
    /// `total_gross + total_fee`, recomputed on every update.
    pub total_final: Decimal,
    /// True until the group sees its first deposit. Informational only; the
    /// display policy keys on the document-level flag instead.
    pub only_withdrawals: bool,
    /// Insertion order matches input order.
    pub line_items: Vec<LineItem>,
}

impl ClientAggregate {
    pub fn new() -> Self {
        Self {
            total_gross: Decimal::ZERO,
            total_fee: Decimal::ZERO,
            total_final: Decimal::ZERO,
            only_withdrawals: true,
            line_items: Vec::new(),
        }
    }
}

impl Default for ClientAggregate {
    fn default() -> Self {
        Self::new()
    }
}

/// Display totals for one client group, shaped by the document-global
/// sign policy. All three are plain formatted magnitudes, never prefixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTotals {
    pub final_amount: String,
    pub transaction_amount: String,
    pub withdraw_charges: String,
}

/// One client's slice of the aggregation output.
#[derive(Debug, Clone)]
pub struct ClientGroup {
    /// First-seen client id for this name; groups key on the name.
    pub client_id: u64,
    pub client_name: String,
    pub aggregate: ClientAggregate,
    pub totals: ClientTotals,
}

/// Aggregation output: one group per client name, in first-seen order.
#[derive(Debug, Clone)]
pub struct LedgerSummary {
    /// Document-scoped flag: true iff no deposit exists anywhere in the
    /// batch. A single deposit for any client flips the display policy for
    /// every group in the report.
    pub only_withdraw: bool,
    pub groups: Vec<ClientGroup>,
}

impl LedgerSummary {
    pub fn group(&self, client_name: &str) -> Option<&ClientGroup> {
        self.groups.iter().find(|g| g.client_name == client_name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}
