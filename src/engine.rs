use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::format::format_currency;
use crate::models::{
    ClientAggregate, ClientGroup, ClientTotals, LedgerSummary, LineItem, Transaction,
};

/// Transaction aggregation engine.
///
/// Builds per-client groups out of an ordered transaction list in two
/// explicit passes: [`observe`](Self::observe) accumulates raw totals and
/// the document-level withdrawal flag, [`finish`](Self::finish) applies the
/// display policy once the flag is final. Groups key on the client name and
/// keep first-seen order.
///
/// ```
/// use ledger_reports::engine::aggregate;
///
/// let summary = aggregate(&[]);
/// assert!(summary.only_withdraw);
/// assert!(summary.is_empty());
/// ```
pub struct LedgerAggregator {
    /// Groups in first-seen order.
    groups: Vec<PendingGroup>,
    /// Map of client name to index into `groups`.
    index: HashMap<String, usize>,
    /// True until the first deposit anywhere in the batch.
    only_withdraw: bool,
}

struct PendingGroup {
    client_id: u64,
    client_name: String,
    aggregate: ClientAggregate,
}

impl LedgerAggregator {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
            only_withdraw: true,
        }
    }

    /// Fold a single transaction into its client group (pass 1).
    pub fn observe(&mut self, tx: &Transaction) {
        // Fee is computed for every kind; the kind only decides the sign of
        // the gross contribution.
        let fee = tx.fee_amount();

        let idx = match self.index.get(&tx.client_name) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.index.insert(tx.client_name.clone(), idx);
                self.groups.push(PendingGroup {
                    client_id: tx.client_id,
                    client_name: tx.client_name.clone(),
                    aggregate: ClientAggregate::new(),
                });
                idx
            }
        };
        let aggregate = &mut self.groups[idx].aggregate;

        if tx.kind.is_deposit() {
            aggregate.total_gross += tx.amount;
            aggregate.only_withdrawals = false;
            self.only_withdraw = false;
        } else {
            aggregate.total_gross -= tx.amount;
        }
        aggregate.total_fee += fee;
        aggregate.total_final = aggregate.total_gross + aggregate.total_fee;

        aggregate.line_items.push(LineItem {
            kind: tx.kind,
            amount: tx.amount,
            fee,
            charge_percent: tx.charge_percent,
            bank_name: tx.bank_name.clone().unwrap_or_default(),
            card_name: tx.card_name.clone().unwrap_or_default(),
            date: tx.create_date,
            time: tx.create_time,
        });
    }

    /// Finalize the summary (pass 2): shape every group's display totals
    /// with the now-final document-level flag.
    pub fn finish(self) -> LedgerSummary {
        let only_withdraw = self.only_withdraw;
        let groups = self
            .groups
            .into_iter()
            .map(|group| {
                let totals = client_totals(&group.aggregate, only_withdraw);
                ClientGroup {
                    client_id: group.client_id,
                    client_name: group.client_name,
                    aggregate: group.aggregate,
                    totals,
                }
            })
            .collect();

        LedgerSummary {
            only_withdraw,
            groups,
        }
    }
}

impl Default for LedgerAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate an ordered transaction list into per-client groups.
///
/// Callers are expected to pass rows pre-sorted, typically ascending by
/// date and time; line items keep the input order.
pub fn aggregate(transactions: &[Transaction]) -> LedgerSummary {
    let mut aggregator = LedgerAggregator::new();
    for tx in transactions {
        aggregator.observe(tx);
    }
    aggregator.finish()
}

/// Display totals under the document-global sign policy.
///
/// The fee is always a plain magnitude. When the whole batch held only
/// withdrawals the gross is suppressed to zero and the final amount shows
/// the fee magnitude; otherwise both show their absolute values.
fn client_totals(aggregate: &ClientAggregate, only_withdraw: bool) -> ClientTotals {
    let withdraw_charges = format_currency(aggregate.total_fee);
    let transaction_amount = if only_withdraw {
        format_currency(Decimal::ZERO)
    } else {
        format_currency(aggregate.total_gross)
    };
    let final_amount = if only_withdraw {
        format_currency(aggregate.total_fee)
    } else {
        format_currency(aggregate.total_final)
    };

    ClientTotals {
        final_amount,
        transaction_amount,
        withdraw_charges,
    }
}
