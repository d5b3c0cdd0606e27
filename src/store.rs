use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Transaction;

/// Row filter handed to the transaction store.
///
/// The date range is inclusive on both ends. `client_id` narrows the same
/// query further when combined with a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub client_id: Option<u64>,
}

impl TransactionQuery {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some((start, end)) = self.range {
            if tx.create_date < start || tx.create_date > end {
                return false;
            }
        }
        if let Some(client_id) = self.client_id {
            if tx.client_id != client_id {
                return false;
            }
        }
        true
    }
}

/// Failures raised by a transaction source.
///
/// These are collaborator-side problems; the report service maps them to an
/// internal failure, never a validation error.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("transaction source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// External transaction storage, queried once per report request.
///
/// The query itself is synchronous; an empty result set is a valid answer
/// and renders as an empty report, not an error.
pub trait TransactionSource: Send + Sync {
    /// Fetch rows matching the query, sorted ascending by date and time.
    fn fetch(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, SourceError>;
}

/// In-memory source backed by a plain row list.
///
/// Serves the CLI (rows read from CSV) and tests; a production deployment
/// would put a database behind the same trait.
pub struct InMemorySource {
    transactions: Vec<Transaction>,
}

impl InMemorySource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl TransactionSource for InMemorySource {
    fn fetch(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, SourceError> {
        let mut rows: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|tx| query.matches(tx))
            .cloned()
            .collect();
        // Aggregation expects input ordered ascending by occurrence.
        rows.sort_by_key(|tx| (tx.create_date, tx.create_time));
        Ok(rows)
    }
}
