pub mod summary;
pub mod transaction;

pub use summary::{ClientAggregate, ClientGroup, ClientTotals, LedgerSummary, LineItem};
pub use transaction::{InvalidTransaction, Transaction, TransactionKind, UnknownTypeCode};
