//! Client ledger report generation.
//!
//! Takes raw deposit/withdraw transaction rows, groups them per client with
//! signed running totals under a document-global sign policy, and renders
//! the result as a paginated PDF report. The transaction store is an
//! external collaborator reached through [`store::TransactionSource`];
//! [`service::ReportService`] glues the pieces together for transport
//! callers.

pub mod document;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod pdf;
pub mod service;
pub mod store;

use std::io::Read;

use document::{DocumentModel, ReportParams};
use engine::aggregate;
use error::Result;
use models::Transaction;
use pdf::RenderedReport;

/// Read transaction rows from a CSV reader.
///
/// Malformed or invalid rows are skipped with a warning rather than failing
/// the whole batch; one bad row should not block a report.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for result in csv_reader.deserialize::<Transaction>() {
        match result {
            Ok(tx) => match tx.validate() {
                Ok(()) => transactions.push(tx),
                Err(err) => log::warn!("skipping transaction {}: {err}", tx.id),
            },
            Err(err) => log::warn!("skipping malformed transaction row: {err}"),
        }
    }

    Ok(transactions)
}

/// Aggregate a transaction list and render it as a PDF report.
pub fn generate_report_pdf(
    transactions: &[Transaction],
    params: &ReportParams,
) -> Result<RenderedReport> {
    let summary = aggregate(transactions);
    let model = DocumentModel::from_summary(&summary, params);
    pdf::render(&model)
}
