//! Declarative report document model.
//!
//! The aggregation output is shaped into tables, rows and cells here;
//! geometry and pagination live entirely in the renderer.

use crate::models::{ClientGroup, LedgerSummary};

/// Number of columns in every client table.
pub const COLUMN_COUNT: usize = 6;

/// Fixed column header labels.
pub const COLUMN_LABELS: [&str; COLUMN_COUNT] = [
    "Transaction Type",
    "Amount",
    "Withdraw charge",
    "Bank",
    "Card",
    "Date & Time",
];

/// Sentinel start date meaning a whole-history report with no range header.
pub const ALL_DATES: &str = "All";

/// Report-level parameters handed to the document builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    pub start_date: String,
    pub end_date: String,
    pub client_specific: bool,
}

impl ReportParams {
    /// Whole-history report: the `"All"` sentinel, no date range header.
    pub fn whole_history(client_specific: bool) -> Self {
        Self {
            start_date: ALL_DATES.to_string(),
            end_date: ALL_DATES.to_string(),
            client_specific,
        }
    }

    pub fn for_range(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        client_specific: bool,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            client_specific,
        }
    }

    pub fn has_range(&self) -> bool {
        self.start_date != ALL_DATES
    }
}

/// One table cell; stacked cells carry more than one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub lines: Vec<String>,
}

impl Cell {
    pub fn text(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn stacked(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            lines: vec![top.into(), bottom.into()],
        }
    }
}

/// Three-line totals block spanning the last two columns of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalsFooter {
    pub fee_line: String,
    pub credit_line: String,
    pub total_line: String,
}

/// One client's table: a section title, line-item rows, totals footer.
#[derive(Debug, Clone)]
pub struct ClientTable {
    pub client_name: String,
    pub rows: Vec<[Cell; COLUMN_COUNT]>,
    pub footer: TotalsFooter,
}

impl ClientTable {
    fn from_group(group: &ClientGroup) -> Self {
        let rows = group
            .aggregate
            .line_items
            .iter()
            .map(|item| {
                [
                    Cell::text(item.kind.label()),
                    Cell::text(item.amount_display()),
                    Cell::stacked(item.fee_display(), item.charge_display()),
                    Cell::text(item.bank_name.clone()),
                    Cell::text(item.card_name.clone()),
                    Cell::stacked(item.date_display(), item.time_display()),
                ]
            })
            .collect();

        let footer = TotalsFooter {
            fee_line: format!("(Fee) {}", group.totals.withdraw_charges),
            credit_line: format!("(Credit) {}", group.totals.transaction_amount),
            total_line: format!("Total: {}", group.totals.final_amount),
        };

        Self {
            client_name: group.client_name.clone(),
            rows,
            footer,
        }
    }
}

/// Fully-described report document, ready for rendering.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    pub title: String,
    /// `"{start} to {end}"`, absent under the whole-history sentinel.
    pub date_range: Option<String>,
    pub tables: Vec<ClientTable>,
}

impl DocumentModel {
    pub fn from_summary(summary: &LedgerSummary, params: &ReportParams) -> Self {
        let title = if params.client_specific {
            "Client Transaction Report".to_string()
        } else {
            "Transaction Report".to_string()
        };
        let date_range = params
            .has_range()
            .then(|| format!("{} to {}", params.start_date, params.end_date));
        let tables = summary.groups.iter().map(ClientTable::from_group).collect();

        Self {
            title,
            date_range,
            tables,
        }
    }
}
