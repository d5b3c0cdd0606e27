//! Report request orchestration.
//!
//! Glue between the transaction store and the aggregation/rendering
//! pipeline: validate the request, fetch matching rows, aggregate, render,
//! stage the PDF in a per-request temp file, hand back a base64 payload.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::document::{DocumentModel, ReportParams};
use crate::engine::aggregate;
use crate::error::{ReportError, Result};
use crate::pdf;
use crate::store::{TransactionQuery, TransactionSource};

/// Incoming report request. Field names match the transport payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub client_id: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Successful response: the rendered report as a base64 payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub pdf_content: String,
}

/// Failure response for the transport boundary.
///
/// Validation problems keep their message; internal failures are masked
/// behind a generic one, with the cause logged instead of leaked.
#[derive(Debug, Clone, Serialize)]
pub struct ReportFailure {
    pub error: String,
    #[serde(skip)]
    pub status: u16,
}

impl ReportFailure {
    fn from_error(err: ReportError) -> Self {
        let status = err.status_code();
        let error = if err.is_validation() {
            err.to_string()
        } else {
            log::error!("report generation failed: {err}");
            "report generation failed".to_string()
        };
        Self { error, status }
    }
}

/// Report generation service over a transaction source.
///
/// Stateless across requests: every call fetches fresh rows, builds the
/// summary from scratch and stages its own scoped temp artifact.
pub struct ReportService<S: TransactionSource> {
    source: S,
    scratch_dir: PathBuf,
}

impl<S: TransactionSource> ReportService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Override the scratch directory used for temp artifacts. The service
    /// creates it on demand; the directory itself is left in place.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Run the full pipeline for one request.
    pub async fn generate(&self, request: &ReportRequest) -> Result<ReportResponse> {
        let (query, params) = validate_request(request)?;

        let rows = self.source.fetch(&query)?;
        if rows.is_empty() {
            // Valid outcome: the report renders with a header and no tables.
            log::debug!("no transactions matched the report query");
        }

        let summary = aggregate(&rows);
        let model = DocumentModel::from_summary(&summary, &params);
        let rendered = pdf::render(&model)?;

        // Stage the document in a per-request temp file. The handle removes
        // the file on drop, so every exit path below cleans up.
        tokio::fs::create_dir_all(&self.scratch_dir).await?;
        let artifact = tempfile::Builder::new()
            .prefix("ledger-report-")
            .suffix(".pdf")
            .tempfile_in(&self.scratch_dir)?;

        let mut sink = tokio::fs::File::create(artifact.path()).await?;
        sink.write_all(&rendered.bytes).await?;
        sink.flush().await?;
        sink.sync_all().await?;

        let bytes = tokio::fs::read(artifact.path()).await?;
        let pdf_content = STANDARD.encode(bytes);

        log::info!(
            "generated {}-page report for {} client group(s)",
            rendered.page_count,
            summary.len()
        );
        Ok(ReportResponse { pdf_content })
    }

    /// [`generate`](Self::generate) with errors mapped for the transport
    /// boundary.
    pub async fn handle(&self, request: &ReportRequest) -> std::result::Result<ReportResponse, ReportFailure> {
        self.generate(request).await.map_err(ReportFailure::from_error)
    }
}

/// Check the request before any fetch or rendering work happens.
///
/// A date range needs both ends; a request with neither range nor client is
/// a whole-history report, not an error.
fn validate_request(request: &ReportRequest) -> Result<(TransactionQuery, ReportParams)> {
    let client_specific = request.client_id.is_some();

    let range = match (&request.start_date, &request.end_date) {
        (None, None) => None,
        (Some(start), Some(end)) => {
            let start_date = parse_report_date("startDate", start)?;
            let end_date = parse_report_date("endDate", end)?;
            if start_date > end_date {
                return Err(ReportError::Validation(
                    "startDate must not be after endDate".to_string(),
                ));
            }
            Some((start_date, end_date))
        }
        (Some(_), None) => {
            return Err(ReportError::Validation(
                "endDate is required when startDate is provided".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(ReportError::Validation(
                "startDate is required when endDate is provided".to_string(),
            ))
        }
    };

    let params = match (&request.start_date, &request.end_date) {
        (Some(start), Some(end)) => {
            ReportParams::for_range(start.as_str(), end.as_str(), client_specific)
        }
        _ => ReportParams::whole_history(client_specific),
    };
    let query = TransactionQuery {
        range,
        client_id: request.client_id,
    };

    Ok((query, params))
}

fn parse_report_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ReportError::Validation(format!("invalid {field} '{value}', expected YYYY-MM-DD"))
    })
}
