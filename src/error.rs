use thiserror::Error;

use crate::store::SourceError;

/// Errors surfaced by the report pipeline.
///
/// `Validation` is the caller's fault and maps to a 4xx status; everything
/// else is an internal failure and maps to 5xx.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{0}")]
    Validation(String),

    #[error("transaction source error: {0}")]
    Source(#[from] SourceError),

    #[error("document rendering error: {0}")]
    Render(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ReportError::Validation(_))
    }

    /// HTTP-equivalent status for the transport boundary.
    pub fn status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else {
            500
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
