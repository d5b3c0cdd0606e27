mod common;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use common::{deposit, on_date, withdraw};
use ledger_reports::models::Transaction;
use ledger_reports::service::{ReportRequest, ReportService};
use ledger_reports::store::{InMemorySource, SourceError, TransactionQuery, TransactionSource};
use rust_decimal_macros::dec;

fn sample_rows() -> Vec<Transaction> {
    vec![
        on_date(withdraw(1, "Acme", dec!(1000), dec!(10)), 2024, 3, 1),
        on_date(deposit(2, "Acme", dec!(500)), 2024, 3, 2),
        on_date(deposit(3, "Blue Ocean", dec!(2500)), 2024, 3, 5),
        on_date(deposit(4, "Blue Ocean", dec!(100)), 2024, 4, 20),
    ]
}

fn service() -> ReportService<InMemorySource> {
    ReportService::new(InMemorySource::new(sample_rows()))
}

/// Source that always fails, for exercising the internal-error path
struct FailingSource;

impl TransactionSource for FailingSource {
    fn fetch(&self, _query: &TransactionQuery) -> Result<Vec<Transaction>, SourceError> {
        Err(SourceError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_range_report_returns_pdf_payload() {
    let request = ReportRequest {
        client_id: None,
        start_date: Some("2024-03-01".to_string()),
        end_date: Some("2024-03-31".to_string()),
    };
    let response = service().generate(&request).await.unwrap();

    let bytes = STANDARD.decode(response.pdf_content).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_whole_history_request_is_valid() {
    // Neither a range nor a client: a whole-history report, not an error.
    let response = service().generate(&ReportRequest::default()).await.unwrap();
    assert!(!response.pdf_content.is_empty());
}

#[tokio::test]
async fn test_missing_end_date_is_a_validation_error() {
    let request = ReportRequest {
        client_id: None,
        start_date: Some("2024-03-01".to_string()),
        end_date: None,
    };
    let err = service().generate(&request).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.status_code(), 400);
    assert!(err.to_string().contains("endDate"));
}

#[tokio::test]
async fn test_missing_start_date_is_a_validation_error() {
    let request = ReportRequest {
        client_id: None,
        start_date: None,
        end_date: Some("2024-03-31".to_string()),
    };
    let err = service().generate(&request).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("startDate"));
}

#[tokio::test]
async fn test_malformed_date_is_a_validation_error() {
    let request = ReportRequest {
        client_id: None,
        start_date: Some("03/01/2024".to_string()),
        end_date: Some("2024-03-31".to_string()),
    };
    let err = service().generate(&request).await.unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn test_inverted_range_is_a_validation_error() {
    let request = ReportRequest {
        client_id: None,
        start_date: Some("2024-03-31".to_string()),
        end_date: Some("2024-03-01".to_string()),
    };
    let err = service().generate(&request).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_validation_runs_before_the_fetch() {
    // An invalid request never reaches the failing source.
    let service = ReportService::new(FailingSource);
    let request = ReportRequest {
        client_id: None,
        start_date: Some("2024-03-01".to_string()),
        end_date: None,
    };
    let err = service.generate(&request).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_source_failure_is_masked_as_internal_error() {
    let service = ReportService::new(FailingSource);
    let failure = service
        .handle(&ReportRequest::default())
        .await
        .unwrap_err();

    assert_eq!(failure.status, 500);
    // The cause is logged, not leaked.
    assert_eq!(failure.error, "report generation failed");
    assert!(!failure.error.contains("connection refused"));
}

#[tokio::test]
async fn test_validation_failure_keeps_its_message() {
    let request = ReportRequest {
        client_id: None,
        start_date: Some("2024-03-01".to_string()),
        end_date: None,
    };
    let failure = service().handle(&request).await.unwrap_err();
    assert_eq!(failure.status, 400);
    assert!(failure.error.contains("endDate"));
}

#[tokio::test]
async fn test_empty_result_set_renders_an_empty_report() {
    let service = ReportService::new(InMemorySource::new(Vec::new()));
    let response = service.generate(&ReportRequest::default()).await.unwrap();

    let bytes = STANDARD.decode(response.pdf_content).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_temp_artifact_removed_after_request() {
    let scratch = tempfile::tempdir().unwrap();
    let service = service().with_scratch_dir(scratch.path());

    service.generate(&ReportRequest::default()).await.unwrap();

    let leftovers = std::fs::read_dir(scratch.path()).unwrap().count();
    assert_eq!(leftovers, 0, "scratch dir should be empty after the request");
}

#[tokio::test]
async fn test_scratch_dir_created_on_demand() {
    let scratch = tempfile::tempdir().unwrap();
    let nested = scratch.path().join("reports").join("tmp");
    let service = service().with_scratch_dir(&nested);

    service.generate(&ReportRequest::default()).await.unwrap();
    assert!(nested.is_dir());
}
