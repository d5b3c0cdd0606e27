use std::env;
use std::fs::File;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use ledger_reports::document::{DocumentModel, ReportParams};
use ledger_reports::engine::aggregate;
use ledger_reports::pdf;
use ledger_reports::read_transactions;
use ledger_reports::store::{InMemorySource, TransactionQuery, TransactionSource};

fn init_logger() -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stderr())
        .apply()
        .context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;

    let args: Vec<String> = env::args().collect();
    anyhow::ensure!(
        args.len() == 3 || args.len() == 5,
        "Usage: {} <transactions.csv> <report.pdf> [start-date end-date]",
        args.first().map(String::as_str).unwrap_or("ledger-reports")
    );

    let input = &args[1];
    let output = &args[2];

    let file =
        File::open(input).with_context(|| format!("Failed to open input file '{input}'"))?;
    let transactions =
        read_transactions(file).with_context(|| format!("Failed to read '{input}'"))?;

    let (params, query) = if args.len() == 5 {
        let start = parse_date(&args[3])?;
        let end = parse_date(&args[4])?;
        anyhow::ensure!(start <= end, "start date must not be after end date");
        (
            ReportParams::for_range(args[3].as_str(), args[4].as_str(), false),
            TransactionQuery {
                range: Some((start, end)),
                client_id: None,
            },
        )
    } else {
        (ReportParams::whole_history(false), TransactionQuery::default())
    };

    let source = InMemorySource::new(transactions);
    let rows = source
        .fetch(&query)
        .context("Failed to query transactions")?;

    let summary = aggregate(&rows);
    let model = DocumentModel::from_summary(&summary, &params);

    let mut sink = tokio::fs::File::create(output)
        .await
        .with_context(|| format!("Failed to create output file '{output}'"))?;
    let page_count = pdf::write_report(&model, &mut sink)
        .await
        .context("Failed to write report")?;

    println!(
        "Wrote {page_count}-page report covering {} client group(s) to {output}",
        summary.len()
    );
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}
