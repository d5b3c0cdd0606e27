#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use ledger_reports::models::{Transaction, TransactionKind};
use rust_decimal::Decimal;

/// Helper to create a transaction with all fields
pub fn make_transaction(
    id: u64,
    kind: TransactionKind,
    client_id: u64,
    client_name: &str,
    amount: Decimal,
    charge_percent: Decimal,
) -> Transaction {
    Transaction {
        id,
        kind,
        client_id,
        client_name: client_name.to_string(),
        amount,
        charge_percent,
        bank_name: None,
        card_name: None,
        create_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        create_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        remark: None,
    }
}

/// Helper to create a deposit with no charge
pub fn deposit(id: u64, client_name: &str, amount: Decimal) -> Transaction {
    make_transaction(id, TransactionKind::Deposit, 1, client_name, amount, Decimal::ZERO)
}

/// Helper to create a withdrawal with a fee percentage
pub fn withdraw(id: u64, client_name: &str, amount: Decimal, charge_percent: Decimal) -> Transaction {
    make_transaction(id, TransactionKind::Withdraw, 1, client_name, amount, charge_percent)
}

/// Rebase a transaction onto a specific date
pub fn on_date(mut tx: Transaction, year: i32, month: u32, day: u32) -> Transaction {
    tx.create_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    tx
}

/// Rebase a transaction onto a specific time of day
pub fn at_time(mut tx: Transaction, hour: u32, minute: u32, second: u32) -> Transaction {
    tx.create_time = NaiveTime::from_hms_opt(hour, minute, second).unwrap();
    tx
}

/// Create a test CSV in the store's wire format
pub fn build_csv(rows: &[&str]) -> String {
    let mut csv = String::from(
        "id,transaction_type,client_id,client_name,transaction_amount,widthdraw_charges,\
         bank_name,card_name,create_date,create_time,remark\n",
    );
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}
