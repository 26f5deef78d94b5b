#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_txn(id: &str, amount: Decimal, kind: TransactionKind) -> Transaction {
    Transaction {
        id: id.into(),
        description: "Test".into(),
        amount,
        date: "2024-01-15".into(),
        kind,
    }
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_total_empty() {
    assert_eq!(total(&[]), Some(Decimal::ZERO));
}

#[test]
fn test_total_revenue_minus_expenses() {
    let txns = vec![
        make_txn("1", dec!(100.00), TransactionKind::Revenue),
        make_txn("2", dec!(4.50), TransactionKind::Expense),
        make_txn("3", dec!(20.25), TransactionKind::Revenue),
        make_txn("4", dec!(50), TransactionKind::Expense),
    ];
    assert_eq!(total(&txns), Some(dec!(65.75)));
}

#[test]
fn test_total_matches_partitioned_sums() {
    let amounts = [dec!(0.01), dec!(12.34), dec!(999.99), dec!(7), dec!(0)];
    let mut txns = Vec::new();
    for (i, amount) in amounts.iter().enumerate() {
        let kind = if i % 2 == 0 {
            TransactionKind::Expense
        } else {
            TransactionKind::Revenue
        };
        txns.push(make_txn(&i.to_string(), *amount, kind));
    }

    let revenue: Decimal = txns.iter().filter(|t| t.kind == TransactionKind::Revenue).map(|t| t.amount).sum();
    let expenses: Decimal = txns.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
    assert_eq!(total(&txns), Some(revenue - expenses));
}

#[test]
fn test_total_all_expenses_is_negative() {
    let txns = vec![
        make_txn("1", dec!(3), TransactionKind::Expense),
        make_txn("2", dec!(4), TransactionKind::Expense),
    ];
    assert_eq!(total(&txns), Some(dec!(-7)));
}

#[test]
fn test_total_overflow_is_none() {
    let txns = vec![
        make_txn("1", Decimal::MAX, TransactionKind::Revenue),
        make_txn("2", Decimal::MAX, TransactionKind::Revenue),
    ];
    assert_eq!(total(&txns), None);
}

#[test]
fn test_total_large_amounts_that_cancel() {
    let txns = vec![
        make_txn("1", Decimal::MAX, TransactionKind::Revenue),
        make_txn("2", Decimal::MAX, TransactionKind::Expense),
    ];
    assert_eq!(total(&txns), Some(Decimal::ZERO));
}

// ── TransactionKind ───────────────────────────────────────────

#[test]
fn test_kind_parse() {
    assert_eq!(TransactionKind::parse("expense"), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("EXPENSE"), Some(TransactionKind::Expense));
    assert_eq!(TransactionKind::parse("revenue"), Some(TransactionKind::Revenue));
    assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Revenue));
    assert_eq!(TransactionKind::parse("transfer"), None);
}

#[test]
fn test_kind_default_is_expense() {
    assert_eq!(TransactionKind::default(), TransactionKind::Expense);
}

#[test]
fn test_kind_toggle() {
    assert_eq!(TransactionKind::Expense.toggled(), TransactionKind::Revenue);
    assert_eq!(TransactionKind::Revenue.toggled(), TransactionKind::Expense);
}

#[test]
fn test_kind_display_and_as_str() {
    assert_eq!(format!("{}", TransactionKind::Revenue), "Revenue");
    assert_eq!(TransactionKind::Revenue.as_str(), "revenue");
}

// ── Wire shape ────────────────────────────────────────────────

#[test]
fn test_transaction_deserializes_from_backend_node() {
    let json = r#"{"id":"transaction_01H","description":"Coffee","amount":4.5,"date":"2024-01-01","type":"expense"}"#;
    let txn: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(txn.id, "transaction_01H");
    assert_eq!(txn.amount, dec!(4.5));
    assert_eq!(txn.kind, TransactionKind::Expense);
}

#[test]
fn test_transaction_accepts_integer_amount() {
    let json = r#"{"id":"a","description":"Pay","amount":1200,"date":"2024-01-31","type":"revenue"}"#;
    let txn: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(txn.amount, dec!(1200));
    assert_eq!(txn.kind, TransactionKind::Revenue);
}

#[test]
fn test_input_serializes_type_field_and_numeric_amount() {
    let input = TransactionInput {
        description: "Coffee".into(),
        amount: dec!(4.5),
        date: "2024-01-01".into(),
        kind: TransactionKind::Expense,
    };
    let value = serde_json::to_value(&input).unwrap();
    assert_eq!(value["type"], "expense");
    assert_eq!(value["amount"].as_f64(), Some(4.5));
    assert!(value.get("kind").is_none());
}
