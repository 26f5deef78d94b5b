#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal_macros::dec;

use super::*;
use crate::api::{ApiError, TransactionApi};
use crate::models::{Transaction, TransactionInput, TransactionKind};
use crate::notify::Level;

/// In-memory stand-in for the backend.
#[derive(Default)]
struct FakeApi {
    rows: Mutex<Vec<Transaction>>,
    calls: AtomicUsize,
    next_id: AtomicUsize,
    fail: AtomicBool,
    empty_data: AtomicBool,
    /// Id the server reports as deleted, when it differs from the one asked for.
    confirm_as: Mutex<Option<String>>,
}

impl FakeApi {
    fn with_rows(rows: Vec<Transaction>) -> Self {
        let api = Self::default();
        *api.rows.lock().unwrap() = rows;
        api
    }

    fn check(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionApi for FakeApi {
    async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        self.check()?;
        if self.empty_data.load(Ordering::SeqCst) {
            return Err(ApiError::MissingData("transactionCollection"));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, input: &TransactionInput) -> Result<Transaction, ApiError> {
        self.check()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let txn = Transaction {
            id: format!("srv-{n}"),
            description: input.description.clone(),
            amount: input.amount,
            date: input.date.clone(),
            kind: input.kind,
        };
        self.rows.lock().unwrap().push(txn.clone());
        Ok(txn)
    }

    async fn update(&self, id: &str, input: &TransactionInput) -> Result<Transaction, ApiError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::MissingData("transactionUpdate"))?;
        row.description = input.description.clone();
        row.amount = input.amount;
        row.date = input.date.clone();
        row.kind = input.kind;
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<String, ApiError> {
        self.check()?;
        let deleted = self.confirm_as.lock().unwrap().clone().unwrap_or_else(|| id.to_string());
        self.rows.lock().unwrap().retain(|t| t.id != deleted);
        Ok(deleted)
    }
}

fn seed() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "a".into(),
            description: "Salary".into(),
            amount: dec!(2000),
            date: "2024-01-01".into(),
            kind: TransactionKind::Revenue,
        },
        Transaction {
            id: "b".into(),
            description: "Rent".into(),
            amount: dec!(900),
            date: "2024-01-02".into(),
            kind: TransactionKind::Expense,
        },
    ]
}

async fn loaded_controller() -> Controller<FakeApi> {
    let mut controller = Controller::new(FakeApi::with_rows(seed()));
    assert_eq!(controller.refresh().await, Outcome::Done);
    controller
}

fn fill(controller: &mut Controller<FakeApi>, description: &str, amount: &str, date: &str) {
    let form = controller.ledger_mut().form_mut();
    form.description = description.into();
    form.amount = amount.into();
    form.date = date.into();
}

fn calls(controller: &Controller<FakeApi>) -> usize {
    controller.api.calls.load(Ordering::SeqCst)
}

// ── refresh ───────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_loads_store_in_server_order() {
    let controller = loaded_controller().await;
    let ids: Vec<&str> = controller
        .ledger()
        .transactions()
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(controller.ledger().total(), Some(dec!(1100)));
    assert!(controller.notifier().notices().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_keeps_store_and_notifies_once() {
    let mut controller = loaded_controller().await;
    let before = controller.ledger().transactions().to_vec();
    controller.api.rows.lock().unwrap().clear();
    controller.api.fail.store(true, Ordering::SeqCst);

    assert_eq!(controller.refresh().await, Outcome::Failed);

    assert_eq!(controller.ledger().transactions(), before.as_slice());
    assert_eq!(controller.notifier().count(Level::Error), 1);
    assert_eq!(controller.notifier().notices().len(), 1);
}

#[tokio::test]
async fn test_refresh_without_collection_is_silent() {
    let mut controller = loaded_controller().await;
    controller.api.empty_data.store(true, Ordering::SeqCst);

    assert_eq!(controller.refresh().await, Outcome::Skipped);
    assert_eq!(controller.ledger().transactions().len(), 2);
    assert!(controller.notifier().notices().is_empty());
}

// ── create ────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_appends_server_record_and_resets_form() {
    let mut controller = loaded_controller().await;
    fill(&mut controller, "Coffee", "4.5", "2024-01-01");

    assert_eq!(controller.submit().await, Outcome::Done);

    let txns = controller.ledger().transactions();
    assert_eq!(txns.len(), 3);
    let server_copy = controller.api.rows.lock().unwrap().last().cloned().unwrap();
    assert_eq!(txns[2], server_copy);
    assert_eq!(txns[2].description, "Coffee");
    assert_eq!(txns[2].amount, dec!(4.5));
    assert_eq!(txns[2].kind, TransactionKind::Expense);
    assert_eq!(controller.ledger().form(), &Form::default());
    assert_eq!(controller.notifier().count(Level::Success), 1);
}

#[tokio::test]
async fn test_create_with_blank_field_sends_nothing() {
    for (description, amount, date) in [("", "4.5", "2024-01-01"), ("Coffee", "", "2024-01-01"), ("Coffee", "4.5", "")] {
        let mut controller = loaded_controller().await;
        let calls_before = calls(&controller);
        fill(&mut controller, description, amount, date);

        assert_eq!(controller.submit().await, Outcome::Skipped);

        assert_eq!(calls(&controller), calls_before);
        assert_eq!(controller.ledger().transactions().len(), 2);
        assert!(controller.notifier().notices().is_empty());
    }
}

#[tokio::test]
async fn test_create_with_bad_amount_reports_and_sends_nothing() {
    let mut controller = loaded_controller().await;
    let calls_before = calls(&controller);
    fill(&mut controller, "Coffee", "four", "2024-01-01");

    assert_eq!(controller.create().await, Outcome::Skipped);

    assert_eq!(calls(&controller), calls_before);
    assert_eq!(controller.notifier().count(Level::Error), 1);
    assert_eq!(controller.ledger().form().amount, "four");
}

#[tokio::test]
async fn test_failed_create_keeps_form_and_store() {
    let mut controller = loaded_controller().await;
    fill(&mut controller, "Coffee", "4.5", "2024-01-01");
    controller.api.fail.store(true, Ordering::SeqCst);

    assert_eq!(controller.submit().await, Outcome::Failed);

    assert_eq!(controller.ledger().transactions().len(), 2);
    assert_eq!(controller.ledger().form().description, "Coffee");
    assert_eq!(controller.notifier().count(Level::Error), 1);
}

#[tokio::test]
async fn test_repeated_create_submits_duplicates() {
    let mut controller = loaded_controller().await;
    fill(&mut controller, "Coffee", "4.5", "2024-01-01");
    controller.submit().await;
    fill(&mut controller, "Coffee", "4.5", "2024-01-01");
    controller.submit().await;
    assert_eq!(controller.ledger().transactions().len(), 4);
}

#[tokio::test]
async fn test_total_of_huge_amounts_does_not_panic() {
    let mut controller = loaded_controller().await;
    for _ in 0..2 {
        fill(&mut controller, "Windfall", "79228162514264337593543950335", "2024-01-03");
        controller.ledger_mut().form_mut().kind = TransactionKind::Revenue;
        assert_eq!(controller.submit().await, Outcome::Done);
    }

    assert_eq!(controller.ledger().transactions().len(), 4);
    assert_eq!(controller.ledger().total(), None);
}

// ── edit / update ─────────────────────────────────────────────

#[tokio::test]
async fn test_begin_edit_populates_form() {
    let mut controller = loaded_controller().await;
    assert!(controller.begin_edit("b"));

    let record = controller.ledger().find("b").cloned().unwrap();
    assert_eq!(controller.ledger().editing(), Some(&record));
    let form = controller.ledger().form();
    assert_eq!(form.description, record.description);
    assert_eq!(form.amount, "900");
    assert_eq!(form.date, record.date);
    assert_eq!(form.kind, record.kind);
}

#[tokio::test]
async fn test_begin_edit_unknown_id() {
    let mut controller = loaded_controller().await;
    assert!(!controller.begin_edit("nope"));
    assert!(!controller.ledger().is_editing());
}

#[tokio::test]
async fn test_update_replaces_record_and_returns_to_new() {
    let mut controller = loaded_controller().await;
    controller.begin_edit("b");
    controller.ledger_mut().form_mut().amount = "950.25".into();

    assert_eq!(controller.submit().await, Outcome::Done);

    let rent = controller.ledger().find("b").unwrap();
    assert_eq!(rent.amount, dec!(950.25));
    assert_eq!(controller.ledger().transactions()[1].id, "b");
    assert!(!controller.ledger().is_editing());
    assert_eq!(controller.ledger().form(), &Form::default());
    assert_eq!(controller.notifier().count(Level::Success), 1);
}

#[tokio::test]
async fn test_update_with_blank_field_sends_nothing() {
    let mut controller = loaded_controller().await;
    controller.begin_edit("b");
    controller.ledger_mut().form_mut().date.clear();
    let calls_before = calls(&controller);

    assert_eq!(controller.submit().await, Outcome::Skipped);

    assert_eq!(calls(&controller), calls_before);
    assert!(controller.ledger().is_editing());
    assert_eq!(controller.ledger().find("b").unwrap().amount, dec!(900));
}

#[tokio::test]
async fn test_update_without_edit_reference_is_skipped() {
    let mut controller = loaded_controller().await;
    fill(&mut controller, "Coffee", "4.5", "2024-01-01");
    assert_eq!(controller.update().await, Outcome::Skipped);
    assert_eq!(controller.ledger().transactions().len(), 2);
}

#[tokio::test]
async fn test_failed_update_stays_editing() {
    let mut controller = loaded_controller().await;
    controller.begin_edit("a");
    controller.api.fail.store(true, Ordering::SeqCst);

    assert_eq!(controller.submit().await, Outcome::Failed);

    assert!(controller.ledger().is_editing());
    assert_eq!(controller.notifier().count(Level::Error), 1);
}

#[tokio::test]
async fn test_cancel_edit_clears_form() {
    let mut controller = loaded_controller().await;
    controller.begin_edit("a");
    controller.cancel_edit();
    assert!(!controller.ledger().is_editing());
    assert_eq!(controller.ledger().form(), &Form::default());
}

// ── delete ────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let mut controller = loaded_controller().await;

    assert_eq!(controller.delete("a").await, Outcome::Done);

    assert_eq!(controller.ledger().transactions().len(), 1);
    assert!(controller.ledger().find("a").is_none());
    assert_eq!(controller.notifier().count(Level::Info), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_record() {
    let mut controller = loaded_controller().await;
    controller.api.fail.store(true, Ordering::SeqCst);

    assert_eq!(controller.delete("a").await, Outcome::Failed);

    assert!(controller.ledger().find("a").is_some());
    assert_eq!(controller.notifier().count(Level::Error), 1);
}

#[tokio::test]
async fn test_delete_filters_on_confirmed_id() {
    let mut controller = loaded_controller().await;
    *controller.api.confirm_as.lock().unwrap() = Some("b".into());

    assert_eq!(controller.delete("a").await, Outcome::Done);

    assert!(controller.ledger().find("a").is_some());
    assert!(controller.ledger().find("b").is_none());
    assert_eq!(controller.ledger().transactions().len(), 1);
    assert_eq!(controller.notifier().count(Level::Info), 1);
}

#[tokio::test]
async fn test_delete_of_edited_record_clears_edit() {
    let mut controller = loaded_controller().await;
    controller.begin_edit("b");

    assert_eq!(controller.delete("b").await, Outcome::Done);

    assert!(controller.ledger().find("b").is_none());
    assert!(!controller.ledger().is_editing());
    assert_eq!(controller.ledger().form(), &Form::default());
}

#[tokio::test]
async fn test_delete_of_other_record_keeps_edit() {
    let mut controller = loaded_controller().await;
    controller.begin_edit("b");

    assert_eq!(controller.delete("a").await, Outcome::Done);

    assert_eq!(controller.ledger().editing().map(|t| t.id.as_str()), Some("b"));
    assert_eq!(controller.ledger().form().description, "Rent");
}
