use tracing::{debug, error, info, warn};

use super::state::{FormError, Ledger, LedgerEvent};
use crate::api::{ApiError, TransactionApi};
use crate::notify::Notifier;

const MSG_FETCH_FAILED: &str = "An error occurred while fetching transactions.";
const MSG_ADDED: &str = "Transaction added successfully!";
const MSG_ADD_FAILED: &str = "An error occurred while adding the transaction.";
const MSG_UPDATED: &str = "Transaction updated successfully!";
const MSG_UPDATE_FAILED: &str = "An error occurred while updating the transaction.";
const MSG_DELETED: &str = "Transaction deleted.";
const MSG_DELETE_FAILED: &str = "An error occurred while deleting the transaction.";
const MSG_BAD_AMOUNT: &str = "Amount must be a non-negative number.";

/// What happened to a requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The server accepted it and the ledger was updated.
    Done,
    /// Nothing was sent (incomplete form, nothing to edit, unknown id).
    Skipped,
    Failed,
}

/// Owns the ledger and the notifier, and is the only thing that talks to the API.
pub(crate) struct Controller<A> {
    pub(super) api: A,
    ledger: Ledger,
    notifier: Notifier,
}

impl<A: TransactionApi> Controller<A> {
    pub(crate) fn new(api: A) -> Self {
        Self {
            api,
            ledger: Ledger::default(),
            notifier: Notifier::default(),
        }
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub(crate) fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub(crate) fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    fn apply(&mut self, event: LedgerEvent) {
        self.ledger = std::mem::take(&mut self.ledger).apply(event);
    }

    /// Replace the store with the server's first page.
    pub(crate) async fn refresh(&mut self) -> Outcome {
        match self.api.list().await {
            Ok(transactions) => {
                info!(count = transactions.len(), "fetched transactions");
                self.apply(LedgerEvent::Loaded(transactions));
                Outcome::Done
            }
            Err(ApiError::MissingData(field)) => {
                warn!(field, "list response had no collection, keeping current store");
                Outcome::Skipped
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "error fetching transactions");
                self.notifier.error(MSG_FETCH_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Create or update, depending on whether a transaction is being edited.
    pub(crate) async fn submit(&mut self) -> Outcome {
        if self.ledger.is_editing() {
            self.update().await
        } else {
            self.create().await
        }
    }

    pub(crate) async fn create(&mut self) -> Outcome {
        let Some(input) = self.validated_input() else {
            return Outcome::Skipped;
        };

        match self.api.create(&input).await {
            Ok(txn) => {
                info!(id = %txn.id, "transaction added");
                self.apply(LedgerEvent::Created(txn));
                self.notifier.success(MSG_ADDED);
                Outcome::Done
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, "error adding transaction");
                self.notifier.error(MSG_ADD_FAILED);
                Outcome::Failed
            }
        }
    }

    pub(crate) async fn update(&mut self) -> Outcome {
        let Some(id) = self.ledger.editing().map(|t| t.id.clone()) else {
            debug!("update requested with nothing being edited");
            return Outcome::Skipped;
        };
        let Some(input) = self.validated_input() else {
            return Outcome::Skipped;
        };

        match self.api.update(&id, &input).await {
            Ok(txn) => {
                info!(id = %txn.id, "transaction updated");
                self.apply(LedgerEvent::Updated(txn));
                self.notifier.success(MSG_UPDATED);
                Outcome::Done
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, %id, "error updating transaction");
                self.notifier.error(MSG_UPDATE_FAILED);
                Outcome::Failed
            }
        }
    }

    pub(crate) async fn delete(&mut self, id: &str) -> Outcome {
        match self.api.delete(id).await {
            Ok(deleted_id) => {
                if deleted_id != id {
                    warn!(requested = id, confirmed = %deleted_id, "server confirmed a different id");
                }
                info!(id = %deleted_id, "transaction deleted");
                self.apply(LedgerEvent::Deleted(deleted_id));
                self.notifier.info(MSG_DELETED);
                Outcome::Done
            }
            Err(e) => {
                error!(kind = e.kind(), error = %e, id, "error deleting transaction");
                self.notifier.error(MSG_DELETE_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Load a stored transaction into the form. Returns false for an unknown id.
    pub(crate) fn begin_edit(&mut self, id: &str) -> bool {
        match self.ledger.find(id).cloned() {
            Some(txn) => {
                self.apply(LedgerEvent::EditRequested(txn));
                true
            }
            None => false,
        }
    }

    pub(crate) fn cancel_edit(&mut self) {
        self.apply(LedgerEvent::EditCancelled);
    }

    /// Blank fields are a silent no-op; a bad amount is reported.
    fn validated_input(&mut self) -> Option<crate::models::TransactionInput> {
        match self.ledger.form().to_input() {
            Ok(input) => Some(input),
            Err(FormError::Incomplete) => {
                debug!("form incomplete, nothing sent");
                None
            }
            Err(e @ FormError::InvalidAmount(_)) => {
                warn!(error = %e, "rejected form");
                self.notifier.error(MSG_BAD_AMOUNT);
                None
            }
        }
    }
}
