use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{self, Transaction, TransactionInput, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Description,
    Amount,
    Date,
    Kind,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[Self::Description, Self::Amount, Self::Date, Self::Kind]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::Description => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Kind,
            Self::Kind => Self::Description,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Self::Description => Self::Kind,
            Self::Amount => Self::Description,
            Self::Date => Self::Amount,
            Self::Kind => Self::Date,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Description => write!(f, "Description"),
            Self::Amount => write!(f, "Amount"),
            Self::Date => write!(f, "Date"),
            Self::Kind => write!(f, "Type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormError {
    /// A required text field is blank.
    Incomplete,
    InvalidAmount(String),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incomplete => write!(f, "description, amount and date are required"),
            Self::InvalidAmount(raw) => write!(f, "invalid amount '{raw}'"),
        }
    }
}

/// Raw field text of the transaction being composed or edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Form {
    pub(crate) description: String,
    pub(crate) amount: String,
    pub(crate) date: String,
    pub(crate) kind: TransactionKind,
}

impl Form {
    pub(crate) fn from_transaction(txn: &Transaction) -> Self {
        Self {
            description: txn.description.clone(),
            amount: txn.amount.normalize().to_string(),
            date: txn.date.clone(),
            kind: txn.kind,
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.description.trim().is_empty()
            && !self.amount.trim().is_empty()
            && !self.date.trim().is_empty()
    }

    /// Text buffer behind a field, `None` for the type selector.
    pub(crate) fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Description => Some(&mut self.description),
            FormField::Amount => Some(&mut self.amount),
            FormField::Date => Some(&mut self.date),
            FormField::Kind => None,
        }
    }

    pub(crate) fn value(&self, field: FormField) -> String {
        match field {
            FormField::Description => self.description.clone(),
            FormField::Amount => self.amount.clone(),
            FormField::Date => self.date.clone(),
            FormField::Kind => self.kind.to_string(),
        }
    }

    /// Validate and convert to the payload sent to the server.
    pub(crate) fn to_input(&self) -> Result<TransactionInput, FormError> {
        if !self.is_complete() {
            return Err(FormError::Incomplete);
        }
        let amount = parse_amount(&self.amount)?;
        Ok(TransactionInput {
            description: self.description.trim().to_string(),
            amount,
            date: self.date.trim().to_string(),
            kind: self.kind,
        })
    }
}

/// Parse a non-negative amount, tolerating a leading `$` and thousands separators.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, FormError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount =
        Decimal::from_str(&cleaned).map_err(|_| FormError::InvalidAmount(raw.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FormError::InvalidAmount(raw.to_string()));
    }
    Ok(amount)
}

/// Everything the client knows: the store, the form and the editing reference.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
    form: Form,
    editing: Option<Transaction>,
}

#[derive(Debug, Clone)]
pub(crate) enum LedgerEvent {
    Loaded(Vec<Transaction>),
    Created(Transaction),
    Updated(Transaction),
    Deleted(String),
    EditRequested(Transaction),
    EditCancelled,
}

impl Ledger {
    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn form(&self) -> &Form {
        &self.form
    }

    pub(crate) fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub(crate) fn editing(&self) -> Option<&Transaction> {
        self.editing.as_ref()
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub(crate) fn find(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn total(&self) -> Option<Decimal> {
        models::total(&self.transactions)
    }

    /// Apply one event, returning the next state.
    pub(crate) fn apply(mut self, event: LedgerEvent) -> Self {
        match event {
            LedgerEvent::Loaded(transactions) => {
                self.transactions = transactions;
            }
            LedgerEvent::Created(txn) => {
                match self.transactions.iter_mut().find(|t| t.id == txn.id) {
                    Some(existing) => *existing = txn,
                    None => self.transactions.push(txn),
                }
                self.form = Form::default();
            }
            LedgerEvent::Updated(txn) => {
                if let Some(existing) = self.transactions.iter_mut().find(|t| t.id == txn.id) {
                    *existing = txn;
                }
                self.form = Form::default();
                self.editing = None;
            }
            LedgerEvent::Deleted(id) => {
                self.transactions.retain(|t| t.id != id);
                if self.editing.as_ref().is_some_and(|t| t.id == id) {
                    self.form = Form::default();
                    self.editing = None;
                }
            }
            LedgerEvent::EditRequested(txn) => {
                self.form = Form::from_transaction(&txn);
                self.editing = Some(txn);
            }
            LedgerEvent::EditCancelled => {
                self.form = Form::default();
                self.editing = None;
            }
        }
        self
    }
}
