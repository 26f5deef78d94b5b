use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Revenue,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Revenue => "revenue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "e" => Some(Self::Expense),
            "revenue" | "income" | "r" => Some(Self::Revenue),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Expense => Self::Revenue,
            Self::Revenue => Self::Expense,
        }
    }

    /// Signed contribution of `amount` to the running total.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Expense => -amount,
            Self::Revenue => amount,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Revenue => write!(f, "Revenue"),
        }
    }
}

/// A transaction as stored by the backend. The `id` is assigned server-side
/// and treated as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// The client-editable fields, sent whole on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Decimal,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Revenue adds, expenses subtract. `None` when the sum leaves the
/// range `Decimal` can hold.
pub fn total(transactions: &[Transaction]) -> Option<Decimal> {
    transactions
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.signed_amount()))
}
