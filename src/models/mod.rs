mod transaction;

pub use transaction::{total, Transaction, TransactionInput, TransactionKind};

#[cfg(test)]
mod tests;
