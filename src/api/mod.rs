mod error;
mod graphql;

use async_trait::async_trait;

use crate::models::{Transaction, TransactionInput};

pub(crate) use error::ApiError;
pub(crate) use graphql::{GraphqlClient, PAGE_SIZE};

/// The four remote operations on the transaction collection.
#[async_trait]
pub(crate) trait TransactionApi {
    /// First page of transactions, in backend order.
    async fn list(&self) -> Result<Vec<Transaction>, ApiError>;

    async fn create(&self, input: &TransactionInput) -> Result<Transaction, ApiError>;

    /// Full replacement of the editable fields of transaction `id`.
    async fn update(&self, id: &str, input: &TransactionInput) -> Result<Transaction, ApiError>;

    /// Returns the id the server confirms as deleted.
    async fn delete(&self, id: &str) -> Result<String, ApiError>;
}
