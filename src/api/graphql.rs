use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ApiError, TransactionApi};
use crate::models::{Transaction, TransactionInput};

/// Page size of the list query.
pub(crate) const PAGE_SIZE: usize = 50;

const API_KEY_HEADER: &str = "x-api-key";

const LIST_QUERY: &str = r#"
{
  transactionCollection(first: 50) {
    edges {
      node {
        id
        description
        amount
        date
        type
      }
    }
  }
}
"#;

const CREATE_MUTATION: &str = r#"
mutation TransactionCreate($input: TransactionCreateInput!) {
  transactionCreate(input: $input) {
    transaction {
      id
      description
      amount
      date
      type
    }
  }
}
"#;

const UPDATE_MUTATION: &str = r#"
mutation TransactionUpdate($by: TransactionByInput!, $input: TransactionUpdateInput!) {
  transactionUpdate(by: $by, input: $input) {
    transaction {
      id
      description
      amount
      date
      type
    }
  }
}
"#;

const DELETE_MUTATION: &str = r#"
mutation TransactionDelete($id: ID!) {
  transactionDelete(by: { id: $id }) {
    deletedId
  }
}
"#;

// ── Wire types ────────────────────────────────────────────────

#[derive(Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<V>,
}

#[derive(Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Serialize)]
struct InputVariables<'a> {
    input: &'a TransactionInput,
}

#[derive(Serialize)]
struct ById<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct UpdateVariables<'a> {
    by: ById<'a>,
    input: &'a TransactionInput,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    transaction_collection: Option<Connection>,
}

#[derive(Deserialize)]
struct Connection {
    edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct Edge {
    node: Transaction,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    transaction_create: Option<TransactionPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    transaction_update: Option<TransactionPayload>,
}

#[derive(Deserialize)]
struct TransactionPayload {
    transaction: Transaction,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    transaction_delete: Option<DeletePayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletePayload {
    deleted_id: String,
}

// ── Client ────────────────────────────────────────────────────

/// GraphQL-over-HTTP client for the transaction backend.
pub(crate) struct GraphqlClient {
    http_client: HttpClient,
    endpoint: String,
    headers: HeaderMap,
}

impl GraphqlClient {
    const TIMEOUT: Duration = Duration::from_secs(30);

    pub(crate) fn new(endpoint: String, api_key: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http_client = HttpClient::builder().timeout(Self::TIMEOUT).build()?;

        Ok(Self {
            http_client,
            endpoint,
            headers,
        })
    }

    /// POST one operation and unwrap the GraphQL envelope.
    async fn execute<V, D>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Option<V>,
    ) -> Result<D, ApiError>
    where
        V: Serialize + Send + Sync,
        D: DeserializeOwned,
    {
        let body = GraphqlRequest { query, variables };
        debug!(operation, endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(operation, status = status.as_u16(), body = %text, "GraphQL response");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: GraphqlResponse<D> = serde_json::from_str(&text)?;
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        match envelope.data {
            // Partial results still count; the errors only go to the log.
            Some(data) => {
                if !messages.is_empty() {
                    warn!(operation, errors = %messages.join("; "), "GraphQL errors alongside data");
                }
                Ok(data)
            }
            None if !messages.is_empty() => Err(ApiError::Graphql(messages.join("; "))),
            None => Err(ApiError::MissingData("data")),
        }
    }
}

#[async_trait]
impl TransactionApi for GraphqlClient {
    async fn list(&self) -> Result<Vec<Transaction>, ApiError> {
        let data: ListData = self
            .execute("transactionCollection", LIST_QUERY, None::<()>)
            .await?;
        let collection = data
            .transaction_collection
            .ok_or(ApiError::MissingData("transactionCollection"))?;
        Ok(collection.edges.into_iter().map(|e| e.node).collect())
    }

    async fn create(&self, input: &TransactionInput) -> Result<Transaction, ApiError> {
        let data: CreateData = self
            .execute(
                "transactionCreate",
                CREATE_MUTATION,
                Some(InputVariables { input }),
            )
            .await?;
        data.transaction_create
            .map(|p| p.transaction)
            .ok_or(ApiError::MissingData("transactionCreate"))
    }

    async fn update(&self, id: &str, input: &TransactionInput) -> Result<Transaction, ApiError> {
        let variables = UpdateVariables {
            by: ById { id },
            input,
        };
        let data: UpdateData = self
            .execute("transactionUpdate", UPDATE_MUTATION, Some(variables))
            .await?;
        data.transaction_update
            .map(|p| p.transaction)
            .ok_or(ApiError::MissingData("transactionUpdate"))
    }

    async fn delete(&self, id: &str) -> Result<String, ApiError> {
        let data: DeleteData = self
            .execute("transactionDelete", DELETE_MUTATION, Some(ById { id }))
            .await?;
        data.transaction_delete
            .map(|p| p.deleted_id)
            .ok_or(ApiError::MissingData("transactionDelete"))
    }
}
