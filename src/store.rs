//! Key-value table store consumed by the resource handlers.
//!
//! The [`Store`] trait exposes the five primitives the API needs. The
//! production implementation talks to DynamoDB through the request builders of
//! [`mod@crate::read`] and [`mod@crate::write`]; the in-memory implementation
//! backs tests and local runs.

/// DynamoDB-backed store.
pub mod dynamo;

/// In-process store.
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use crate::{common::key::Key, write::update_item::UpdateAssignments};

use serde_json::Value;
use std::future::Future;

/// A record as stored in a table: a flat JSON object.
pub type Record = serde_json::Map<String, Value>;

/// Errors raised by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record could not be converted to or from DynamoDB attribute values.
    #[error("failed to convert record: {0}")]
    Serialization(#[from] serde_dynamo::Error),
    /// DynamoDB rejected or failed the request.
    #[error(transparent)]
    DynamoDb(#[from] aws_sdk_dynamodb::Error),
    /// The table does not exist.
    #[error("requested table not found: {0}")]
    TableNotFound(String),
    /// A record was written without its key attribute.
    #[error("record is missing key attribute {0}")]
    MissingKey(String),
}

/// Table store primitives.
///
/// Every method performs exactly one round trip. Implementations hold no
/// per-request state and are shared across concurrent requests.
pub trait Store: Send + Sync + 'static {
    /// Fetch one record by primary key.
    fn get(
        &self,
        table: &str,
        key: Key<String>,
    ) -> impl Future<Output = Result<Option<Record>, StoreError>> + Send;

    /// Read every record of the table, in no particular order.
    fn scan(&self, table: &str) -> impl Future<Output = Result<Vec<Record>, StoreError>> + Send;

    /// Write a record, replacing any record with the same key.
    fn put(&self, table: &str, record: Record)
    -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Set the given fields of the record with `key`, creating it when absent.
    fn update(
        &self,
        table: &str,
        key: Key<String>,
        assignments: UpdateAssignments<Value>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete the record with `key`. Deleting an absent key succeeds.
    fn delete(
        &self,
        table: &str,
        key: Key<String>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
