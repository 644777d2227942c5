use crate::{
    common::key::Key,
    store,
    store::{Record, StoreError},
    write::update_item::UpdateAssignments,
};

use serde_json::Value;
use std::collections;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    key_name: String,
    records: collections::BTreeMap<String, Record>,
}

/// [`store::Store`] kept in process memory.
///
/// Tables must be declared with their key attribute before use, mirroring a
/// provisioned DynamoDB table. Scans return records ordered by key.
///
/// ```rust
/// use dynamodb_rest::store::MemoryStore;
///
/// let store = MemoryStore::new()
///     .with_table("items", "itemId")
///     .with_table("users", "userId");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<collections::HashMap<String, Table>>,
}

impl MemoryStore {
    /// An empty store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table keyed on `key_name`.
    pub fn with_table(self, name: impl Into<String>, key_name: impl Into<String>) -> Self {
        let mut tables = self.tables.into_inner();
        tables.insert(
            name.into(),
            Table {
                key_name: key_name.into(),
                ..Default::default()
            },
        );
        Self {
            tables: RwLock::new(tables),
        }
    }
}

fn key_value(key_name: &str, record: &Record) -> Result<String, StoreError> {
    match record.get(key_name) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(StoreError::MissingKey(key_name.to_string())),
    }
}

impl Table {
    fn check_key(&self, key: &Key<String>) -> Result<(), StoreError> {
        if key.name != self.key_name {
            return Err(StoreError::MissingKey(self.key_name.clone()));
        }
        Ok(())
    }
}

impl store::Store for MemoryStore {
    async fn get(&self, table: &str, key: Key<String>) -> Result<Option<Record>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        table.check_key(&key)?;
        Ok(table.records.get(&key.value).cloned())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        Ok(table.records.values().cloned().collect())
    }

    async fn put(&self, table: &str, record: Record) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        let value = key_value(&table.key_name, &record)?;
        table.records.insert(value, record);
        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        key: Key<String>,
        assignments: UpdateAssignments<Value>,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        table.check_key(&key)?;
        let record = table.records.entry(key.value.clone()).or_insert_with(|| {
            Record::from_iter([(key.name.clone(), Value::String(key.value.clone()))])
        });
        record.extend(assignments.into_fields());
        Ok(())
    }

    async fn delete(&self, table: &str, key: Key<String>) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        table.check_key(&key)?;
        table.records.remove(&key.value);
        Ok(())
    }
}
