use crate::{
    common::key::Key,
    error::Error,
    resource::{Entity, Keyed},
    route::Action,
    store::{Record, Store},
    write::update_item::UpdateAssignments,
};

use indexmap::IndexMap;
use serde::{Serialize, ser::Error as _};
use serde_json::{Value, json};
use std::marker::PhantomData;

/// Performs one store call per request for the entity `E`.
///
/// The handler borrows the shared store and the table name; it owns no state
/// and is rebuilt for every request.
pub struct ResourceHandler<'a, E, S> {
    store: &'a S,
    table: &'a str,
    entity: PhantomData<fn() -> E>,
}

impl<'a, E: Entity, S: Store> ResourceHandler<'a, E, S> {
    /// Handler for `E` records stored in `table`.
    pub fn new(store: &'a S, table: &'a str) -> Self {
        Self {
            store,
            table,
            entity: PhantomData,
        }
    }

    /// Run `action` with the raw request `body`.
    pub async fn handle(&self, action: Action, body: &[u8]) -> Result<Value, Error> {
        match action {
            Action::List => self.list().await,
            Action::Get(id) => self.get(&id).await,
            Action::Create(id) => self.create(id.as_deref(), body).await,
            Action::Replace(id) => self.replace(id.as_deref(), body).await,
            Action::Patch(id) => self.patch(id.as_deref(), body).await,
            Action::Delete(id) => self.delete(id.as_deref()).await,
        }
    }

    /// Every record of the table, unordered.
    pub async fn list(&self) -> Result<Value, Error> {
        let records = self.store.scan(self.table).await?;
        tracing::debug!(table = self.table, count = records.len(), "listed records");
        Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
    }

    /// The record with key `id`, verbatim.
    pub async fn get(&self, id: &str) -> Result<Value, Error> {
        match self.store.get(self.table, self.key(id)).await? {
            Some(record) => Ok(Value::Object(record)),
            None => Err(Error::NotFound(E::KIND)),
        }
    }

    /// Write the recognized fields of the body, replacing any existing record.
    pub async fn create(&self, path_id: Option<&str>, body: &[u8]) -> Result<Value, Error> {
        let entity: E = serde_json::from_slice(body)?;
        ensure_same_key::<E>(path_id, entity.key())?;
        let record = to_record(&entity)?;
        self.store.put(self.table, record).await?;
        Ok(message::<E>("created"))
    }

    /// Overwrite every non-key field. All fields must be present in the body.
    pub async fn replace(&self, path_id: Option<&str>, body: &[u8]) -> Result<Value, Error> {
        let replacement: E::Replacement = serde_json::from_slice(body)?;
        ensure_same_key::<E>(path_id, replacement.key())?;
        let key = self.key(replacement.key());
        let assignments = UpdateAssignments::from_fields(E::KEY, to_record(&replacement)?)?;
        self.store.update(self.table, key, assignments).await?;
        Ok(message::<E>("replaced"))
    }

    /// Set only the fields present in the body, leaving the others untouched.
    pub async fn patch(&self, path_id: Option<&str>, body: &[u8]) -> Result<Value, Error> {
        let fields: IndexMap<String, Value> = serde_json::from_slice(body)?;
        let id = match fields.get(E::KEY) {
            Some(Value::String(id)) => id.clone(),
            _ => return Err(Error::MissingKey(E::KEY)),
        };
        ensure_same_key::<E>(path_id, &id)?;
        let assignments = UpdateAssignments::from_fields(E::KEY, fields)?;
        tracing::debug!(
            table = self.table,
            id = %id,
            fields = assignments.len(),
            "patching record"
        );
        self.store
            .update(self.table, self.key(&id), assignments)
            .await?;
        Ok(message::<E>("updated"))
    }

    /// Delete by the id from the path. Deleting an absent key succeeds.
    pub async fn delete(&self, path_id: Option<&str>) -> Result<Value, Error> {
        let id = path_id.ok_or(Error::MissingId)?;
        self.store.delete(self.table, self.key(id)).await?;
        Ok(message::<E>("deleted"))
    }

    fn key(&self, id: &str) -> Key<String> {
        Key::new(E::KEY, id.to_string())
    }
}

fn message<E: Entity>(verb: &str) -> Value {
    json!({ "message": format!("{} {verb}", E::KIND) })
}

fn ensure_same_key<E: Entity>(path_id: Option<&str>, body_key: &str) -> Result<(), Error> {
    match path_id {
        Some(path_id) if path_id != body_key => Err(Error::KeyMismatch {
            field: E::KEY,
            path: path_id.to_string(),
            body: body_key.to_string(),
        }),
        _ => Ok(()),
    }
}

fn to_record<T: Serialize>(value: &T) -> Result<Record, Error> {
    match serde_json::to_value(value)? {
        Value::Object(record) => Ok(record),
        _ => Err(serde_json::Error::custom("record must serialize to an object").into()),
    }
}
