use crate::{
    common::key::Key,
    read, store,
    store::{Record, StoreError},
    write,
};

use aws_sdk_dynamodb::{Client, types};
use serde_dynamo::{from_item, from_items};
use serde_json::Value;
use std::collections;

/// Read settings applied to every `get` and `scan`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct ReadOptions {
    consistent_read: Option<bool>,
    scan_page_size: Option<i32>,
}

impl ReadOptions {
    fn get_item(self, table: &str, key: Key<String>) -> read::get_item::GetItem<String> {
        read::get_item::GetItem {
            key,
            single_read_args: read::common::SingleReadArgs {
                consistent_read: self.consistent_read,
                table_name: table.to_string(),
            },
        }
    }

    fn scan(self, table: &str) -> read::scan::Scan {
        read::scan::Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: self.consistent_read,
                limit: self.scan_page_size,
                table_name: table.to_string(),
            },
        }
    }
}

fn update_item(
    table: &str,
    key: Key<String>,
    assignments: write::update_item::UpdateAssignments<Value>,
) -> write::update_item::UpdateItem<Value> {
    write::update_item::UpdateItem {
        key: Key::new(key.name, Value::String(key.value)),
        assignments,
        write_args: write::common::WriteArgs {
            table_name: table.to_string(),
        },
    }
}

fn to_record(
    item: collections::HashMap<String, types::AttributeValue>,
) -> Result<Record, StoreError> {
    Ok(from_item(item)?)
}

fn to_records(
    items: Vec<collections::HashMap<String, types::AttributeValue>>,
) -> Result<Vec<Record>, StoreError> {
    Ok(from_items(items)?)
}

/// [`store::Store`] backed by DynamoDB.
///
/// Wraps a single SDK client created once at startup. The client is cheap to
/// clone and safe to share between concurrent requests.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    read_options: ReadOptions,
}

impl DynamoStore {
    /// Wrap an existing client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            read_options: ReadOptions::default(),
        }
    }

    /// Build a client from the default AWS configuration chain.
    ///
    /// `endpoint_url` points the client at a local DynamoDB when set.
    pub async fn from_env(endpoint_url: Option<&str>) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = endpoint_url {
            tracing::info!(endpoint_url, "using custom dynamodb endpoint");
            builder = builder.endpoint_url(endpoint_url);
        }
        Self::new(Client::from_conf(builder.build()))
    }

    /// Use strongly consistent reads for `get` and `scan`.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.read_options.consistent_read = Some(consistent_read);
        self
    }

    /// Bound the number of records evaluated per scan page.
    pub fn with_scan_page_size(mut self, scan_page_size: Option<i32>) -> Self {
        self.read_options.scan_page_size = scan_page_size;
        self
    }
}

impl store::Store for DynamoStore {
    #[tracing::instrument(name = "dynamodb_rest.get_item", skip(self), err)]
    async fn get(&self, table: &str, key: Key<String>) -> Result<Option<Record>, StoreError> {
        let output = self
            .read_options
            .get_item(table, key)
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        output.item.map(to_record).transpose()
    }

    #[tracing::instrument(name = "dynamodb_rest.scan", skip(self), err)]
    async fn scan(&self, table: &str) -> Result<Vec<Record>, StoreError> {
        let output = self
            .read_options
            .scan(table)
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        tracing::debug!(
            count = output.count,
            scanned_count = output.scanned_count,
            "scan complete"
        );
        to_records(output.items.unwrap_or_default())
    }

    #[tracing::instrument(name = "dynamodb_rest.put_item", skip(self, record), err)]
    async fn put(&self, table: &str, record: Record) -> Result<(), StoreError> {
        let put_item = write::put_item::PutItem {
            item: record,
            write_args: write::common::WriteArgs {
                table_name: table.to_string(),
            },
        };
        put_item
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    #[tracing::instrument(name = "dynamodb_rest.update_item", skip(self), err)]
    async fn update(
        &self,
        table: &str,
        key: Key<String>,
        assignments: write::update_item::UpdateAssignments<Value>,
    ) -> Result<(), StoreError> {
        update_item(table, key, assignments)
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }

    #[tracing::instrument(name = "dynamodb_rest.delete_item", skip(self), err)]
    async fn delete(&self, table: &str, key: Key<String>) -> Result<(), StoreError> {
        let delete_item = write::delete_item::DeleteItem {
            key,
            write_args: write::common::WriteArgs {
                table_name: table.to_string(),
            },
        };
        delete_item
            .send(&self.client)
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;
        Ok(())
    }
}
