#![deny(missing_docs)]

//! # DynamoDB REST
//!
//! A request-routed CRUD API for two resources, **items** and **users**, each
//! stored in its own DynamoDB table.
//!
//! ## Overview
//!
//! Every request is resolved into a typed [`route::Route`], handled by a
//! [`resource::ResourceHandler`] with exactly one call to the [`store::Store`],
//! and answered with a JSON envelope:
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | GET | `/items` | list all items |
//! | GET | `/items/{itemId}` | read one item |
//! | POST | `/items` | create (or overwrite) an item |
//! | PUT | `/items[/{itemId}]` | replace every field of an item |
//! | PATCH | `/items[/{itemId}]` | set only the fields present in the body |
//! | DELETE | `/items/{itemId}` | delete an item |
//!
//! `/users` follows the same shape, keyed by `userId`.
//!
//! ## Quick Example
//!
//! Partial updates never spell out expression strings; the assignments are
//! turned into placeholders by the crate:
//!
//! ```no_run
//! use aws_sdk_dynamodb::Client;
//! use dynamodb_rest::{common, write};
//! use serde_json::{Value, json};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::from_conf(aws_sdk_dynamodb::config::Config::builder().build());
//! let update_item = write::update_item::UpdateItem {
//!     key: common::key::Key::new("itemId", Value::String("i1".to_string())),
//!     assignments: write::update_item::UpdateAssignments::from_fields(
//!         "itemId",
//!         [
//!             ("name".to_string(), json!("Widget")),
//!             ("price".to_string(), json!(12.5)),
//!         ],
//!     )?,
//!     write_args: write::common::WriteArgs {
//!         table_name: "items".to_string(),
//!     },
//! };
//! // The crate builds: "SET #set0 = :set0, #set1 = :set1"
//! update_item.send(&client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`], [`mod@read`], [`mod@write`] - typed DynamoDB request builders
//! - [`mod@store`] - the table store interface and its implementations
//! - [`mod@resource`] - resource shapes and the generic handler
//! - [`mod@route`], [`mod@router`] - route table and dispatch
//! - [`mod@server`] - axum adapter
//! - [`mod@config`], [`mod@logging`] - runtime configuration and tracing setup

/// Common utilities for keys and expressions.
pub mod common;

/// Runtime configuration.
pub mod config;

/// Request-level errors.
pub mod error;

/// Tracing subscriber setup.
pub mod logging;

/// Read operations for retrieving records from DynamoDB tables.
pub mod read;

/// Resources served by the API.
pub mod resource;

/// Route table.
pub mod route;

/// Request dispatch and response envelope.
pub mod router;

/// HTTP adapter.
pub mod server;

/// Table store interface and implementations.
pub mod store;

/// Write operations for modifying records in DynamoDB tables.
pub mod write;
