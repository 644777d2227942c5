//! Write operations for modifying records in DynamoDB tables.
//!
//! - Putting new records or replacing existing ones
//! - Setting fields of a record by primary key
//! - Deleting records by primary key

/// Common utilities and types for write operations.
pub mod common;

/// Delete item operation for removing records from tables.
pub mod delete_item;

/// Put item operation for creating or replacing records.
pub mod put_item;

/// Update item operation for setting fields of a record.
pub mod update_item;
