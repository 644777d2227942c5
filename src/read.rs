//! Read operations for retrieving records from DynamoDB tables.
//!
//! - Getting a single record by primary key
//! - Scanning an entire table

/// Common utilities and types for read operations.
pub mod common;

/// Get item operation for retrieving a single record by primary key.
pub mod get_item;

/// Scan operation for retrieving every record of a table.
pub mod scan;
