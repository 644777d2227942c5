//! Runtime configuration, read from command-line flags or the environment.

use clap::{Parser, ValueEnum};

/// Table names of the two resources.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tables {
    /// Table holding items, keyed by `itemId`.
    pub items: String,
    /// Table holding users, keyed by `userId`.
    pub users: String,
}

/// Output format of the log subscriber.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Backend serving the tables.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum StoreBackend {
    /// Amazon DynamoDB through the default AWS credential chain.
    #[default]
    Dynamodb,
    /// Process memory; data is lost on exit.
    Memory,
}

/// Server configuration.
#[derive(Clone, Debug, Parser)]
#[command(name = "dynamodb-rest", version, about)]
pub struct Config {
    /// Name of the items table.
    #[arg(long, env = "ITEMS_TABLE", default_value = "items")]
    pub items_table: String,

    /// Name of the users table.
    #[arg(long, env = "USERS_TABLE", default_value = "users")]
    pub users_table: String,

    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind_addr: String,

    /// Log filter directives, `RUST_LOG` syntax.
    #[arg(
        long,
        env = "RUST_LOG",
        default_value = "dynamodb_rest=info,tower_http=debug"
    )]
    pub log_filter: String,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Backend serving the tables.
    #[arg(long, env = "STORE", value_enum, default_value_t = StoreBackend::Dynamodb)]
    pub store: StoreBackend,

    /// Custom DynamoDB endpoint, e.g. `http://localhost:8000` for DynamoDB Local.
    #[arg(long, env = "DYNAMODB_ENDPOINT")]
    pub dynamodb_endpoint: Option<String>,

    /// Use strongly consistent reads.
    #[arg(long, env = "CONSISTENT_READ")]
    pub consistent_read: bool,

    /// Records DynamoDB evaluates per scan page; every page is still read.
    #[arg(long, env = "SCAN_PAGE_SIZE", value_parser = clap::value_parser!(i32).range(1..))]
    pub scan_page_size: Option<i32>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    /// Parse flags and environment, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the table names are empty or identical.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check values that clap cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_table.trim().is_empty() || self.users_table.trim().is_empty() {
            return Err(ConfigError::Validation(
                "table names must be non-empty".to_string(),
            ));
        }
        if self.items_table == self.users_table {
            return Err(ConfigError::Validation(format!(
                "items and users must use different tables, both are {}",
                self.items_table
            )));
        }
        Ok(())
    }

    /// Table names for the router.
    pub fn tables(&self) -> Tables {
        Tables {
            items: self.items_table.clone(),
            users: self.users_table.clone(),
        }
    }
}
