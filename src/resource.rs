//! Resources exposed by the API and the handler shared by all of them.
//!
//! Each resource is a flat record in its own table, keyed by a single string
//! attribute. A resource type describes its wire shape twice: once leniently
//! for creation, where only the key is required, and once strictly for full
//! replacement, where every field is.

/// Generic per-resource request handler.
pub mod handler;

/// The `items` resource.
pub mod item;

/// The `users` resource.
pub mod user;

pub use handler::ResourceHandler;
pub use item::{Item, ItemReplacement};
pub use user::{User, UserReplacement};

use serde::{Serialize, de::DeserializeOwned};

/// A record carrying its own primary key.
pub trait Keyed: Serialize + DeserializeOwned + Send + 'static {
    /// Value of the primary key.
    fn key(&self) -> &str;
}

/// A resource kind served under its own path prefix.
pub trait Entity: Keyed {
    /// Shape accepted by full replacement; every field is required.
    type Replacement: Keyed;

    /// Singular name used in messages, e.g. `item`.
    const KIND: &'static str;

    /// Primary key attribute, e.g. `itemId`.
    const KEY: &'static str;
}
