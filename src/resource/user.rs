use crate::resource::{Entity, Keyed};

use serde::{Deserialize, Serialize};

/// A user as written on creation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key.
    pub user_id: String,
    /// Full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact address. Not validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A user as accepted by full replacement.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReplacement {
    /// Primary key.
    pub user_id: String,
    /// Full name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.user_id
    }
}

impl Keyed for UserReplacement {
    fn key(&self) -> &str {
        &self.user_id
    }
}

impl Entity for User {
    type Replacement = UserReplacement;

    const KIND: &'static str = "user";
    const KEY: &'static str = "userId";
}
