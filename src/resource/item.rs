use crate::resource::{Entity, Keyed};

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// An item as written on creation.
///
/// Fields other than the key are optional and left out of the stored record
/// when absent. Unknown fields in the body are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Primary key.
    pub item_id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price, kept in the numeric form it was sent in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    /// Owning user. Not checked against the users table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// An item as accepted by full replacement.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReplacement {
    /// Primary key.
    pub item_id: String,
    /// Display name.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Unit price.
    pub price: Number,
    /// Owning user.
    pub user_id: String,
}

impl Keyed for Item {
    fn key(&self) -> &str {
        &self.item_id
    }
}

impl Keyed for ItemReplacement {
    fn key(&self) -> &str {
        &self.item_id
    }
}

impl Entity for Item {
    type Replacement = ItemReplacement;

    const KIND: &'static str = "item";
    const KEY: &'static str = "itemId";
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn create_shape_keeps_only_known_fields() {
        let item: Item = serde_json::from_value(json!({
            "itemId": "i1",
            "name": "Widget",
            "colour": "red"
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"itemId": "i1", "name": "Widget"})
        );
    }

    #[test]
    fn create_shape_requires_key() {
        let actual = serde_json::from_value::<Item>(json!({"name": "Widget"}));
        assert!(actual.unwrap_err().to_string().contains("itemId"));
    }

    #[test]
    fn replacement_requires_every_field() {
        let actual = serde_json::from_value::<ItemReplacement>(json!({
            "itemId": "i1",
            "name": "Widget",
            "description": "blue",
            "userId": "u1"
        }));
        assert!(actual.unwrap_err().to_string().contains("price"));
    }

    #[test]
    fn price_keeps_its_numeric_form() {
        for price in [json!(42), json!(9.99), json!(-3)] {
            let item: Item =
                serde_json::from_value(json!({"itemId": "i1", "price": price.clone()})).unwrap();
            assert_eq!(
                serde_json::to_value(&item).unwrap(),
                json!({"itemId": "i1", "price": price})
            );
        }
    }

    #[test]
    fn price_must_be_a_number() {
        let actual = serde_json::from_value::<Item>(json!({"itemId": "i1", "price": "42"}));
        assert!(actual.is_err());
    }
}
