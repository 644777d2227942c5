use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};
use std::collections;

/// Prefix shared by the name and value placeholders of SET assignments.
const SET_PREFIX: &str = "set";

/// Raised when an update would carry no assignment at all.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("no fields to update")]
pub struct EmptyUpdate;

/// Ordered, non-empty set of `field = value` assignments.
///
/// Built from the fields of a record minus its primary key. Each field is
/// assigned independently, so the order only affects placeholder numbering.
///
/// ```rust
/// use dynamodb_rest::write::update_item::UpdateAssignments;
/// use indexmap::IndexMap;
/// use serde_json::{Value, json};
///
/// let fields = IndexMap::from([
///     ("itemId".to_string(), Value::String("i1".to_string())),
///     ("price".to_string(), json!(12.5)),
/// ]);
/// let assignments = UpdateAssignments::from_fields("itemId", fields).unwrap();
/// assert_eq!(assignments.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateAssignments<T>(IndexMap<String, T>);

impl<T> UpdateAssignments<T> {
    /// Collect every field except `key_name` into assignments.
    ///
    /// Fails with [`EmptyUpdate`] when nothing but the key is left.
    pub fn from_fields(
        key_name: &str,
        fields: impl IntoIterator<Item = (String, T)>,
    ) -> std::result::Result<Self, EmptyUpdate> {
        let assignments: IndexMap<String, T> = fields
            .into_iter()
            .filter(|(field, _)| field != key_name)
            .collect();
        if assignments.is_empty() {
            return Err(EmptyUpdate);
        }
        Ok(Self(assignments))
    }

    /// Number of assigned fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an empty update cannot be built.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the assignments, returning the underlying ordered map.
    pub fn into_fields(self) -> IndexMap<String, T> {
        self.0
    }
}

impl<T: Serialize> TryFrom<UpdateAssignments<T>> for common::ExpressionInput {
    type Error = Error;

    fn try_from(assignments: UpdateAssignments<T>) -> Result<Self> {
        let mut operations = Vec::with_capacity(assignments.len());
        for (index, (field, value)) in assignments.into_fields().into_iter().enumerate() {
            let (name_placeholder, value_placeholder) = common::placeholders(SET_PREFIX, index);
            let value = to_attribute_value(value)?;
            let operation = common::ExpressionInput {
                expression: format!("{name_placeholder} = {value_placeholder}"),
                expression_attribute_names: collections::HashMap::from([(
                    name_placeholder,
                    field,
                )]),
                expression_attribute_values: collections::HashMap::from([(
                    value_placeholder,
                    value,
                )]),
            };
            operations.push(operation);
        }
        let mut operation = common::ExpressionInput::merge(", ", operations);
        operation.expression = format!("SET {}", operation.expression);
        Ok(operation)
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: collections::HashMap<String, types::AttributeValue>,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// Sets every assigned field and leaves all other attributes untouched. As
/// with DynamoDB's UpdateItem, a record that does not exist yet is created
/// with its key and the assigned fields.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_rest::{common, write};
/// use serde_json::{Value, json};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let assignments = write::update_item::UpdateAssignments::from_fields(
///     "itemId",
///     [("price".to_string(), json!(12.5))],
/// )?;
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::Key::new("itemId", Value::String("i1".to_string())),
///     assignments,
///     write_args: write::common::WriteArgs {
///         table_name: "items".to_string(),
///     },
/// };
/// // Sends "SET #set0 = :set0" with #set0 -> price and :set0 -> 12.5
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the record to update.
    pub key: common::key::Key<T>,
    /// The fields to set.
    pub assignments: UpdateAssignments<T>,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let key = update_item.key.try_into()?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let operation = update_item.assignments.try_into()?;
        let update_expression = write_operation.merge_expression(operation);
        let operation = Self {
            key,
            update_expression,
            write_operation,
        };
        Ok(operation)
    }
}

impl<T: Serialize> UpdateItem<T> {
    /// Execute the update item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case::single(
        vec![
            ("itemId".to_string(), json!("x")),
            ("price".to_string(), json!(42)),
        ],
        common::ExpressionInput {
            expression: "SET #set0 = :set0".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "price".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::N(
                            "42".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::multiple_in_order(
        vec![
            ("name".to_string(), json!("Widget")),
            ("itemId".to_string(), json!("x")),
            ("description".to_string(), json!("blue")),
        ],
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "name".to_string()),
                    ("#set1".to_string(), "description".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "Widget".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::S(
                            "blue".to_string()
                        )
                    ),
                ]
            ),
        }
    )]
    #[case::reserved_and_punctuated_names(
        vec![
            ("itemId".to_string(), json!("x")),
            ("size".to_string(), json!("L")),
            ("shipping-class".to_string(), Value::Null),
        ],
        common::ExpressionInput {
            expression: "SET #set0 = :set0, #set1 = :set1".to_string(),
            expression_attribute_names: collections::HashMap::from(
                [
                    ("#set0".to_string(), "size".to_string()),
                    ("#set1".to_string(), "shipping-class".to_string()),
                ]
            ),
            expression_attribute_values: collections::HashMap::from(
                [
                    (
                        ":set0".to_string(),
                        types::AttributeValue::S(
                            "L".to_string()
                        )
                    ),
                    (
                        ":set1".to_string(),
                        types::AttributeValue::Null(
                            true
                        )
                    ),
                ]
            ),
        }
    )]
    fn test_assignments_to_expression(
        #[case] fields: Vec<(String, Value)>,
        #[case] expected: common::ExpressionInput,
    ) {
        let assignments = UpdateAssignments::from_fields("itemId", fields).unwrap();
        let actual: common::ExpressionInput = assignments.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case::nothing(vec![])]
    #[case::key_only(vec![("itemId".to_string(), json!("x"))])]
    fn test_assignments_reject_empty(#[case] fields: Vec<(String, Value)>) {
        let actual = UpdateAssignments::from_fields("itemId", fields);
        assert_eq!(actual, Err(EmptyUpdate));
    }

    #[test]
    fn test_update_item() {
        let update_item = UpdateItem {
            key: common::key::Key {
                name: "userId".to_string(),
                value: json!("u1"),
            },
            assignments: UpdateAssignments::from_fields(
                "userId",
                [("email".to_string(), json!("ada@example.com"))],
            )
            .unwrap(),
            write_args: write::common::WriteArgs {
                table_name: "users".to_string(),
            },
        };
        let expected = UpdateItemInput {
            key: collections::HashMap::from([(
                "userId".to_string(),
                types::AttributeValue::S("u1".to_string()),
            )]),
            update_expression: "SET #set0 = :set0".to_string(),
            write_operation: write::common::WriteInput {
                expression_attribute_names: Some(collections::HashMap::from([(
                    "#set0".to_string(),
                    "email".to_string(),
                )])),
                expression_attribute_values: Some(collections::HashMap::from([(
                    ":set0".to_string(),
                    types::AttributeValue::S("ada@example.com".to_string()),
                )])),
                table_name: "users".to_string(),
            },
        };
        let actual: UpdateItemInput = update_item.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
