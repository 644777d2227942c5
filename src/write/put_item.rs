use crate::write;

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result, to_item};
use std::collections;

/// put item operation
#[derive(Debug, PartialEq)]
struct PutItemInput {
    item: collections::HashMap<String, types::AttributeValue>,
    write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// Replaces any existing record with the same primary key.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_rest::write;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem {
///     item: json!({"userId": "u1", "name": "Ada"}),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///     },
/// };
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct PutItem<T> {
    /// The record to put into the table.
    pub item: T,
    /// Additional write operation arguments (table name, return values).
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<PutItem<T>> for PutItemInput {
    type Error = Error;

    fn try_from(put_item: PutItem<T>) -> Result<Self> {
        let item = to_item(put_item.item)?;
        let operation = Self {
            item,
            write_operation: put_item.write_args.into(),
        };
        Ok(operation)
    }
}

impl<T: Serialize> PutItem<T> {
    /// Execute the put item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.put_item().set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
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
    #[case::item(
        PutItem {
            item: json!(
                {
                    "itemId": "i1",
                    "name": "Widget",
                    "price": 9.99
                }
            ),
            write_args: write::common::WriteArgs {
                table_name: "items".to_string(),
            },
        },
        PutItemInput {
            item: collections::HashMap::from(
                [
                    (
                        "itemId".to_string(),
                        types::AttributeValue::S(
                            "i1".to_string()
                        ),
                    ),
                    (
                        "name".to_string(),
                        types::AttributeValue::S(
                            "Widget".to_string()
                        ),
                    ),
                    (
                        "price".to_string(),
                        types::AttributeValue::N(
                            "9.99".to_string()
                        ),
                    ),
                ]
            ),
            write_operation: write::common::WriteInput {
                table_name: "items".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_put_item(#[case] args: PutItem<Value>, #[case] expected: PutItemInput) {
        let actual: PutItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_put_item_rejects_non_object() {
        let put_item = PutItem {
            item: json!("not a record"),
            write_args: write::common::WriteArgs {
                table_name: "items".to_string(),
            },
        };
        let actual: Result<PutItemInput> = put_item.try_into();
        assert!(actual.is_err());
    }
}
