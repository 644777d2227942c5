//! Common utilities for DynamoDB requests.
//!
//! This module provides the shared pieces used by read and write operations:
//! key maps and the expression accumulator that tracks attribute name and
//! value placeholders.

/// Key types for identifying records in DynamoDB tables.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// Build the name and value placeholders for the attribute at `index`.
///
/// Placeholders are derived from the position rather than from the attribute
/// name, so reserved words and names containing punctuation never leak into
/// the expression text.
pub(crate) fn placeholders(prefix: &str, index: usize) -> (String, String) {
    (format!("#{prefix}{index}"), format!(":{prefix}{index}"))
}

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn merge_into(
        self,
        names: &mut Option<collections::HashMap<String, String>>,
        values: &mut Option<collections::HashMap<String, types::AttributeValue>>,
    ) -> String {
        match names {
            Some(existing) => existing.extend(self.expression_attribute_names),
            None => *names = Some(self.expression_attribute_names),
        }
        match values {
            Some(existing) => existing.extend(self.expression_attribute_values),
            None => *values = Some(self.expression_attribute_values),
        }
        self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::first("set", 0, ("#set0", ":set0"))]
    #[case::tenth("set", 10, ("#set10", ":set10"))]
    fn test_placeholders(
        #[case] prefix: &str,
        #[case] index: usize,
        #[case] expected: (&str, &str),
    ) {
        let (name, value) = placeholders(prefix, index);
        assert_eq!((name.as_str(), value.as_str()), expected);
    }

    #[test]
    fn test_merge_joins_non_empty_expressions() {
        let items = vec![
            ExpressionInput {
                expression: "#set0 = :set0".to_string(),
                expression_attribute_names: collections::HashMap::from([(
                    "#set0".to_string(),
                    "a".to_string(),
                )]),
                ..Default::default()
            },
            ExpressionInput::default(),
            ExpressionInput {
                expression: "#set1 = :set1".to_string(),
                expression_attribute_names: collections::HashMap::from([(
                    "#set1".to_string(),
                    "b".to_string(),
                )]),
                ..Default::default()
            },
        ];
        let actual = ExpressionInput::merge(", ", items);
        assert_eq!(actual.expression, "#set0 = :set0, #set1 = :set1");
        assert_eq!(actual.expression_attribute_names.len(), 2);
    }

    #[test]
    fn test_merge_into_extends_existing_maps() {
        let mut names = Some(collections::HashMap::from([(
            "#a".to_string(),
            "a".to_string(),
        )]));
        let mut values = None;
        let operation = ExpressionInput {
            expression: "SET #set0 = :set0".to_string(),
            expression_attribute_names: collections::HashMap::from([(
                "#set0".to_string(),
                "b".to_string(),
            )]),
            expression_attribute_values: collections::HashMap::from([(
                ":set0".to_string(),
                types::AttributeValue::N("1".to_string()),
            )]),
        };
        let expression = operation.merge_into(&mut names, &mut values);
        assert_eq!(expression, "SET #set0 = :set0");
        assert_eq!(names.map(|names| names.len()), Some(2));
        assert_eq!(values.map(|values| values.len()), Some(1));
    }
}
