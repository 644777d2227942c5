#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SingleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) table_name: String,
}

/// Arguments for single-record read operations (GetItem).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SingleReadArgs {
    /// Whether to use a consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<SingleReadArgs> for SingleReadInput {
    fn from(single_read_args: SingleReadArgs) -> Self {
        Self {
            consistent_read: single_read_args.consistent_read,
            table_name: single_read_args.table_name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) limit: Option<i32>,
    pub(crate) table_name: String,
}

/// Arguments for multiple-record read operations (Scan).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct MultipleReadArgs {
    /// Whether to use a consistent read.
    pub consistent_read: Option<bool>,
    /// The maximum number of records DynamoDB evaluates per page.
    ///
    /// This only bounds the size of each page; every page is still read.
    pub limit: Option<i32>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<MultipleReadArgs> for MultipleReadInput {
    fn from(multiple_read_args: MultipleReadArgs) -> Self {
        Self {
            consistent_read: multiple_read_args.consistent_read,
            limit: multiple_read_args.limit.filter(|limit| *limit > 0),
            table_name: multiple_read_args.table_name,
        }
    }
}

/// drain a paginator into a single output
#[macro_export]
macro_rules! get_paginated_output {
    ($paginator:expr, $output_type:ty) => {{
        let mut outputs = Vec::new();
        while let Some(page) = $paginator.next().await {
            outputs.push(page?);
        }
        let (items, count, scanned) = outputs.into_iter().fold(
            (Vec::new(), 0, 0),
            |(mut items, count, scanned), output| {
                if let Some(other_items) = output.items {
                    items.extend(other_items);
                }
                (items, count + output.count, scanned + output.scanned_count)
            },
        );
        let output = <$output_type>::builder()
            .set_items(Some(items))
            .set_count(Some(count))
            .set_scanned_count(Some(scanned))
            .build();
        Ok(output)
    }};
}
