use crate::read;

use aws_sdk_dynamodb::{Client, error, operation};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    multiple_read_operation: read::common::MultipleReadInput,
}

/// Full-table scan.
///
/// Every page is followed until the table is exhausted and the records of
/// all pages are returned in a single output. Cost grows linearly with the
/// size of the table.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_rest::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// let output = scan.send(client).await?;
/// println!("{} users", output.count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Additional read operation arguments (table name, page size, consistent read).
    pub multiple_read_args: read::common::MultipleReadArgs,
}

impl From<Scan> for ScanInput {
    fn from(scan: Scan) -> Self {
        Self {
            multiple_read_operation: scan.multiple_read_args.into(),
        }
    }
}

impl Scan {
    /// Execute the scan, draining every page.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.into();
        let read_operation = scan.multiple_read_operation;
        let mut paginator = client
            .scan()
            .set_consistent_read(read_operation.consistent_read)
            .set_limit(read_operation.limit)
            .table_name(read_operation.table_name)
            .into_paginator()
            .send();
        crate::get_paginated_output!(paginator, operation::scan::ScanOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::empty(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
        },
        ScanInput {
            multiple_read_operation: read::common::MultipleReadInput {
                table_name: "a".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::paged(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: Some(false),
                limit: Some(100),
                table_name: "b".to_string(),
            },
        },
        ScanInput {
            multiple_read_operation: read::common::MultipleReadInput {
                consistent_read: Some(false),
                limit: Some(100),
                table_name: "b".to_string(),
            },
        }
    )]
    fn test_scan(#[case] args: Scan, #[case] expected: ScanInput) {
        let actual: ScanInput = args.into();
        assert_eq!(actual, expected);
    }
}
