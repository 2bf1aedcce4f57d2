//! Terraform generation for tf-exporter
//!
//! This crate turns parsed provider records into Terraform configuration:
//!
//! - [`builders`] map one record to one [`ResourceBlock`](tf_exporter_common::ResourceBlock)
//! - [`reference`] renders ARNs as native references or `data` lookups
//! - [`emitter`] serializes blocks into HCL text
//! - [`Exporter`] runs one pass per resource kind and writes the documents

pub mod builders;
pub mod emitter;
mod exporter;
pub mod naming;
pub mod reference;

pub use emitter::{emit_blocks, emit_document};
pub use exporter::{
    ExportReport, Exporter, FailedPass, PassOutput, SkippedRecord, WrittenDocument,
    LOOKUPS_DOCUMENT_PATH,
};
pub use reference::{LookupDeclarations, ReferenceResolver};

use tf_exporter_parser::dynamodb::{ContinuousBackupsDescription, TableDescription};

/// Render a single table description as HCL.
///
/// Point-in-time recovery is reported as disabled, since a bare
/// `DescribeTable` response does not carry it.
pub fn render_table(table: &TableDescription) -> tf_exporter_common::Result<String> {
    let backups = ContinuousBackupsDescription::recovery_disabled();
    let block = builders::build_table(table, &backups)?;
    emit_blocks(&[block])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_exporter_parser::dynamodb::DescribeTableOutput;

    #[test]
    fn test_render_table() {
        let json = r#"{
            "Table": {
                "TableName": "Orders",
                "KeySchema": [{"AttributeName": "pk", "KeyType": "HASH"}],
                "AttributeDefinitions": [{"AttributeName": "pk", "AttributeType": "S"}]
            }
        }"#;
        let output: DescribeTableOutput = serde_json::from_str(json).unwrap();

        let hcl = render_table(&output.table).unwrap();
        assert!(hcl.starts_with("resource \"aws_dynamodb_table\" \"Orders\" {\n"));
        assert!(hcl.contains("  billing_mode = \"PAY_PER_REQUEST\"\n"));
        assert!(hcl.contains("  point_in_time_recovery {\n    enabled = false\n  }\n"));
    }
}
