//! `aws_dynamodb_table` builder

use crate::naming::logical_name;
use tf_exporter_common::{
    Body, ExportError, IndexDefinition, NestedBlock, ResourceBlock, ResourceKind, Result, Value,
};
use tf_exporter_parser::dynamodb::{
    normalize_global_indexes, normalize_local_indexes, resolve_key_schema,
    ContinuousBackupsDescription, TableDescription,
};

/// Billing mode assumed when the table reports no summary
pub const DEFAULT_BILLING_MODE: &str = "PAY_PER_REQUEST";

const PROVISIONED: &str = "PROVISIONED";

/// Build the table block from its description and backup status
pub fn build_table(
    table: &TableDescription,
    backups: &ContinuousBackupsDescription,
) -> Result<ResourceBlock> {
    let owner = format!("table {}", table.table_name);

    if table.key_schema.is_empty() {
        return Err(ExportError::missing(owner, "KeySchema"));
    }
    let keys = resolve_key_schema(&table.key_schema);
    if keys.hash_key.is_empty() {
        return Err(ExportError::missing(owner, "KeySchema HASH"));
    }

    let billing_mode = table
        .billing_mode_summary
        .as_ref()
        .and_then(|summary| summary.billing_mode.clone())
        .unwrap_or_else(|| DEFAULT_BILLING_MODE.to_string());
    let provisioned = billing_mode == PROVISIONED;

    // Reported (as zero) even for on-demand tables
    let throughput = table.provisioned_throughput.clone().unwrap_or_default();

    let mut body = Body::new()
        .attr("name", table.table_name.as_str())
        .attr("billing_mode", billing_mode.as_str())
        .attr("read_capacity", throughput.read_capacity_units.unwrap_or(0))
        .attr("write_capacity", throughput.write_capacity_units.unwrap_or(0))
        .attr("hash_key", keys.hash_key.as_str())
        .attr_opt("range_key", non_empty(&keys.range_key));

    body = match &table.stream_specification {
        Some(stream) if table.stream_enabled() => body
            .attr("stream_enabled", true)
            .attr_opt("stream_view_type", stream.stream_view_type.as_deref()),
        _ => body.attr("stream_enabled", false),
    };

    for attribute in &table.attribute_definitions {
        body = body.block(NestedBlock::new(
            "attribute",
            Body::new()
                .attr("name", attribute.attribute_name.as_str())
                .attr("type", attribute.attribute_type.as_str()),
        ));
    }

    for index in normalize_local_indexes(&table.table_name, &table.local_secondary_indexes)? {
        body = body.block(local_index_block(&index));
    }

    for index in normalize_global_indexes(&table.table_name, &table.global_secondary_indexes)? {
        body = body.block(global_index_block(&table.table_name, &index, provisioned)?);
    }

    body = body.block(NestedBlock::new(
        "point_in_time_recovery",
        Body::new().attr("enabled", backups.point_in_time_recovery_enabled()),
    ));

    Ok(ResourceBlock::resource(
        ResourceKind::Table.terraform_type(),
        &logical_name(&table.table_name),
        body,
    ))
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn projection_attrs(body: Body, index: &IndexDefinition) -> Body {
    let body = body.attr("projection_type", index.projection_type.as_str());
    if index.non_key_attributes.is_empty() {
        body
    } else {
        body.attr(
            "non_key_attributes",
            Value::string_list(index.non_key_attributes.iter().cloned()),
        )
    }
}

fn local_index_block(index: &IndexDefinition) -> NestedBlock {
    let body = Body::new()
        .attr("name", index.name.as_str())
        .attr("range_key", index.range_key.as_str());
    NestedBlock::new("local_secondary_index", projection_attrs(body, index))
}

fn global_index_block(
    table_name: &str,
    index: &IndexDefinition,
    provisioned: bool,
) -> Result<NestedBlock> {
    let mut body = Body::new()
        .attr("name", index.name.as_str())
        .attr_opt("hash_key", index.hash_key.as_deref())
        .attr_opt("range_key", non_empty(&index.range_key));

    if provisioned {
        let throughput = index.throughput.ok_or_else(|| {
            ExportError::missing(
                format!("index {} of table {}", index.name, table_name),
                "ProvisionedThroughput",
            )
        })?;
        body = body
            .attr("write_capacity", throughput.write_capacity)
            .attr("read_capacity", throughput.read_capacity);
    }

    Ok(NestedBlock::new(
        "global_secondary_index",
        projection_attrs(body, index),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_exporter_parser::dynamodb::{
        AttributeDefinition, BillingModeSummary, GlobalSecondaryIndexDescription, KeySchemaElement,
        KeyType, LocalSecondaryIndexDescription, PointInTimeRecoveryDescription, Projection,
        ProvisionedThroughputDescription, StreamSpecification,
    };

    fn key(name: &str, key_type: KeyType) -> KeySchemaElement {
        KeySchemaElement {
            attribute_name: name.to_string(),
            key_type,
        }
    }

    fn on_demand_table() -> TableDescription {
        TableDescription {
            table_name: "Sessions".to_string(),
            key_schema: vec![key("id", KeyType::Hash)],
            attribute_definitions: vec![AttributeDefinition {
                attribute_name: "id".to_string(),
                attribute_type: "S".to_string(),
            }],
            provisioned_throughput: Some(ProvisionedThroughputDescription {
                read_capacity_units: Some(0),
                write_capacity_units: Some(0),
                number_of_decreases_today: Some(0),
            }),
            ..Default::default()
        }
    }

    fn backups(status: &str) -> ContinuousBackupsDescription {
        ContinuousBackupsDescription {
            continuous_backups_status: Some("ENABLED".to_string()),
            point_in_time_recovery_description: Some(PointInTimeRecoveryDescription {
                point_in_time_recovery_status: Some(status.to_string()),
            }),
        }
    }

    #[test]
    fn test_missing_billing_summary_defaults_to_on_demand() {
        let block = build_table(&on_demand_table(), &backups("DISABLED")).unwrap();
        assert_eq!(block.kind, "aws_dynamodb_table");
        assert_eq!(block.logical_name, "Sessions");
        assert_eq!(
            block.body.get("billing_mode"),
            Some(&Value::string("PAY_PER_REQUEST"))
        );
        assert_eq!(block.body.get("read_capacity"), Some(&Value::Number(0)));
        assert_eq!(block.body.get("range_key"), None);
    }

    #[test]
    fn test_no_stream_specification() {
        let block = build_table(&on_demand_table(), &backups("DISABLED")).unwrap();
        assert_eq!(block.body.get("stream_enabled"), Some(&Value::Bool(false)));
        assert_eq!(block.body.get("stream_view_type"), None);
    }

    #[test]
    fn test_stream_specification_enables_stream() {
        let mut table = on_demand_table();
        table.stream_specification = Some(StreamSpecification {
            stream_enabled: None,
            stream_view_type: Some("NEW_IMAGE".to_string()),
        });

        let block = build_table(&table, &backups("DISABLED")).unwrap();
        assert_eq!(block.body.get("stream_enabled"), Some(&Value::Bool(true)));
        assert_eq!(
            block.body.get("stream_view_type"),
            Some(&Value::string("NEW_IMAGE"))
        );
    }

    #[test]
    fn test_point_in_time_recovery() {
        let enabled = |status: &str| {
            let block = build_table(&on_demand_table(), &backups(status)).unwrap();
            let pitr = block.body.blocks_named("point_in_time_recovery").next().unwrap();
            pitr.body.get("enabled").cloned()
        };
        assert_eq!(enabled("DISABLED"), Some(Value::Bool(false)));
        assert_eq!(enabled("ENABLED"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_point_in_time_recovery_without_status_is_enabled() {
        let backups = ContinuousBackupsDescription {
            continuous_backups_status: Some("ENABLED".to_string()),
            point_in_time_recovery_description: None,
        };
        let block = build_table(&on_demand_table(), &backups).unwrap();
        let pitr = block.body.blocks_named("point_in_time_recovery").next().unwrap();
        assert_eq!(pitr.body.get("enabled"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_missing_key_schema_is_fatal_for_record() {
        let mut table = on_demand_table();
        table.key_schema.clear();
        let err = build_table(&table, &backups("DISABLED")).unwrap_err();
        assert!(matches!(err, ExportError::MissingRequiredField { .. }));
        assert!(err.is_record_scoped());
    }

    #[test]
    fn test_provisioned_global_index() {
        let mut table = on_demand_table();
        table.billing_mode_summary = Some(BillingModeSummary {
            billing_mode: Some("PROVISIONED".to_string()),
        });
        table.global_secondary_indexes = vec![GlobalSecondaryIndexDescription {
            index_name: "by-user".to_string(),
            key_schema: vec![key("user", KeyType::Hash)],
            projection: Some(Projection {
                projection_type: Some("ALL".to_string()),
                non_key_attributes: None,
            }),
            provisioned_throughput: Some(ProvisionedThroughputDescription {
                read_capacity_units: Some(5),
                write_capacity_units: Some(2),
                number_of_decreases_today: Some(1),
            }),
        }];

        let block = build_table(&table, &backups("DISABLED")).unwrap();
        let gsi = block.body.blocks_named("global_secondary_index").next().unwrap();
        assert_eq!(gsi.body.get("hash_key"), Some(&Value::string("user")));
        assert_eq!(gsi.body.get("range_key"), None);
        assert_eq!(gsi.body.get("read_capacity"), Some(&Value::Number(5)));
        assert_eq!(gsi.body.get("write_capacity"), Some(&Value::Number(2)));
        assert_eq!(gsi.body.get("non_key_attributes"), None);
        assert!(gsi
            .body
            .attributes
            .iter()
            .all(|a| !a.name.contains("decrease")));
    }

    #[test]
    fn test_on_demand_global_index_has_no_capacity() {
        let mut table = on_demand_table();
        table.global_secondary_indexes = vec![GlobalSecondaryIndexDescription {
            index_name: "by-user".to_string(),
            key_schema: vec![key("user", KeyType::Hash)],
            projection: Some(Projection {
                projection_type: Some("KEYS_ONLY".to_string()),
                non_key_attributes: None,
            }),
            provisioned_throughput: None,
        }];

        let block = build_table(&table, &backups("DISABLED")).unwrap();
        let gsi = block.body.blocks_named("global_secondary_index").next().unwrap();
        assert_eq!(gsi.body.get("read_capacity"), None);
        assert_eq!(gsi.body.get("write_capacity"), None);
    }

    #[test]
    fn test_provisioned_global_index_without_throughput_is_reported() {
        let mut table = on_demand_table();
        table.billing_mode_summary = Some(BillingModeSummary {
            billing_mode: Some("PROVISIONED".to_string()),
        });
        table.global_secondary_indexes = vec![GlobalSecondaryIndexDescription {
            index_name: "by-user".to_string(),
            key_schema: vec![key("user", KeyType::Hash)],
            projection: Some(Projection {
                projection_type: Some("ALL".to_string()),
                non_key_attributes: None,
            }),
            provisioned_throughput: None,
        }];

        assert!(matches!(
            build_table(&table, &backups("DISABLED")),
            Err(ExportError::MissingRequiredField { .. })
        ));
    }

    fn table_with_local_index(non_key_attributes: Option<Vec<String>>) -> TableDescription {
        let mut table = on_demand_table();
        table.key_schema = vec![key("id", KeyType::Hash), key("created", KeyType::Range)];
        table.local_secondary_indexes = vec![LocalSecondaryIndexDescription {
            index_name: "by-status".to_string(),
            key_schema: vec![key("id", KeyType::Hash), key("status", KeyType::Range)],
            projection: Some(Projection {
                projection_type: Some("INCLUDE".to_string()),
                non_key_attributes,
            }),
        }];
        table.global_secondary_indexes = vec![GlobalSecondaryIndexDescription {
            index_name: "by-user".to_string(),
            key_schema: vec![key("user", KeyType::Hash)],
            projection: Some(Projection {
                projection_type: Some("KEYS_ONLY".to_string()),
                non_key_attributes: None,
            }),
            provisioned_throughput: None,
        }];
        table
    }

    #[test]
    fn test_local_secondary_index_block() {
        let table = table_with_local_index(Some(vec!["total".to_string(), "note".to_string()]));
        let block = build_table(&table, &backups("DISABLED")).unwrap();

        let lsi = block.body.blocks_named("local_secondary_index").next().unwrap();
        let names: Vec<&str> = lsi.body.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["name", "range_key", "projection_type", "non_key_attributes"]);
        assert_eq!(lsi.body.get("name"), Some(&Value::string("by-status")));
        assert_eq!(lsi.body.get("range_key"), Some(&Value::string("status")));
        assert_eq!(lsi.body.get("hash_key"), None);
        assert_eq!(lsi.body.get("projection_type"), Some(&Value::string("INCLUDE")));
        assert_eq!(
            lsi.body.get("non_key_attributes"),
            Some(&Value::string_list(["total", "note"]))
        );

        let hcl = crate::emitter::emit_blocks(&[block]).unwrap();
        assert!(hcl.contains(
            "  local_secondary_index {\n    name = \"by-status\"\n    range_key = \"status\"\n    \
             projection_type = \"INCLUDE\"\n"
        ));
    }

    #[test]
    fn test_local_secondary_index_without_non_key_attributes() {
        let block = build_table(&table_with_local_index(None), &backups("DISABLED")).unwrap();
        let lsi = block.body.blocks_named("local_secondary_index").next().unwrap();
        assert_eq!(lsi.body.get("non_key_attributes"), None);
        assert_eq!(lsi.body.attributes.len(), 3);
    }

    #[test]
    fn test_local_indexes_precede_global_indexes() {
        let block = build_table(&table_with_local_index(None), &backups("DISABLED")).unwrap();
        let names: Vec<&str> = block.body.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "attribute",
                "local_secondary_index",
                "global_secondary_index",
                "point_in_time_recovery",
            ]
        );
    }

    #[test]
    fn test_nested_block_order() {
        let block = build_table(&on_demand_table(), &backups("DISABLED")).unwrap();
        let names: Vec<&str> = block.body.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["attribute", "point_in_time_recovery"]);
    }
}
