//! Integration tests for reading captured provider responses

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tf_exporter_common::{ExportError, KeyPair, ReferenceKind};
use tf_exporter_parser::dynamodb::{normalize_global_indexes, resolve_key_schema};
use tf_exporter_parser::{parse_reference, ProviderClient, SnapshotClient};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn snapshot() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("eu-central-1");

    write(
        &root,
        "dynamodb/list-tables.json",
        r#"[
            {"TableNames": ["Orders"], "LastEvaluatedTableName": "Orders"},
            {"TableNames": ["Sessions"]}
        ]"#,
    );
    write(
        &root,
        "dynamodb/describe-table/Orders.json",
        r#"{"Table": {
            "TableName": "Orders",
            "KeySchema": [
                {"AttributeName": "pk", "KeyType": "HASH"},
                {"AttributeName": "sk", "KeyType": "RANGE"}
            ],
            "AttributeDefinitions": [{"AttributeName": "pk", "AttributeType": "S"}],
            "GlobalSecondaryIndexes": [{
                "IndexName": "by-status",
                "KeySchema": [{"AttributeName": "status", "KeyType": "HASH"}],
                "Projection": {"ProjectionType": "KEYS_ONLY"},
                "ProvisionedThroughput": {"ReadCapacityUnits": 1, "WriteCapacityUnits": 1, "NumberOfDecreasesToday": 0}
            }],
            "StreamSpecification": {"StreamEnabled": true, "StreamViewType": "KEYS_ONLY"}
        }}"#,
    );
    write(
        &root,
        "lambda/list-functions.json",
        r#"{"Functions": [{"FunctionName": "billing"}, {"FunctionName": "mailer"}], "NextMarker": ""}"#,
    );
    write(
        &root,
        "lambda/list-aliases/billing.json",
        r#"{"Aliases": [{"Name": "PROD", "FunctionVersion": "4"}]}"#,
    );
    write(
        &root,
        "lambda/list-event-source-mappings.json",
        r#"{"EventSourceMappings": [{
            "UUID": "1f2e",
            "EventSourceArn": "arn:aws:dynamodb:eu-central-1:123456789012:table/Orders/stream/2024-01-01T00:00:00.000",
            "FunctionArn": "arn:aws:lambda:eu-central-1:123456789012:function:billing",
            "State": "Enabled"
        }]}"#,
    );

    dir
}

fn client(dir: &TempDir) -> SnapshotClient {
    SnapshotClient::new(dir.path()).with_region(Some("eu-central-1".to_string()))
}

#[test]
fn test_table_names_across_pages() {
    let dir = snapshot();
    assert_eq!(
        client(&dir).list_table_names().unwrap(),
        vec!["Orders".to_string(), "Sessions".to_string()]
    );
}

#[test]
fn test_describe_and_normalize_table() {
    let dir = snapshot();
    let table = client(&dir).describe_table("Orders").unwrap();

    assert!(table.stream_enabled());
    assert_eq!(
        resolve_key_schema(&table.key_schema),
        KeyPair {
            hash_key: "pk".to_string(),
            range_key: "sk".to_string(),
        }
    );

    let indexes = normalize_global_indexes(&table.table_name, &table.global_secondary_indexes)
        .unwrap();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].hash_key.as_deref(), Some("status"));
    assert_eq!(indexes[0].projection_type, "KEYS_ONLY");
}

#[test]
fn test_optional_per_function_files() {
    let dir = snapshot();
    let client = client(&dir);

    let functions = client.list_functions().unwrap();
    assert_eq!(functions.len(), 2);

    assert_eq!(client.list_aliases("billing").unwrap().len(), 1);
    assert!(client.list_aliases("mailer").unwrap().is_empty());
    assert!(client
        .list_provisioned_concurrency_configs("billing")
        .unwrap()
        .is_empty());
}

#[test]
fn test_mapping_arns_parse() {
    let dir = snapshot();
    let mappings = client(&dir).list_event_source_mappings().unwrap();
    assert_eq!(mappings.len(), 1);

    let source = parse_reference(mappings[0].event_source_arn.as_deref().unwrap()).unwrap();
    assert_eq!(source.kind, ReferenceKind::Table);
    assert_eq!(source.name, "Orders");
    assert!(!source.is_qualified());
}

#[test]
fn test_missing_required_snapshot_is_provider_failure() {
    let dir = snapshot();
    let err = client(&dir).list_layers().unwrap_err();
    assert!(
        matches!(err, ExportError::Provider { ref operation, .. } if operation == "ListLayers")
    );
    assert!(!err.is_record_scoped());
}

#[test]
fn test_wrong_region_finds_nothing() {
    let dir = snapshot();
    let client = SnapshotClient::new(dir.path()).with_region(Some("us-east-1".to_string()));
    assert!(client.list_table_names().is_err());
}
