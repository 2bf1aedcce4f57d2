//! Secondary index normalization

use super::key_schema::resolve_key_schema;
use super::types::{
    GlobalSecondaryIndexDescription, LocalSecondaryIndexDescription, Projection,
    ProvisionedThroughputDescription,
};
use tf_exporter_common::{ExportError, IndexDefinition, IndexScope, Result, Throughput};

/// Normalize local secondary indexes, preserving input order.
///
/// Local indexes share the table's hash key, so only the range key is kept.
pub fn normalize_local_indexes(
    table_name: &str,
    indexes: &[LocalSecondaryIndexDescription],
) -> Result<Vec<IndexDefinition>> {
    indexes
        .iter()
        .map(|lsi| {
            let owner = index_owner(table_name, &lsi.index_name);
            let keys = resolve_key_schema(&lsi.key_schema);
            if keys.range_key.is_empty() {
                return Err(ExportError::missing(owner, "KeySchema RANGE"));
            }
            let (projection_type, non_key_attributes) =
                normalize_projection(&owner, lsi.projection.as_ref())?;

            Ok(IndexDefinition {
                scope: IndexScope::Local,
                name: lsi.index_name.clone(),
                hash_key: None,
                range_key: keys.range_key,
                projection_type,
                non_key_attributes,
                throughput: None,
            })
        })
        .collect()
}

/// Normalize global secondary indexes, preserving input order.
///
/// The throughput pair is carried without the decrease counter.
pub fn normalize_global_indexes(
    table_name: &str,
    indexes: &[GlobalSecondaryIndexDescription],
) -> Result<Vec<IndexDefinition>> {
    indexes
        .iter()
        .map(|gsi| {
            let owner = index_owner(table_name, &gsi.index_name);
            let keys = resolve_key_schema(&gsi.key_schema);
            if keys.hash_key.is_empty() {
                return Err(ExportError::missing(owner, "KeySchema HASH"));
            }
            let (projection_type, non_key_attributes) =
                normalize_projection(&owner, gsi.projection.as_ref())?;

            Ok(IndexDefinition {
                scope: IndexScope::Global,
                name: gsi.index_name.clone(),
                hash_key: Some(keys.hash_key),
                range_key: keys.range_key,
                projection_type,
                non_key_attributes,
                throughput: gsi.provisioned_throughput.as_ref().map(throughput_of),
            })
        })
        .collect()
}

fn index_owner(table_name: &str, index_name: &str) -> String {
    format!("index {index_name} of table {table_name}")
}

fn normalize_projection(
    owner: &str,
    projection: Option<&Projection>,
) -> Result<(String, Vec<String>)> {
    let projection = projection.ok_or_else(|| ExportError::missing(owner, "Projection"))?;
    let projection_type = projection
        .projection_type
        .clone()
        .ok_or_else(|| ExportError::missing(owner, "Projection.ProjectionType"))?;

    Ok((
        projection_type,
        projection.non_key_attributes.clone().unwrap_or_default(),
    ))
}

fn throughput_of(description: &ProvisionedThroughputDescription) -> Throughput {
    Throughput {
        read_capacity: description.read_capacity_units.unwrap_or(0),
        write_capacity: description.write_capacity_units.unwrap_or(0),
    }
}
