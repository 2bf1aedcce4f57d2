//! DynamoDB API response types
//!
//! These types mirror the JSON returned by `ListTables`, `DescribeTable`
//! and `DescribeContinuousBackups`. Optional fields stay `Option` so the
//! builders decide the defaults explicitly.

use crate::pagination::Page;
use serde::{Deserialize, Serialize};

/// One page of `ListTables`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesPage {
    #[serde(default)]
    pub table_names: Vec<String>,

    #[serde(default)]
    pub last_evaluated_table_name: Option<String>,
}

impl From<ListTablesPage> for Page<String> {
    fn from(page: ListTablesPage) -> Self {
        Page::new(page.table_names, page.last_evaluated_table_name)
    }
}

/// `DescribeTable` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableOutput {
    pub table: TableDescription,
}

/// Table description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
    pub table_name: String,

    #[serde(default)]
    pub table_arn: Option<String>,

    #[serde(default)]
    pub key_schema: Vec<KeySchemaElement>,

    #[serde(default)]
    pub attribute_definitions: Vec<AttributeDefinition>,

    /// Absent for tables created before on-demand billing existed
    #[serde(default)]
    pub billing_mode_summary: Option<BillingModeSummary>,

    #[serde(default)]
    pub provisioned_throughput: Option<ProvisionedThroughputDescription>,

    #[serde(default)]
    pub local_secondary_indexes: Vec<LocalSecondaryIndexDescription>,

    #[serde(default)]
    pub global_secondary_indexes: Vec<GlobalSecondaryIndexDescription>,

    #[serde(default)]
    pub stream_specification: Option<StreamSpecification>,

    #[serde(default)]
    pub latest_stream_arn: Option<String>,
}

impl TableDescription {
    /// Whether the table emits a change stream
    pub fn stream_enabled(&self) -> bool {
        self.stream_specification
            .as_ref()
            .is_some_and(|s| s.stream_enabled.unwrap_or(true))
    }
}

/// Role of a key attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingModeSummary {
    #[serde(default)]
    pub billing_mode: Option<String>,
}

/// Provisioned throughput as reported by the provider.
///
/// `NumberOfDecreasesToday` is account metering state; it is parsed so the
/// record round-trips but never leaves the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughputDescription {
    #[serde(default)]
    pub read_capacity_units: Option<i64>,

    #[serde(default)]
    pub write_capacity_units: Option<i64>,

    #[serde(default)]
    pub number_of_decreases_today: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Projection {
    #[serde(default)]
    pub projection_type: Option<String>,

    #[serde(default)]
    pub non_key_attributes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalSecondaryIndexDescription {
    pub index_name: String,

    #[serde(default)]
    pub key_schema: Vec<KeySchemaElement>,

    #[serde(default)]
    pub projection: Option<Projection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSecondaryIndexDescription {
    pub index_name: String,

    #[serde(default)]
    pub key_schema: Vec<KeySchemaElement>,

    #[serde(default)]
    pub projection: Option<Projection>,

    #[serde(default)]
    pub provisioned_throughput: Option<ProvisionedThroughputDescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSpecification {
    #[serde(default)]
    pub stream_enabled: Option<bool>,

    #[serde(default)]
    pub stream_view_type: Option<String>,
}

/// `DescribeContinuousBackups` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeContinuousBackupsOutput {
    pub continuous_backups_description: ContinuousBackupsDescription,
}

const PITR_DISABLED: &str = "DISABLED";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContinuousBackupsDescription {
    #[serde(default)]
    pub continuous_backups_status: Option<String>,

    #[serde(default)]
    pub point_in_time_recovery_description: Option<PointInTimeRecoveryDescription>,
}

impl ContinuousBackupsDescription {
    /// Backups with point-in-time recovery explicitly disabled
    pub fn recovery_disabled() -> Self {
        Self {
            continuous_backups_status: None,
            point_in_time_recovery_description: Some(PointInTimeRecoveryDescription {
                point_in_time_recovery_status: Some(PITR_DISABLED.to_string()),
            }),
        }
    }

    /// Only `DISABLED` maps to false; any other status, or none, maps to true
    pub fn point_in_time_recovery_enabled(&self) -> bool {
        self.point_in_time_recovery_description
            .as_ref()
            .and_then(|d| d.point_in_time_recovery_status.as_deref())
            != Some(PITR_DISABLED)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointInTimeRecoveryDescription {
    #[serde(default)]
    pub point_in_time_recovery_status: Option<String>,
}
