//! Lambda API response types
//!
//! These types mirror the JSON returned by the Lambda list/get calls used
//! during export.

use crate::pagination::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One page of `ListFunctions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListFunctionsPage {
    #[serde(default)]
    pub functions: Vec<FunctionConfiguration>,

    #[serde(default)]
    pub next_marker: Option<String>,
}

impl From<ListFunctionsPage> for Page<FunctionConfiguration> {
    fn from(page: ListFunctionsPage) -> Self {
        Page::new(page.functions, page.next_marker)
    }
}

/// `GetFunction` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetFunctionOutput {
    pub configuration: FunctionConfiguration,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub code: Option<FunctionCodeLocation>,
}

/// Where the deployed code lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionCodeLocation {
    #[serde(default)]
    pub repository_type: Option<String>,

    #[serde(default)]
    pub image_uri: Option<String>,
}

/// Function configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionConfiguration {
    pub function_name: String,

    #[serde(default)]
    pub function_arn: Option<String>,

    #[serde(default)]
    pub runtime: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub handler: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub timeout: Option<i64>,

    #[serde(default)]
    pub memory_size: Option<i64>,

    #[serde(default)]
    pub tracing_config: Option<TracingConfig>,

    #[serde(default)]
    pub vpc_config: Option<VpcConfig>,

    #[serde(default)]
    pub environment: Option<EnvironmentResponse>,

    #[serde(default)]
    pub layers: Vec<LayerReference>,

    #[serde(default)]
    pub package_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TracingConfig {
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfig {
    #[serde(default)]
    pub subnet_ids: Vec<String>,

    #[serde(default)]
    pub security_group_ids: Vec<String>,

    #[serde(default)]
    pub vpc_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnvironmentResponse {
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

/// A layer attached to a function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayerReference {
    pub arn: String,

    #[serde(default)]
    pub code_size: Option<i64>,
}

/// One page of `ListLayers`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListLayersPage {
    #[serde(default)]
    pub layers: Vec<LayersListItem>,

    #[serde(default)]
    pub next_marker: Option<String>,
}

impl From<ListLayersPage> for Page<LayersListItem> {
    fn from(page: ListLayersPage) -> Self {
        Page::new(page.layers, page.next_marker)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayersListItem {
    pub layer_name: String,

    #[serde(default)]
    pub layer_arn: Option<String>,

    #[serde(default)]
    pub latest_matching_version: Option<LayerVersionsListItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayerVersionsListItem {
    #[serde(default)]
    pub layer_version_arn: Option<String>,

    #[serde(default)]
    pub version: Option<i64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub compatible_runtimes: Vec<String>,

    #[serde(default)]
    pub compatible_architectures: Vec<String>,

    #[serde(default)]
    pub license_info: Option<String>,
}

/// One page of `ListAliases`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListAliasesPage {
    #[serde(default)]
    pub aliases: Vec<AliasConfiguration>,

    #[serde(default)]
    pub next_marker: Option<String>,
}

impl From<ListAliasesPage> for Page<AliasConfiguration> {
    fn from(page: ListAliasesPage) -> Self {
        Page::new(page.aliases, page.next_marker)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasConfiguration {
    pub name: String,

    #[serde(default)]
    pub alias_arn: Option<String>,

    #[serde(default)]
    pub function_version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub routing_config: Option<AliasRoutingConfiguration>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasRoutingConfiguration {
    /// Version to traffic weight in `[0.0, 1.0]`
    #[serde(default)]
    pub additional_version_weights: BTreeMap<String, f64>,
}

/// One page of `ListProvisionedConcurrencyConfigs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListProvisionedConcurrencyConfigsPage {
    #[serde(default)]
    pub provisioned_concurrency_configs: Vec<ProvisionedConcurrencyConfig>,

    #[serde(default)]
    pub next_marker: Option<String>,
}

impl From<ListProvisionedConcurrencyConfigsPage> for Page<ProvisionedConcurrencyConfig> {
    fn from(page: ListProvisionedConcurrencyConfigsPage) -> Self {
        Page::new(page.provisioned_concurrency_configs, page.next_marker)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedConcurrencyConfig {
    /// Qualified function ARN; the trailing segment is the alias or version
    pub function_arn: String,

    #[serde(default)]
    pub requested_provisioned_concurrent_executions: Option<i64>,

    #[serde(default)]
    pub allocated_provisioned_concurrent_executions: Option<i64>,

    #[serde(default)]
    pub status: Option<String>,
}

/// One page of `ListEventSourceMappings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListEventSourceMappingsPage {
    #[serde(default)]
    pub event_source_mappings: Vec<EventSourceMappingConfiguration>,

    #[serde(default)]
    pub next_marker: Option<String>,
}

impl From<ListEventSourceMappingsPage> for Page<EventSourceMappingConfiguration> {
    fn from(page: ListEventSourceMappingsPage) -> Self {
        Page::new(page.event_source_mappings, page.next_marker)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventSourceMappingConfiguration {
    #[serde(rename = "UUID", default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub event_source_arn: Option<String>,

    #[serde(default)]
    pub function_arn: Option<String>,

    #[serde(default)]
    pub batch_size: Option<i64>,

    #[serde(default)]
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_get_function() {
        let json = r#"{
            "Configuration": {
                "FunctionName": "billing",
                "FunctionArn": "arn:aws:lambda:eu-central-1:123456789012:function:billing",
                "Runtime": "python3.12",
                "Role": "arn:aws:iam::123456789012:role/billing",
                "Handler": "app.handler",
                "Timeout": 30,
                "MemorySize": 256,
                "Layers": [{"Arn": "arn:aws:lambda:eu-central-1:123456789012:layer:deps:4", "CodeSize": 1024}],
                "Environment": {"Variables": {"STAGE": "prod"}}
            },
            "Tags": {"team": "payments"},
            "Code": {"RepositoryType": "S3"}
        }"#;

        let output: GetFunctionOutput = serde_json::from_str(json).unwrap();
        let config = output.configuration;
        assert_eq!(config.function_name, "billing");
        assert_eq!(config.timeout, Some(30));
        assert_eq!(config.layers.len(), 1);
        assert!(config.tracing_config.is_none());
        assert_eq!(
            config.environment.unwrap().variables.get("STAGE").map(String::as_str),
            Some("prod")
        );
        assert_eq!(output.tags.get("team").map(String::as_str), Some("payments"));
        assert_eq!(output.code.unwrap().repository_type.as_deref(), Some("S3"));
    }

    #[test]
    fn test_deserialize_event_source_mapping_uuid() {
        let json = r#"{
            "UUID": "a1b2",
            "EventSourceArn": "arn:aws:dynamodb:eu-central-1:123456789012:table/Orders/stream/2024-01-01T00:00:00.000",
            "FunctionArn": "arn:aws:lambda:eu-central-1:123456789012:function:billing",
            "BatchSize": 100,
            "State": "Enabled"
        }"#;

        let mapping: EventSourceMappingConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.uuid.as_deref(), Some("a1b2"));
        assert_eq!(mapping.batch_size, Some(100));
    }
}
