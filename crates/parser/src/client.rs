//! Provider API boundary
//!
//! Export passes read provider records only through [`ProviderClient`].
//! Implementations own transport, authentication and pagination; list
//! methods return every item of the page chain.

use crate::dynamodb::{ContinuousBackupsDescription, TableDescription};
use crate::lambda::{
    AliasConfiguration, EventSourceMappingConfiguration, FunctionConfiguration, GetFunctionOutput,
    LayersListItem, ProvisionedConcurrencyConfig,
};
use tf_exporter_common::Result;

/// Read-only list/describe calls used by the exporter
pub trait ProviderClient {
    /// `ListTables`, all pages
    fn list_table_names(&self) -> Result<Vec<String>>;

    /// `DescribeTable`
    fn describe_table(&self, table_name: &str) -> Result<TableDescription>;

    /// `DescribeContinuousBackups`
    fn describe_continuous_backups(&self, table_name: &str)
        -> Result<ContinuousBackupsDescription>;

    /// `ListFunctions`, all pages
    fn list_functions(&self) -> Result<Vec<FunctionConfiguration>>;

    /// `GetFunction`
    fn get_function(&self, function_name: &str) -> Result<GetFunctionOutput>;

    /// `ListLayers`, all pages
    fn list_layers(&self) -> Result<Vec<LayersListItem>>;

    /// `ListAliases` for one function, all pages
    fn list_aliases(&self, function_name: &str) -> Result<Vec<AliasConfiguration>>;

    /// `ListProvisionedConcurrencyConfigs` for one function, all pages
    fn list_provisioned_concurrency_configs(
        &self,
        function_name: &str,
    ) -> Result<Vec<ProvisionedConcurrencyConfig>>;

    /// `ListEventSourceMappings`, all pages
    fn list_event_source_mappings(&self) -> Result<Vec<EventSourceMappingConfiguration>>;
}
