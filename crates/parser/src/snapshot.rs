//! Snapshot-backed provider client
//!
//! Reads API responses captured as JSON files, e.g. with
//! `aws dynamodb describe-table --table-name Orders --output json`.
//!
//! ## Layout
//! ```text
//! <root>[/<region>]/
//!   dynamodb/list-tables.json
//!   dynamodb/describe-table/<table>.json
//!   dynamodb/describe-continuous-backups/<table>.json
//!   lambda/list-functions.json
//!   lambda/get-function/<function>.json
//!   lambda/list-layers.json
//!   lambda/list-aliases/<function>.json
//!   lambda/list-provisioned-concurrency-configs/<function>.json
//!   lambda/list-event-source-mappings.json
//! ```
//!
//! List files hold one page object or an array of pages. Per-function alias
//! and concurrency files are optional; a missing file means "none".

use crate::client::ProviderClient;
use crate::dynamodb::{
    ContinuousBackupsDescription, DescribeContinuousBackupsOutput, DescribeTableOutput,
    ListTablesPage, TableDescription,
};
use crate::lambda::{
    AliasConfiguration, EventSourceMappingConfiguration, FunctionConfiguration, GetFunctionOutput,
    LayersListItem, ListAliasesPage, ListEventSourceMappingsPage, ListFunctionsPage, ListLayersPage,
    ListProvisionedConcurrencyConfigsPage, ProvisionedConcurrencyConfig,
};
use crate::pagination::{collect_pages, Page};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tf_exporter_common::{ExportError, Result};
use tracing::debug;

/// Provider client over a directory of captured responses
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    root: PathBuf,
    region: Option<String>,
}

impl SnapshotClient {
    /// Read snapshots directly under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            region: None,
        }
    }

    /// Read snapshots from `<root>/<region>` instead
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    fn base(&self) -> PathBuf {
        match &self.region {
            Some(region) => self.root.join(region),
            None => self.root.clone(),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, operation: &str, relative: &Path) -> Result<T> {
        let path = self.base().join(relative);
        debug!(operation, path = %path.display(), "reading snapshot");

        let content = fs::read_to_string(&path).map_err(|e| {
            ExportError::provider(operation, format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            let message = format!("invalid response in {}: {}", path.display(), e);
            ExportError::provider(operation, message)
        })
    }

    /// Read a list response and walk its page chain
    fn read_pages<P, T>(&self, operation: &str, relative: &Path) -> Result<Vec<T>>
    where
        P: DeserializeOwned + Into<Page<T>>,
    {
        let raw: serde_json::Value = self.read_json(operation, relative)?;
        let pages: Vec<P> = match raw {
            serde_json::Value::Array(_) => serde_json::from_value::<Vec<P>>(raw),
            single => serde_json::from_value::<P>(single).map(|page| vec![page]),
        }
        .map_err(|e| {
            ExportError::provider(
                operation,
                format!("invalid page in {}: {}", relative.display(), e),
            )
        })?;

        collect_pages(operation, pages.into_iter().map(Into::into))
    }

    /// Like [`read_pages`](Self::read_pages), treating a missing file as empty
    fn read_optional_pages<P, T>(&self, operation: &str, relative: &Path) -> Result<Vec<T>>
    where
        P: DeserializeOwned + Into<Page<T>>,
    {
        match fs::metadata(self.base().join(relative)) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            _ => self.read_pages::<P, T>(operation, relative),
        }
    }
}

fn per_resource(dir: &str, name: &str) -> PathBuf {
    Path::new(dir).join(format!("{name}.json"))
}

impl ProviderClient for SnapshotClient {
    fn list_table_names(&self) -> Result<Vec<String>> {
        self.read_pages::<ListTablesPage, _>("ListTables", Path::new("dynamodb/list-tables.json"))
    }

    fn describe_table(&self, table_name: &str) -> Result<TableDescription> {
        let output: DescribeTableOutput = self.read_json(
            "DescribeTable",
            &per_resource("dynamodb/describe-table", table_name),
        )?;
        Ok(output.table)
    }

    fn describe_continuous_backups(
        &self,
        table_name: &str,
    ) -> Result<ContinuousBackupsDescription> {
        let output: DescribeContinuousBackupsOutput = self.read_json(
            "DescribeContinuousBackups",
            &per_resource("dynamodb/describe-continuous-backups", table_name),
        )?;
        Ok(output.continuous_backups_description)
    }

    fn list_functions(&self) -> Result<Vec<FunctionConfiguration>> {
        self.read_pages::<ListFunctionsPage, _>(
            "ListFunctions",
            Path::new("lambda/list-functions.json"),
        )
    }

    fn get_function(&self, function_name: &str) -> Result<GetFunctionOutput> {
        self.read_json(
            "GetFunction",
            &per_resource("lambda/get-function", function_name),
        )
    }

    fn list_layers(&self) -> Result<Vec<LayersListItem>> {
        self.read_pages::<ListLayersPage, _>("ListLayers", Path::new("lambda/list-layers.json"))
    }

    fn list_aliases(&self, function_name: &str) -> Result<Vec<AliasConfiguration>> {
        self.read_optional_pages::<ListAliasesPage, _>(
            "ListAliases",
            &per_resource("lambda/list-aliases", function_name),
        )
    }

    fn list_provisioned_concurrency_configs(
        &self,
        function_name: &str,
    ) -> Result<Vec<ProvisionedConcurrencyConfig>> {
        self.read_optional_pages::<ListProvisionedConcurrencyConfigsPage, _>(
            "ListProvisionedConcurrencyConfigs",
            &per_resource("lambda/list-provisioned-concurrency-configs", function_name),
        )
    }

    fn list_event_source_mappings(&self) -> Result<Vec<EventSourceMappingConfiguration>> {
        self.read_pages::<ListEventSourceMappingsPage, _>(
            "ListEventSourceMappings",
            Path::new("lambda/list-event-source-mappings.json"),
        )
    }
}
