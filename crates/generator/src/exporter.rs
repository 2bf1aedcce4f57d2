//! Export orchestrator
//!
//! Runs one pass per resource kind: list the provider records, feed each
//! through its builder, and collect the blocks into that kind's document.
//!
//! Failure scopes:
//! - a record-scoped error (see [`ExportError::is_record_scoped`]) skips the
//!   record and is reported in [`ExportReport::skipped`]
//! - any other error aborts the pass; its document is not written
//! - a failed write aborts the whole run

use crate::builders::{
    build_alias, build_concurrency_config, build_event_source_mapping, build_function, build_layer,
    build_table, StreamCatalog,
};
use crate::emitter::emit_document;
use crate::reference::ReferenceResolver;
use std::fs;
use std::path::{Path, PathBuf};
use tf_exporter_common::{Document, ExportConfig, ExportError, ResourceBlock, ResourceKind, Result};
use tf_exporter_parser::ProviderClient;
use tracing::{debug, error, info, warn};

/// Side document holding `data` lookups for event source mappings
pub const LOOKUPS_DOCUMENT_PATH: &str = "lambda/lambda_event_source_mapping_lookups.tf";

/// A record that was skipped, with the reason
#[derive(Debug)]
pub struct SkippedRecord {
    pub kind: ResourceKind,
    pub record: String,
    pub error: ExportError,
}

/// A pass that was aborted
#[derive(Debug)]
pub struct FailedPass {
    pub kind: ResourceKind,
    pub error: ExportError,
}

/// A document written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub kind: ResourceKind,
    pub path: PathBuf,
    pub blocks: usize,
}

/// Outcome of one export run
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<WrittenDocument>,
    /// Stale lookup documents deleted because no lookups were produced
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<SkippedRecord>,
    pub failed: Vec<FailedPass>,
}

impl ExportReport {
    /// True when no pass was aborted
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Documents produced by one successful pass
#[derive(Debug)]
pub struct PassOutput {
    pub kind: ResourceKind,
    pub document: Document,
    /// Only produced by the event source mapping pass in lookup style
    pub lookups: Option<Document>,
    pub skipped: Vec<SkippedRecord>,
}

/// Block accumulator for a single pass
struct Pass {
    kind: ResourceKind,
    document: Document,
    skipped: Vec<SkippedRecord>,
}

impl Pass {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            document: Document::new(kind.document_path()),
            skipped: Vec::new(),
        }
    }

    /// Add a built block. Record-scoped failures are recorded and swallowed;
    /// anything else is returned and ends the pass.
    fn admit(&mut self, record: &str, built: Result<ResourceBlock>) -> Result<bool> {
        match built.and_then(|block| self.document.push(block)) {
            Ok(()) => Ok(true),
            Err(error) if error.is_record_scoped() => {
                warn!(kind = %self.kind, record, %error, "skipping record");
                self.skipped.push(SkippedRecord {
                    kind: self.kind,
                    record: record.to_string(),
                    error,
                });
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    fn finish(self, lookups: Option<Document>) -> PassOutput {
        info!(
            kind = %self.kind,
            blocks = self.document.len(),
            skipped = self.skipped.len(),
            "pass complete"
        );
        PassOutput {
            kind: self.kind,
            document: self.document,
            lookups,
            skipped: self.skipped,
        }
    }
}

/// Drives the export passes against a provider
pub struct Exporter<C: ProviderClient> {
    client: C,
    config: ExportConfig,
}

impl<C: ProviderClient> Exporter<C> {
    pub fn new(client: C, config: ExportConfig) -> Self {
        Self { client, config }
    }

    /// Run the passes for `kinds` and write their documents.
    ///
    /// Kinds run in [`ResourceKind::ALL`] order regardless of the order
    /// given, so event source mappings can be checked against the tables
    /// exported in the same run.
    pub fn export(&self, kinds: &[ResourceKind]) -> Result<ExportReport> {
        let mut report = ExportReport::default();
        let output_dir = self.config.output_dir.as_path();

        self.create_artifact_dirs(kinds)?;

        for result in self.render(kinds) {
            let output = match result {
                Ok(output) => output,
                Err(failed) => {
                    report.failed.push(failed);
                    continue;
                }
            };

            let path = write_document(output_dir, &output.document)?;
            report.written.push(WrittenDocument {
                kind: output.kind,
                path,
                blocks: output.document.len(),
            });

            if output.kind == ResourceKind::EventSourceMapping {
                match &output.lookups {
                    Some(lookups) => {
                        let path = write_document(output_dir, lookups)?;
                        report.written.push(WrittenDocument {
                            kind: output.kind,
                            path,
                            blocks: lookups.len(),
                        });
                    }
                    None => {
                        if let Some(path) = remove_stale(&output_dir.join(LOOKUPS_DOCUMENT_PATH))? {
                            report.removed.push(path);
                        }
                    }
                }
            }

            report.skipped.extend(output.skipped);
        }

        Ok(report)
    }

    /// Run the passes for `kinds` without touching the filesystem
    pub fn render(
        &self,
        kinds: &[ResourceKind],
    ) -> Vec<std::result::Result<PassOutput, FailedPass>> {
        let mut results = Vec::new();
        let mut streams: Option<StreamCatalog> = None;

        for kind in ResourceKind::ALL.into_iter().filter(|k| kinds.contains(k)) {
            info!(%kind, "exporting");

            let result = match kind {
                ResourceKind::Table => {
                    // A failed table pass exports no tables, so no stream either
                    let (result, catalog) = match self.table_pass() {
                        Ok((output, catalog)) => (Ok(output), catalog),
                        Err(error) => (Err(error), StreamCatalog::new()),
                    };
                    streams = Some(catalog);
                    result
                }
                ResourceKind::EventSourceMapping => {
                    self.event_source_mapping_pass(streams.as_ref())
                }
                other => self.render_kind(other),
            };

            results.push(result.map_err(|error| {
                error!(%kind, %error, "pass failed");
                FailedPass { kind, error }
            }));
        }

        results
    }

    /// Run a single pass in memory.
    ///
    /// Event source mappings rendered this way are not checked against
    /// table streams.
    pub fn render_kind(&self, kind: ResourceKind) -> Result<PassOutput> {
        match kind {
            ResourceKind::Table => self.table_pass().map(|(output, _)| output),
            ResourceKind::EventSourceMapping => self.event_source_mapping_pass(None),
            ResourceKind::Layer => self.layer_pass(),
            ResourceKind::Function => self.function_pass(),
            ResourceKind::ConcurrencyConfig => self.concurrency_pass(),
            ResourceKind::Alias => self.alias_pass(),
        }
    }

    fn table_pass(&self) -> Result<(PassOutput, StreamCatalog)> {
        let mut pass = Pass::new(ResourceKind::Table);
        let mut streams = StreamCatalog::new();

        for name in self.client.list_table_names()? {
            let table = self.client.describe_table(&name)?;
            let backups = self.client.describe_continuous_backups(&name)?;

            if pass.admit(&name, build_table(&table, &backups))? {
                streams.insert(&table);
            }
        }

        debug!(streaming = streams.len(), "tables with streams");
        Ok((pass.finish(None), streams))
    }

    fn event_source_mapping_pass(&self, streams: Option<&StreamCatalog>) -> Result<PassOutput> {
        let mut pass = Pass::new(ResourceKind::EventSourceMapping);
        let mut resolver = ReferenceResolver::new(self.config.reference_style);

        for mapping in self.client.list_event_source_mappings()? {
            let record = mapping
                .uuid
                .clone()
                .or_else(|| mapping.event_source_arn.clone())
                .unwrap_or_default();

            match build_event_source_mapping(&mapping, &mut resolver, streams).transpose() {
                Some(built) => {
                    pass.admit(&record, built)?;
                }
                None => debug!(record = %record, "not a table stream, skipped"),
            }
        }

        let lookups = resolver.into_lookups().into_document(LOOKUPS_DOCUMENT_PATH);
        Ok(pass.finish(lookups))
    }

    fn layer_pass(&self) -> Result<PassOutput> {
        let mut pass = Pass::new(ResourceKind::Layer);

        for layer in self.client.list_layers()? {
            pass.admit(&layer.layer_name, build_layer(&layer, &self.config))?;
        }

        Ok(pass.finish(None))
    }

    fn function_pass(&self) -> Result<PassOutput> {
        let mut pass = Pass::new(ResourceKind::Function);

        for function in self.client.list_functions()? {
            let name = function.function_name;
            let output = self.client.get_function(&name)?;
            pass.admit(&name, build_function(&output, &self.config))?;
        }

        Ok(pass.finish(None))
    }

    fn concurrency_pass(&self) -> Result<PassOutput> {
        let mut pass = Pass::new(ResourceKind::ConcurrencyConfig);

        for function in self.client.list_functions()? {
            for config in self
                .client
                .list_provisioned_concurrency_configs(&function.function_name)?
            {
                pass.admit(&config.function_arn, build_concurrency_config(&config))?;
            }
        }

        Ok(pass.finish(None))
    }

    fn alias_pass(&self) -> Result<PassOutput> {
        let mut pass = Pass::new(ResourceKind::Alias);

        for function in self.client.list_functions()? {
            let name = &function.function_name;
            for alias in self.client.list_aliases(name)? {
                let record = format!("{}:{}", name, alias.name);
                pass.admit(&record, build_alias(name, &alias))?;
            }
        }

        Ok(pass.finish(None))
    }

    fn create_artifact_dirs(&self, kinds: &[ResourceKind]) -> Result<()> {
        let dirs = [
            (ResourceKind::Layer, &self.config.layers_artifact_dir),
            (ResourceKind::Function, &self.config.functions_artifact_dir),
        ];

        for (kind, dir) in dirs {
            if kinds.contains(&kind) {
                fs::create_dir_all(dir).map_err(|source| ExportError::OutputWrite {
                    path: dir.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }
}

/// Write a document under `output_dir`, replacing any previous content
fn write_document(output_dir: &Path, document: &Document) -> Result<PathBuf> {
    let path = output_dir.join(&document.path);
    let write_error = |source| ExportError::OutputWrite {
        path: path.clone(),
        source,
    };

    let content = emit_document(document)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(&path, content).map_err(write_error)?;

    debug!(path = %path.display(), blocks = document.len(), "wrote document");
    Ok(path)
}

fn remove_stale(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::remove_file(path).map_err(|source| ExportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "removed stale lookup document");
    Ok(Some(path.to_path_buf()))
}
