//! Common types and utilities for tf-exporter
//!
//! This crate contains the error taxonomy, the normalized resource model
//! shared by the parser and generator, and the configuration surface.

pub mod block;
pub mod config;

pub use block::{Attribute, Body, BlockType, Document, NestedBlock, ResourceBlock, Value};
pub use config::ExportConfig;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting resources
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Malformed reference '{arn}': {reason}")]
    MalformedReference { arn: String, reason: String },

    #[error("{resource} is missing required field {field}")]
    MissingRequiredField { resource: String, field: String },

    #[error("Provider call {operation} failed: {message}")]
    Provider { operation: String, message: String },

    #[error("Duplicate logical name {kind}.{name}")]
    DuplicateLogicalName { kind: String, name: String },

    #[error("Event source mapping {mapping} references table {table}, which is not exported with a stream enabled")]
    StreamNotEnabled { mapping: String, table: String },

    #[error("HCL formatting failed: {0}")]
    Format(String),

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ExportError {
    /// Shorthand for a missing required field on a named resource
    pub fn missing(resource: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            resource: resource.into(),
            field: field.into(),
        }
    }

    /// Shorthand for a malformed ARN
    pub fn malformed(arn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            arn: arn.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a failed provider call
    pub fn provider(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether the error only invalidates the record being processed.
    ///
    /// Record-scoped errors are skipped and reported; everything else aborts
    /// the pass (or the run, for output failures).
    pub fn is_record_scoped(&self) -> bool {
        matches!(
            self,
            Self::MalformedReference { .. }
                | Self::MissingRequiredField { .. }
                | Self::DuplicateLogicalName { .. }
                | Self::StreamNotEnabled { .. }
        )
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Resource kinds exported, one output document each
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Table,
    EventSourceMapping,
    Layer,
    Function,
    ConcurrencyConfig,
    Alias,
}

impl ResourceKind {
    /// All kinds, in export order
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Table,
        ResourceKind::EventSourceMapping,
        ResourceKind::Layer,
        ResourceKind::Function,
        ResourceKind::ConcurrencyConfig,
        ResourceKind::Alias,
    ];

    /// Terraform resource type emitted for this kind
    pub fn terraform_type(&self) -> &'static str {
        match self {
            ResourceKind::Table => "aws_dynamodb_table",
            ResourceKind::EventSourceMapping => "aws_lambda_event_source_mapping",
            ResourceKind::Layer => "aws_lambda_layer_version",
            ResourceKind::Function => "aws_lambda_function",
            ResourceKind::ConcurrencyConfig => "aws_lambda_provisioned_concurrency_config",
            ResourceKind::Alias => "aws_lambda_alias",
        }
    }

    /// Output document path, relative to the output directory
    pub fn document_path(&self) -> &'static str {
        match self {
            ResourceKind::Table => "dynamodb/dynamodb_tables.tf",
            ResourceKind::EventSourceMapping => "lambda/lambda_event_source_mappings.tf",
            ResourceKind::Layer => "lambda/lambda_layers.tf",
            ResourceKind::Function => "lambda/lambda_functions.tf",
            ResourceKind::ConcurrencyConfig => "lambda/lambda_concurrency.tf",
            ResourceKind::Alias => "lambda/lambda_aliases.tf",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Table => "table",
            ResourceKind::EventSourceMapping => "event_source_mapping",
            ResourceKind::Layer => "layer",
            ResourceKind::Function => "function",
            ResourceKind::ConcurrencyConfig => "concurrency_config",
            ResourceKind::Alias => "alias",
        };
        f.write_str(name)
    }
}

/// How a cross-resource pointer is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceStyle {
    /// Reference another generated resource in the same configuration
    #[default]
    Native,
    /// Reference an external `data` lookup declaration
    Lookup,
}

/// Kind of resource an ARN points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Function,
    Table,
    Layer,
}

impl ReferenceKind {
    /// Path token that marks this kind inside an ARN resource part
    pub fn marker(&self) -> &'static str {
        match self {
            ReferenceKind::Function => "function",
            ReferenceKind::Table => "table",
            ReferenceKind::Layer => "layer",
        }
    }

    /// Parse a marker token
    pub fn from_marker(token: &str) -> Option<Self> {
        match token {
            "function" => Some(ReferenceKind::Function),
            "table" => Some(ReferenceKind::Table),
            "layer" => Some(ReferenceKind::Layer),
            _ => None,
        }
    }
}

/// A typed pointer parsed from a provider ARN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    pub kind: ReferenceKind,
    pub name: String,
    /// Version or alias suffix; empty when unqualified
    pub qualifier: String,
}

impl ResourceReference {
    pub fn is_qualified(&self) -> bool {
        !self.qualifier.is_empty()
    }
}

/// Partition and sort key names of a table or index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub hash_key: String,
    /// Empty when the schema has no RANGE entry
    pub range_key: String,
}

/// Read/write capacity pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Throughput {
    pub read_capacity: i64,
    pub write_capacity: i64,
}

/// Whether an index is local or global to its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexScope {
    Local,
    Global,
}

/// A secondary index in uniform shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub scope: IndexScope,
    pub name: String,
    /// Absent for local indexes, which inherit the table's hash key
    pub hash_key: Option<String>,
    pub range_key: String,
    pub projection_type: String,
    pub non_key_attributes: Vec<String>,
    /// Only carried by global indexes
    pub throughput: Option<Throughput>,
}
