//! Resource builders
//!
//! One builder per resource kind. Each is a pure function from a provider
//! record (plus configuration or a reference resolver) to a [`ResourceBlock`].
//! Required fields that are absent surface as
//! [`ExportError::MissingRequiredField`](tf_exporter_common::ExportError);
//! optional fields fall back to documented defaults or are omitted.
//!
//! [`ResourceBlock`]: tf_exporter_common::ResourceBlock

mod alias;
mod concurrency;
mod event_source_mapping;
mod function;
mod layer;
mod table;

pub use alias::build_alias;
pub use concurrency::build_concurrency_config;
pub use event_source_mapping::{build_event_source_mapping, StreamCatalog};
pub use function::build_function;
pub use layer::build_layer;
pub use table::{build_table, DEFAULT_BILLING_MODE};

use std::path::Path;
use tf_exporter_common::Value;

/// `filebase64sha256("<artifact>")`
pub(crate) fn artifact_hash(artifact: &Path) -> Value {
    Value::call("filebase64sha256", vec![artifact_filename(artifact)])
}

/// Artifact path as a string literal
pub(crate) fn artifact_filename(artifact: &Path) -> Value {
    Value::string(artifact.display().to_string())
}
