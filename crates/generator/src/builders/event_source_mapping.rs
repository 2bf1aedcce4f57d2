//! `aws_lambda_event_source_mapping` builder

use crate::naming::{joined_name, logical_name};
use crate::reference::ReferenceResolver;
use std::collections::BTreeSet;
use tf_exporter_common::{
    Body, ExportError, ReferenceKind, ResourceBlock, ResourceKind, Result, Value,
};
use tf_exporter_parser::dynamodb::TableDescription;
use tf_exporter_parser::lambda::EventSourceMappingConfiguration;
use tf_exporter_parser::parse_reference_of;

/// Only table streams are exported as event sources
const STREAMING_SERVICE: &str = "dynamodb";

const STARTING_POSITION: &str = "LATEST";

const DISABLED_STATE: &str = "Disabled";

/// Names of the tables exported with a stream enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamCatalog {
    streaming: BTreeSet<String>,
}

impl StreamCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a table; only tables with an enabled stream are kept
    pub fn insert(&mut self, table: &TableDescription) {
        if table.stream_enabled() {
            self.streaming.insert(table.table_name.clone());
        }
    }

    pub fn has_stream(&self, table_name: &str) -> bool {
        self.streaming.contains(table_name)
    }

    pub(crate) fn len(&self) -> usize {
        self.streaming.len()
    }
}

impl<'a> FromIterator<&'a TableDescription> for StreamCatalog {
    fn from_iter<I: IntoIterator<Item = &'a TableDescription>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for table in iter {
            catalog.insert(table);
        }
        catalog
    }
}

/// Build an event source mapping block, or `None` when the source is not a
/// table stream.
///
/// The block is named `<function>-<table>` and points at the generated
/// table's `stream_arn`. The function reference is rendered in the
/// resolver's style. When `streams` is given, a mapping whose table is not
/// in it is rejected with [`ExportError::StreamNotEnabled`].
pub fn build_event_source_mapping(
    mapping: &EventSourceMappingConfiguration,
    resolver: &mut ReferenceResolver,
    streams: Option<&StreamCatalog>,
) -> Result<Option<ResourceBlock>> {
    let source_arn = match mapping.event_source_arn.as_deref() {
        Some(arn) if arn.contains(STREAMING_SERVICE) => arn,
        _ => return Ok(None),
    };
    let label = mapping.uuid.as_deref().unwrap_or(source_arn);

    let table = parse_reference_of(source_arn, ReferenceKind::Table)?;
    if let Some(streams) = streams {
        if !streams.has_stream(&table.name) {
            return Err(ExportError::StreamNotEnabled {
                mapping: label.to_string(),
                table: table.name,
            });
        }
    }

    let function_arn = mapping.function_arn.as_deref().ok_or_else(|| {
        ExportError::missing(format!("event source mapping {}", label), "FunctionArn")
    })?;
    let function = parse_reference_of(function_arn, ReferenceKind::Function)?;
    let function_ref = resolver.render(&function);

    let body = Body::new()
        .attr(
            "event_source_arn",
            Value::reference(&format!(
                "{}.{}.stream_arn",
                ResourceKind::Table.terraform_type(),
                logical_name(&table.name)
            )),
        )
        .attr("function_name", function_ref)
        .attr("starting_position", STARTING_POSITION)
        .attr_opt("batch_size", mapping.batch_size);

    let body = if mapping.state.as_deref() == Some(DISABLED_STATE) {
        body.attr("enabled", false)
    } else {
        body
    };

    Ok(Some(ResourceBlock::resource(
        ResourceKind::EventSourceMapping.terraform_type(),
        &joined_name(&[function.name.as_str(), table.name.as_str()]),
        body,
    )))
}
