//! Cross-resource reference rendering
//!
//! A parsed [`ResourceReference`] is rendered either as a traversal into
//! another generated resource (`aws_lambda_function.billing.arn`) or as a
//! traversal into a `data` lookup. Lookups are accumulated in
//! [`LookupDeclarations`], one declaration per referenced resource.

use crate::naming::logical_name;
use tf_exporter_common::{
    Body, Document, ReferenceKind, ReferenceStyle, ResourceBlock, ResourceReference, Result, Value,
};
use tf_exporter_parser::parse_reference;
use tracing::debug;

/// Terraform type of the generated resource a reference points at
fn resource_type(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Function => "aws_lambda_function",
        ReferenceKind::Table => "aws_dynamodb_table",
        ReferenceKind::Layer => "aws_lambda_layer_version",
    }
}

/// Attribute that yields the ARN.
///
/// A qualified layer reference pins its own version, so it starts from the
/// unversioned `layer_arn`.
fn arn_attribute(reference: &ResourceReference) -> &'static str {
    match reference.kind {
        ReferenceKind::Layer if reference.is_qualified() => "layer_arn",
        _ => "arn",
    }
}

/// Render `<address>.<attr>`, or `"${<address>.<attr>}:<qualifier>"` when qualified
fn traversal(address: &str, reference: &ResourceReference) -> Value {
    let target = format!("{}.{}", address, arn_attribute(reference));
    if reference.is_qualified() {
        Value::interpolated(&target, format!(":{}", reference.qualifier))
    } else {
        Value::reference(&target)
    }
}

/// Address of the generated resource a reference points at
pub fn native_address(reference: &ResourceReference) -> String {
    format!(
        "{}.{}",
        resource_type(reference.kind),
        logical_name(&reference.name)
    )
}

/// Reference to another generated resource
pub fn render_native(reference: &ResourceReference) -> Value {
    traversal(&native_address(reference), reference)
}

/// Side table of `data` lookup declarations, unique per referenced resource
#[derive(Debug, Default)]
pub struct LookupDeclarations {
    blocks: Vec<ResourceBlock>,
}

impl LookupDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a lookup for `reference` (once per name) and return its address
    pub fn declare(&mut self, reference: &ResourceReference) -> String {
        let block = lookup_block(reference);
        let address = block.address();

        if !self.blocks.iter().any(|b| b.address() == address) {
            debug!(%address, "declaring lookup");
            self.blocks.push(block);
        }

        address
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// The accumulated declarations as a document, if any were made
    pub fn into_document(self, path: &str) -> Option<Document> {
        if self.blocks.is_empty() {
            return None;
        }
        Some(Document {
            path: path.into(),
            blocks: self.blocks,
        })
    }
}

fn lookup_block(reference: &ResourceReference) -> ResourceBlock {
    let name = logical_name(&reference.name);
    let body = match reference.kind {
        ReferenceKind::Function => Body::new().attr("function_name", reference.name.as_str()),
        ReferenceKind::Table => Body::new().attr("name", reference.name.as_str()),
        ReferenceKind::Layer => Body::new().attr("layer_name", reference.name.as_str()),
    };
    ResourceBlock::data(resource_type(reference.kind), &name, body)
}

/// Renders references in one configured style.
///
/// Owns the lookup accumulator for a single export pass.
#[derive(Debug)]
pub struct ReferenceResolver {
    style: ReferenceStyle,
    lookups: LookupDeclarations,
}

impl ReferenceResolver {
    pub fn new(style: ReferenceStyle) -> Self {
        Self {
            style,
            lookups: LookupDeclarations::new(),
        }
    }

    /// Parse an ARN and render it in the configured style
    pub fn resolve(&mut self, arn: &str) -> Result<(ResourceReference, Value)> {
        let reference = parse_reference(arn)?;
        let value = self.render(&reference);
        Ok((reference, value))
    }

    /// Render an already parsed reference in the configured style
    pub fn render(&mut self, reference: &ResourceReference) -> Value {
        match self.style {
            ReferenceStyle::Native => render_native(reference),
            ReferenceStyle::Lookup => {
                let address = self.lookups.declare(reference);
                traversal(&address, reference)
            }
        }
    }

    pub fn lookups(&self) -> &LookupDeclarations {
        &self.lookups
    }

    /// Hand back the accumulated lookups at the end of the pass
    pub fn into_lookups(self) -> LookupDeclarations {
        self.lookups
    }
}
