//! HCL emitter
//!
//! Converts resource blocks into an [`hcl::Body`] and formats it with
//! [`hcl::format`]. The conversion keeps the input order: attributes, map
//! entries, nested blocks and top-level blocks come out exactly as they were
//! built. Literal escaping, including `${` and `%{` markers in provider
//! values, is left to the formatter.

use hcl::expr::{Expression, FuncCall, TemplateExpr, Traversal, Variable};
use hcl::{Attribute, Block, ObjectKey};
use tf_exporter_common::{Body, Document, ExportError, ResourceBlock, Result, Value};

/// Convert blocks into an HCL body, in order
pub fn to_hcl(blocks: &[ResourceBlock]) -> Result<hcl::Body> {
    let mut body = hcl::Body::builder();
    for block in blocks {
        body = body.add_block(to_block(
            block.block_type.keyword(),
            &[&block.kind, &block.logical_name],
            &block.body,
        )?);
    }
    Ok(body.build())
}

/// Render a sequence of blocks, separated by blank lines
pub fn emit_blocks(blocks: &[ResourceBlock]) -> Result<String> {
    let body = to_hcl(blocks)?;
    hcl::format::to_string(&body).map_err(format_error)
}

/// Render a whole document
pub fn emit_document(document: &Document) -> Result<String> {
    emit_blocks(&document.blocks)
}

fn to_block(identifier: &str, labels: &[&str], body: &Body) -> Result<Block> {
    let mut builder = Block::builder(identifier);
    for label in labels {
        builder = builder.add_label(*label);
    }
    for attribute in &body.attributes {
        builder = builder.add_attribute(Attribute::new(
            attribute.name.as_str(),
            to_expression(&attribute.value)?,
        ));
    }
    for nested in &body.blocks {
        builder = builder.add_block(to_block(&nested.name, &[], &nested.body)?);
    }
    Ok(builder.build())
}

fn to_expression(value: &Value) -> Result<Expression> {
    let expression = match value {
        Value::String(s) => Expression::String(s.clone()),
        Value::Number(n) => Expression::Number((*n).into()),
        Value::Float(f) => hcl::Number::from_f64(*f)
            .map(Expression::Number)
            .ok_or_else(|| ExportError::Format(format!("{} is not a finite number", f)))?,
        Value::Bool(b) => Expression::Bool(*b),
        Value::List(items) => {
            Expression::Array(items.iter().map(to_expression).collect::<Result<_>>()?)
        }
        Value::Map(entries) => Expression::Object(
            entries
                .iter()
                .map(|(key, item)| {
                    let key = ObjectKey::Expression(Expression::String(key.clone()));
                    Ok((key, to_expression(item)?))
                })
                .collect::<Result<_>>()?,
        ),
        Value::Reference(path) => traversal(path)?,
        Value::Call { name, args } => {
            let mut call = FuncCall::builder(name.as_str());
            for arg in args {
                call = call.arg(to_expression(arg)?);
            }
            Expression::FuncCall(Box::new(call.build()))
        }
        Value::Interpolated { reference, suffix } => interpolation(reference, suffix),
    };
    Ok(expression)
}

fn traversal(path: &[String]) -> Result<Expression> {
    let (root, attributes) = path
        .split_first()
        .ok_or_else(|| ExportError::Format("empty reference".to_string()))?;

    let root = Variable::new(root.as_str()).map_err(format_error)?;
    if attributes.is_empty() {
        return Ok(Expression::Variable(root));
    }

    let mut builder = Traversal::builder(root);
    for attribute in attributes {
        builder = builder.attr(attribute.as_str());
    }
    Ok(Expression::Traversal(Box::new(builder.build())))
}

/// `"${<reference>}<suffix>"`
fn interpolation(reference: &[String], suffix: &str) -> Expression {
    let template = format!("${{{}}}{}", reference.join("."), suffix);
    Expression::TemplateExpr(Box::new(TemplateExpr::QuotedString(template)))
}

fn format_error(error: hcl::Error) -> ExportError {
    ExportError::Format(error.to_string())
}
