//! Resource Block model
//!
//! Syntax-independent representation of the declarative output. Every
//! collection here is an ordered `Vec`; emission order is exactly
//! construction order.

use crate::{ExportError, Result};
use serde::Serialize;
use std::path::PathBuf;

/// An attribute value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Quoted string literal
    String(String),
    Number(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    /// Object literal with ordered keys
    Map(Vec<(String, Value)>),
    /// Attribute traversal, e.g. `aws_dynamodb_table.Orders.stream_arn`
    Reference(Vec<String>),
    /// Function call, e.g. `filebase64sha256("deps.zip")`
    Call { name: String, args: Vec<Value> },
    /// Reference interpolated into a string literal: `"${<reference>}<suffix>"`
    Interpolated {
        reference: Vec<String>,
        suffix: String,
    },
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Traversal from a dotted path
    pub fn reference(path: &str) -> Self {
        Value::Reference(path.split('.').map(str::to_string).collect())
    }

    pub fn call(name: &str, args: Vec<Value>) -> Self {
        Value::Call {
            name: name.to_string(),
            args,
        }
    }

    pub fn interpolated(path: &str, suffix: impl Into<String>) -> Self {
        Value::Interpolated {
            reference: path.split('.').map(str::to_string).collect(),
            suffix: suffix.into(),
        }
    }

    /// List of string literals
    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(|s| Value::String(s.into())).collect())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// `name = value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

/// Attributes followed by nested blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Body {
    pub attributes: Vec<Attribute>,
    pub blocks: Vec<NestedBlock>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.push(Attribute {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    /// Append an attribute only when a value is present
    pub fn attr_opt<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Append a nested block
    pub fn block(mut self, block: NestedBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Nested blocks of the given type, in order
    pub fn blocks_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a NestedBlock> {
        self.blocks.iter().filter(move |b| b.name == name)
    }
}

/// Unlabelled nested block, e.g. `attribute { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedBlock {
    pub name: String,
    pub body: Body,
}

impl NestedBlock {
    pub fn new(name: &str, body: Body) -> Self {
        Self {
            name: name.to_string(),
            body,
        }
    }
}

/// Top-level block keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockType {
    Resource,
    Data,
}

impl BlockType {
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockType::Resource => "resource",
            BlockType::Data => "data",
        }
    }
}

/// One named, typed declarative resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceBlock {
    pub block_type: BlockType,
    /// Terraform type, e.g. `aws_dynamodb_table`
    pub kind: String,
    pub logical_name: String,
    pub body: Body,
}

impl ResourceBlock {
    pub fn resource(kind: &str, logical_name: &str, body: Body) -> Self {
        Self {
            block_type: BlockType::Resource,
            kind: kind.to_string(),
            logical_name: logical_name.to_string(),
            body,
        }
    }

    pub fn data(kind: &str, logical_name: &str, body: Body) -> Self {
        Self {
            block_type: BlockType::Data,
            kind: kind.to_string(),
            logical_name: logical_name.to_string(),
            body,
        }
    }

    /// Address used by other blocks, e.g. `aws_lambda_function.fn` or `data.x.y`
    pub fn address(&self) -> String {
        match self.block_type {
            BlockType::Resource => format!("{}.{}", self.kind, self.logical_name),
            BlockType::Data => format!("data.{}.{}", self.kind, self.logical_name),
        }
    }
}

/// An output unit: one file of blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub path: PathBuf,
    pub blocks: Vec<ResourceBlock>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block, refusing a second block with the same address
    pub fn push(&mut self, block: ResourceBlock) -> Result<()> {
        if self.contains(&block.address()) {
            return Err(ExportError::DuplicateLogicalName {
                kind: block.kind,
                name: block.logical_name,
            });
        }
        self.blocks.push(block);
        Ok(())
    }

    pub fn contains(&self, address: &str) -> bool {
        self.blocks.iter().any(|b| b.address() == address)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
