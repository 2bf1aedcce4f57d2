//! DynamoDB table records
//!
//! Typed `DescribeTable` shapes plus the two normalizers that turn them into
//! the shared model: key schemas into [`KeyPair`](tf_exporter_common::KeyPair)
//! and secondary indexes into [`IndexDefinition`](tf_exporter_common::IndexDefinition).

mod index;
mod key_schema;
mod types;

pub use index::{normalize_global_indexes, normalize_local_indexes};
pub use key_schema::resolve_key_schema;
pub use types::*;
