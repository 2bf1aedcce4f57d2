//! Provider record parsing for tf-exporter
//!
//! This crate turns provider API responses into typed records and
//! normalizes the parts that need it before resource blocks are built.
//!
//! ## Normalization
//!
//! - Key schemas → [`KeyPair`](tf_exporter_common::KeyPair) via
//!   [`dynamodb::resolve_key_schema`]
//! - Secondary indexes → [`IndexDefinition`](tf_exporter_common::IndexDefinition)
//!   via [`dynamodb::normalize_local_indexes`] / [`dynamodb::normalize_global_indexes`]
//! - ARNs → [`ResourceReference`](tf_exporter_common::ResourceReference)
//!   via [`parse_reference`]
//!
//! ## Provider boundary
//!
//! Records are read through the [`ProviderClient`] trait.
//! [`SnapshotClient`] implements it over captured JSON responses.

pub mod arn;
mod client;
pub mod dynamodb;
pub mod lambda;
mod pagination;
mod snapshot;

pub use arn::{parse_reference, parse_reference_of, Arn};
pub use client::ProviderClient;
pub use pagination::{collect_pages, Page};
pub use snapshot::SnapshotClient;
