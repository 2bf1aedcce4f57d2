//! Key-schema resolution

use super::types::{KeySchemaElement, KeyType};
use tf_exporter_common::KeyPair;

/// Extract partition and sort key names from a key schema.
///
/// A missing role yields an empty string. Duplicated roles are not
/// rejected: the last entry for a role wins.
pub fn resolve_key_schema(key_schema: &[KeySchemaElement]) -> KeyPair {
    let mut keys = KeyPair::default();

    for element in key_schema {
        match element.key_type {
            KeyType::Hash => keys.hash_key = element.attribute_name.clone(),
            KeyType::Range => keys.range_key = element.attribute_name.clone(),
        }
    }

    keys
}
