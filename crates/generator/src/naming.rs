//! Logical names for generated blocks

/// Turn a provider name into a Terraform identifier.
///
/// Identifiers may contain letters, digits, `_` and `-`, and must not start
/// with a digit or `-`. Any other character becomes `_`.
pub fn logical_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    match name.chars().next() {
        None => name.push('_'),
        Some(first) if first.is_ascii_digit() || first == '-' => name.insert(0, '_'),
        Some(_) => {}
    }

    name
}

/// Logical name made of several provider names, joined with `-`
pub fn joined_name(parts: &[&str]) -> String {
    logical_name(&parts.join("-"))
}
