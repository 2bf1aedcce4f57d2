//! ARN parsing
//!
//! Provider records point at each other with ARNs:
//!
//! - `arn:aws:lambda:eu-central-1:123456789012:function:billing:PROD`
//! - `arn:aws:lambda:eu-central-1:123456789012:layer:deps:4`
//! - `arn:aws:dynamodb:eu-central-1:123456789012:table/Orders/stream/2024-01-01T00:00:00.000`
//!
//! [`parse_reference`] turns these into a typed [`ResourceReference`].

use tf_exporter_common::{ExportError, ReferenceKind, ResourceReference, Result};

/// The six colon-separated ARN fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account: &'a str,
    /// Everything after the account field, colons and slashes included
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Split an ARN into its fields
    pub fn parse(arn: &'a str) -> Result<Self> {
        let mut parts = arn.splitn(6, ':');
        let prefix = parts.next().unwrap_or_default();
        if prefix != "arn" {
            return Err(ExportError::malformed(arn, "does not start with 'arn:'"));
        }

        let fields: Vec<&str> = parts.collect();
        if fields.len() != 5 {
            return Err(ExportError::malformed(arn, "expected six ':'-separated fields"));
        }
        if fields[1].is_empty() {
            return Err(ExportError::malformed(arn, "empty service field"));
        }

        Ok(Self {
            partition: fields[0],
            service: fields[1],
            region: fields[2],
            account: fields[3],
            resource: fields[4],
        })
    }

    /// Resource part split into path segments.
    ///
    /// Slash-delimited resources (`table/Orders/stream/<ts>`) are split on
    /// `/` only, since their suffixes may contain colons.
    pub fn segments(&self) -> Vec<&'a str> {
        if self.resource.contains('/') {
            self.resource.split('/').collect()
        } else {
            self.resource.split(':').collect()
        }
    }

    /// Whether the resource part uses `/` as separator
    fn is_path_style(&self) -> bool {
        self.resource.contains('/')
    }
}

/// Parse an ARN into a typed reference.
///
/// The kind is the first `function`, `layer` or `table` segment and the name
/// is the segment after it. For colon-style ARNs the qualifier is the final
/// segment, unless that segment is the name itself.
pub fn parse_reference(arn: &str) -> Result<ResourceReference> {
    let parsed = Arn::parse(arn)?;
    let segments = parsed.segments();

    let (position, kind) = segments
        .iter()
        .enumerate()
        .find_map(|(i, segment)| ReferenceKind::from_marker(segment).map(|kind| (i, kind)))
        .ok_or_else(|| ExportError::malformed(arn, "no function, layer or table segment"))?;

    let name = segments
        .get(position + 1)
        .copied()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ExportError::malformed(arn, format!("no resource name after '{}'", kind.marker()))
        })?;

    let qualifier = if parsed.is_path_style() {
        ""
    } else {
        segments
            .last()
            .copied()
            .filter(|last| segments.len() > position + 2 && *last != name)
            .unwrap_or_default()
    };
    if !qualifier.chars().all(is_qualifier_char) {
        return Err(ExportError::malformed(arn, format!("invalid qualifier '{}'", qualifier)));
    }

    Ok(ResourceReference {
        kind,
        name: name.to_string(),
        qualifier: qualifier.to_string(),
    })
}

/// Versions, aliases and `$LATEST`
fn is_qualifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '$' | '_' | '-')
}

/// Parse an ARN and require it to point at a resource of `expected` kind
pub fn parse_reference_of(arn: &str, expected: ReferenceKind) -> Result<ResourceReference> {
    let reference = parse_reference(arn)?;
    if reference.kind != expected {
        return Err(ExportError::malformed(
            arn,
            format!("expected a {} reference", expected.marker()),
        ));
    }
    Ok(reference)
}
