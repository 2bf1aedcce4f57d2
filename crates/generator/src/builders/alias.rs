//! `aws_lambda_alias` builder

use crate::naming::{joined_name, logical_name};
use tf_exporter_common::{
    Body, ExportError, NestedBlock, ResourceBlock, ResourceKind, Result, Value,
};
use tf_exporter_parser::lambda::AliasConfiguration;

/// Build an alias block named `<function>-<alias>`.
///
/// The alias points at the generated function resource.
pub fn build_alias(function_name: &str, alias: &AliasConfiguration) -> Result<ResourceBlock> {
    let function_version = alias.function_version.as_deref().ok_or_else(|| {
        ExportError::missing(
            format!("alias {} of function {}", alias.name, function_name),
            "FunctionVersion",
        )
    })?;

    let mut body = Body::new()
        .attr("name", alias.name.as_str())
        .attr(
            "description",
            alias.description.as_deref().unwrap_or_default(),
        )
        .attr(
            "function_name",
            Value::reference(&format!(
                "{}.{}.arn",
                ResourceKind::Function.terraform_type(),
                logical_name(function_name)
            )),
        )
        .attr("function_version", function_version);

    let weights = alias
        .routing_config
        .as_ref()
        .map(|routing| &routing.additional_version_weights)
        .filter(|weights| !weights.is_empty());
    if let Some(weights) = weights {
        let map = weights
            .iter()
            .map(|(version, weight)| (version.clone(), Value::Float(*weight)))
            .collect();
        body = body.block(NestedBlock::new(
            "routing_config",
            Body::new().attr("additional_version_weights", Value::Map(map)),
        ));
    }

    Ok(ResourceBlock::resource(
        ResourceKind::Alias.terraform_type(),
        &joined_name(&[function_name, alias.name.as_str()]),
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tf_exporter_parser::lambda::AliasRoutingConfiguration;

    fn alias(name: &str) -> AliasConfiguration {
        AliasConfiguration {
            name: name.to_string(),
            alias_arn: None,
            function_version: Some("3".to_string()),
            description: None,
            routing_config: None,
        }
    }

    #[test]
    fn test_alias_block() {
        let block = build_alias("billing", &alias("PROD")).unwrap();
        assert_eq!(block.kind, "aws_lambda_alias");
        assert_eq!(block.logical_name, "billing-PROD");
        assert_eq!(block.body.get("name"), Some(&Value::string("PROD")));
        assert_eq!(
            block.body.get("function_name"),
            Some(&Value::reference("aws_lambda_function.billing.arn"))
        );
        assert_eq!(block.body.get("function_version"), Some(&Value::string("3")));
        assert!(block.body.blocks.is_empty());
    }

    #[test]
    fn test_aliases_of_one_function_have_distinct_names() {
        let prod = build_alias("billing", &alias("PROD")).unwrap();
        let staging = build_alias("billing", &alias("STAGING")).unwrap();
        assert_ne!(prod.address(), staging.address());
    }

    #[test]
    fn test_weighted_routing() {
        let mut weighted = alias("PROD");
        weighted.routing_config = Some(AliasRoutingConfiguration {
            additional_version_weights: BTreeMap::from([("4".to_string(), 0.25)]),
        });

        let block = build_alias("billing", &weighted).unwrap();
        let routing = block.body.blocks_named("routing_config").next().unwrap();
        assert_eq!(
            routing.body.get("additional_version_weights"),
            Some(&Value::Map(vec![("4".to_string(), Value::Float(0.25))]))
        );
    }

    #[test]
    fn test_missing_version() {
        let mut broken = alias("PROD");
        broken.function_version = None;
        assert!(matches!(
            build_alias("billing", &broken),
            Err(ExportError::MissingRequiredField { .. })
        ));
    }
}
