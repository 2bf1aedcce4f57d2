//! `aws_lambda_provisioned_concurrency_config` builder

use crate::naming::joined_name;
use crate::reference::native_address;
use tf_exporter_common::{
    Body, ExportError, ReferenceKind, ResourceBlock, ResourceKind, Result, Value,
};
use tf_exporter_parser::lambda::ProvisionedConcurrencyConfig;
use tf_exporter_parser::parse_reference_of;

/// Build a provisioned concurrency block named `<function>-<qualifier>-concurrency`.
///
/// The qualifier is the trailing segment of the config's function ARN. The
/// block depends on the function resource, which must exist first.
pub fn build_concurrency_config(config: &ProvisionedConcurrencyConfig) -> Result<ResourceBlock> {
    let reference = parse_reference_of(&config.function_arn, ReferenceKind::Function)?;
    if !reference.is_qualified() {
        return Err(ExportError::malformed(
            &config.function_arn,
            "provisioned concurrency needs an alias or version qualifier",
        ));
    }

    let executions = config
        .requested_provisioned_concurrent_executions
        .ok_or_else(|| {
            ExportError::missing(
                format!("concurrency config {}", config.function_arn),
                "RequestedProvisionedConcurrentExecutions",
            )
        })?;

    let body = Body::new()
        .attr("function_name", reference.name.as_str())
        .attr("provisioned_concurrent_executions", executions)
        .attr("qualifier", reference.qualifier.as_str())
        .attr(
            "depends_on",
            Value::List(vec![Value::reference(&native_address(&reference))]),
        );

    Ok(ResourceBlock::resource(
        ResourceKind::ConcurrencyConfig.terraform_type(),
        &joined_name(&[reference.name.as_str(), reference.qualifier.as_str(), "concurrency"]),
        body,
    ))
}
