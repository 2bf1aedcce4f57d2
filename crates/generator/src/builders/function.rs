//! `aws_lambda_function` builder

use super::{artifact_filename, artifact_hash};
use crate::naming::logical_name;
use crate::reference::render_native;
use tf_exporter_common::{
    Body, ExportConfig, ExportError, NestedBlock, ReferenceKind, ResourceBlock, ResourceKind,
    Result, Value,
};
use tf_exporter_parser::lambda::{FunctionConfiguration, GetFunctionOutput};
use tf_exporter_parser::parse_reference_of;

/// Tracing mode assumed when the function reports none
pub const DEFAULT_TRACING_MODE: &str = "PassThrough";

const IMAGE_PACKAGE: &str = "Image";

/// Build a function block.
///
/// Zip-packaged functions point at `<functions_artifact_dir>/<function>.zip`;
/// image-packaged functions carry their image URI instead. Attached layers
/// always reference the generated layer resources.
pub fn build_function(output: &GetFunctionOutput, config: &ExportConfig) -> Result<ResourceBlock> {
    let function = &output.configuration;
    let owner = format!("function {}", function.function_name);

    let role = function
        .role
        .as_deref()
        .ok_or_else(|| ExportError::missing(owner.as_str(), "Role"))?;

    let mut body = Body::new();

    let image = function.package_type.as_deref() == Some(IMAGE_PACKAGE);
    let artifact = config.function_artifact(&function.function_name);
    if image {
        let image_uri = output
            .code
            .as_ref()
            .and_then(|code| code.image_uri.as_deref())
            .ok_or_else(|| ExportError::missing(owner.as_str(), "Code.ImageUri"))?;
        body = body
            .attr("package_type", IMAGE_PACKAGE)
            .attr("image_uri", image_uri);
    } else {
        body = body.attr("filename", artifact_filename(&artifact));
    }

    body = body
        .attr("function_name", function.function_name.as_str())
        .attr("role", role)
        .attr_opt("handler", function.handler.as_deref())
        .attr(
            "description",
            function.description.as_deref().unwrap_or_default(),
        )
        .attr("publish", true)
        .attr_opt("timeout", function.timeout)
        .attr_opt("memory_size", function.memory_size)
        .attr_opt("runtime", function.runtime.as_deref());

    if !function.layers.is_empty() {
        body = body.attr("layers", layer_references(function)?);
    }

    if !image {
        body = body.attr("source_code_hash", artifact_hash(&artifact));
    }

    if !output.tags.is_empty() {
        body = body.attr(
            "tags",
            Value::Map(
                output
                    .tags
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::string(v.as_str())))
                    .collect(),
            ),
        );
    }

    body = body.block(tracing_block(function));
    if let Some(vpc) = vpc_block(function) {
        body = body.block(vpc);
    }
    if let Some(environment) = environment_block(function) {
        body = body.block(environment);
    }

    Ok(ResourceBlock::resource(
        ResourceKind::Function.terraform_type(),
        &logical_name(&function.function_name),
        body,
    ))
}

fn layer_references(function: &FunctionConfiguration) -> Result<Value> {
    let layers = function
        .layers
        .iter()
        .map(|layer| {
            parse_reference_of(&layer.arn, ReferenceKind::Layer).map(|r| render_native(&r))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::List(layers))
}

fn tracing_block(function: &FunctionConfiguration) -> NestedBlock {
    let mode = function
        .tracing_config
        .as_ref()
        .and_then(|tracing| tracing.mode.as_deref())
        .unwrap_or(DEFAULT_TRACING_MODE);
    NestedBlock::new("tracing_config", Body::new().attr("mode", mode))
}

/// Only emitted when the function is attached to a VPC
fn vpc_block(function: &FunctionConfiguration) -> Option<NestedBlock> {
    let vpc = function.vpc_config.as_ref()?;
    if vpc.subnet_ids.is_empty() && vpc.security_group_ids.is_empty() {
        return None;
    }
    Some(NestedBlock::new(
        "vpc_config",
        Body::new()
            .attr("subnet_ids", Value::string_list(vpc.subnet_ids.iter().cloned()))
            .attr(
                "security_group_ids",
                Value::string_list(vpc.security_group_ids.iter().cloned()),
            ),
    ))
}

fn environment_block(function: &FunctionConfiguration) -> Option<NestedBlock> {
    let variables = &function.environment.as_ref()?.variables;
    if variables.is_empty() {
        return None;
    }
    let map = variables
        .iter()
        .map(|(k, v)| (k.clone(), Value::string(v.as_str())))
        .collect();
    Some(NestedBlock::new(
        "environment",
        Body::new().attr("variables", Value::Map(map)),
    ))
}
