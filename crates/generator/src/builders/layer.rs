//! `aws_lambda_layer_version` builder

use super::{artifact_filename, artifact_hash};
use crate::naming::logical_name;
use tf_exporter_common::{
    Body, ExportConfig, ExportError, ResourceBlock, ResourceKind, Result, Value,
};
use tf_exporter_parser::lambda::LayersListItem;

/// Build a layer version block from the layer's latest version.
///
/// The content hash is computed by Terraform from the packaged artifact at
/// `<layers_artifact_dir>/<layer>.zip`, not taken from the provider record.
pub fn build_layer(layer: &LayersListItem, config: &ExportConfig) -> Result<ResourceBlock> {
    let version = layer.latest_matching_version.as_ref().ok_or_else(|| {
        ExportError::missing(format!("layer {}", layer.layer_name), "LatestMatchingVersion")
    })?;
    let artifact = config.layer_artifact(&layer.layer_name);

    let mut body = Body::new()
        .attr("filename", artifact_filename(&artifact))
        .attr("layer_name", layer.layer_name.as_str())
        .attr(
            "compatible_runtimes",
            Value::string_list(version.compatible_runtimes.iter().cloned()),
        );

    if !version.compatible_architectures.is_empty() {
        body = body.attr(
            "compatible_architectures",
            Value::string_list(version.compatible_architectures.iter().cloned()),
        );
    }

    let body = body
        .attr(
            "description",
            version.description.as_deref().unwrap_or_default(),
        )
        .attr_opt("license_info", version.license_info.as_deref())
        .attr("source_code_hash", artifact_hash(&artifact));

    Ok(ResourceBlock::resource(
        ResourceKind::Layer.terraform_type(),
        &logical_name(&layer.layer_name),
        body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_exporter_parser::lambda::LayerVersionsListItem;

    fn layer(version: Option<LayerVersionsListItem>) -> LayersListItem {
        LayersListItem {
            layer_name: "shared-deps".to_string(),
            layer_arn: Some(
                "arn:aws:lambda:eu-central-1:123456789012:layer:shared-deps".to_string(),
            ),
            latest_matching_version: version,
        }
    }

    #[test]
    fn test_layer_block() {
        let version = LayerVersionsListItem {
            version: Some(7),
            compatible_runtimes: vec!["python3.11".to_string(), "python3.12".to_string()],
            ..Default::default()
        };

        let block = build_layer(&layer(Some(version)), &ExportConfig::default()).unwrap();
        assert_eq!(block.kind, "aws_lambda_layer_version");
        assert_eq!(block.logical_name, "shared-deps");
        assert_eq!(
            block.body.get("filename"),
            Some(&Value::string("terraform/files/lambda_layers/shared-deps.zip"))
        );
        assert_eq!(
            block.body.get("compatible_runtimes"),
            Some(&Value::string_list(["python3.11", "python3.12"]))
        );
        assert_eq!(block.body.get("description"), Some(&Value::string("")));
        assert_eq!(block.body.get("compatible_architectures"), None);
        assert_eq!(block.body.get("license_info"), None);
        assert_eq!(
            block.body.get("source_code_hash"),
            Some(&Value::call(
                "filebase64sha256",
                vec![Value::string("terraform/files/lambda_layers/shared-deps.zip")]
            ))
        );
    }

    #[test]
    fn test_optional_layer_metadata() {
        let version = LayerVersionsListItem {
            description: Some("numpy and friends".to_string()),
            compatible_architectures: vec!["arm64".to_string()],
            license_info: Some("MIT".to_string()),
            ..Default::default()
        };

        let block = build_layer(&layer(Some(version)), &ExportConfig::default()).unwrap();
        assert_eq!(
            block.body.get("compatible_architectures"),
            Some(&Value::string_list(["arm64"]))
        );
        assert_eq!(block.body.get("license_info"), Some(&Value::string("MIT")));
    }

    #[test]
    fn test_artifact_dir_is_configurable() {
        let config = ExportConfig {
            layers_artifact_dir: "build/layers".into(),
            ..Default::default()
        };
        let block = build_layer(&layer(Some(Default::default())), &config).unwrap();
        assert_eq!(
            block.body.get("filename"),
            Some(&Value::string("build/layers/shared-deps.zip"))
        );
    }

    #[test]
    fn test_layer_without_version() {
        let err = build_layer(&layer(None), &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, ExportError::MissingRequiredField { .. }));
    }
}
