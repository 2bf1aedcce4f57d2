//! Export configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or no file) is a valid configuration.

use crate::{ExportError, ReferenceStyle, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one export run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the documents are written under
    pub output_dir: PathBuf,
    /// Style of function references inside event source mappings
    pub reference_style: ReferenceStyle,
    /// Folder holding `<layer>.zip` artifacts
    pub layers_artifact_dir: PathBuf,
    /// Folder holding `<function>.zip` artifacts
    pub functions_artifact_dir: PathBuf,
    /// Region whose provider records are read
    pub region: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("terraform"),
            reference_style: ReferenceStyle::Native,
            layers_artifact_dir: PathBuf::from("terraform/files/lambda_layers"),
            functions_artifact_dir: PathBuf::from("terraform/files/lambda_functions"),
            region: None,
        }
    }
}

impl ExportConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExportError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file {}: {}", path.display(), e),
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Artifact path referenced by a layer block
    pub fn layer_artifact(&self, layer_name: &str) -> PathBuf {
        self.layers_artifact_dir.join(format!("{layer_name}.zip"))
    }

    /// Artifact path referenced by a function block
    pub fn function_artifact(&self, function_name: &str) -> PathBuf {
        self.functions_artifact_dir.join(format!("{function_name}.zip"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("terraform"));
        assert_eq!(config.reference_style, ReferenceStyle::Native);
        assert_eq!(
            config.function_artifact("billing"),
            PathBuf::from("terraform/files/lambda_functions/billing.zip")
        );
        assert_eq!(
            config.layer_artifact("deps"),
            PathBuf::from("terraform/files/lambda_layers/deps.zip")
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ExportConfig::from_yaml("reference_style: lookup\nregion: eu-central-1\n")
            .unwrap();
        assert_eq!(config.reference_style, ReferenceStyle::Lookup);
        assert_eq!(config.region.as_deref(), Some("eu-central-1"));
        assert_eq!(config.output_dir, PathBuf::from("terraform"));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ExportConfig::from_yaml("  \n").unwrap(), ExportConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir: out\nfunctions_artifact_dir: dist/fns").unwrap();

        let config = ExportConfig::load(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(
            config.function_artifact("a"),
            PathBuf::from("dist/fns/a.zip")
        );
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let result = ExportConfig::from_yaml("reference_style: remote\n");
        assert!(matches!(result, Err(ExportError::Yaml(_))));
    }
}
