//! Workflow definition loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::workflow::Workflow;

/// Format of a workflow definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(DefinitionFormat::Yaml),
            Some("json") => Ok(DefinitionFormat::Json),
            _ => Err(ModelError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reader for workflow definitions.
pub struct WorkflowReader;

impl WorkflowReader {
    /// Read a definition file, choosing the format from its extension.
    pub fn read_file(path: impl AsRef<Path>) -> ModelResult<Workflow> {
        let path = path.as_ref();
        let format = DefinitionFormat::from_path(path)?;
        debug!("Reading {:?} workflow definition from {:?}", format, path);

        let content = fs::read_to_string(path)?;
        Self::parse(&content, format).map_err(|e| match e {
            ModelError::Yaml(err) => ModelError::InvalidDefinition {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
            ModelError::Json(err) => ModelError::InvalidDefinition {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
            other => other,
        })
    }

    /// Parse a definition held in memory.
    pub fn parse(content: &str, format: DefinitionFormat) -> ModelResult<Workflow> {
        let workflow: Workflow = match format {
            DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
            DefinitionFormat::Json => serde_json::from_str(content)?,
        };
        Ok(workflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DefinitionFormat::from_path(Path::new("ci.yml")).unwrap(),
            DefinitionFormat::Yaml
        );
        assert_eq!(
            DefinitionFormat::from_path(Path::new("ci.json")).unwrap(),
            DefinitionFormat::Json
        );
        assert!(matches!(
            DefinitionFormat::from_path(Path::new("ci.toml")),
            Err(ModelError::UnsupportedFormat(p)) if p == PathBuf::from("ci.toml")
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_job_field() {
        let err = WorkflowReader::parse(
            "jobs:\n  build:\n    runs-on: ubuntu-latest\n    step: []\n",
            DefinitionFormat::Yaml,
        )
        .unwrap_err();
        assert!(err.to_string().contains("step"));
    }
}
