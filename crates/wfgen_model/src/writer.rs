//! Workflow file writing utilities.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use wfgen_core::RenderOptions;

use crate::error::ModelResult;
use crate::workflow::Workflow;

/// Writer for rendered workflow files.
pub struct WorkflowWriter;

impl WorkflowWriter {
    /// Render and write a workflow, creating parent directories as needed.
    /// Nothing is written if rendering fails.
    pub fn write(path: impl AsRef<Path>, workflow: &Workflow, options: &RenderOptions) -> ModelResult<()> {
        let path = path.as_ref();
        let content = workflow.to_yaml_with(options)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing {} bytes to {:?}", content.len(), path);
        fs::write(path, content)?;
        info!("Wrote workflow to {:?}", path);
        Ok(())
    }

    /// File name for a workflow id, e.g. `Release Build` -> `release-build.yml`.
    pub fn file_name(id: &str) -> String {
        let name = id
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        if name.is_empty() {
            "workflow.yml".to_string()
        } else {
            format!("{}.yml", name)
        }
    }
}
