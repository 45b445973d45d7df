//! Render command - Render a workflow definition to YAML.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use wfgen_model::WorkflowWriter;

use super::{load_definition, HeaderArgs};
use crate::config::CliConfig;

#[derive(Args)]
pub struct RenderArgs {
    /// Workflow definition (.yml, .yaml or .json)
    definition: PathBuf,

    /// Output file (defaults to stdout, or `output_dir` from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    pub header: HeaderArgs,
}

pub fn execute(args: RenderArgs, config: &CliConfig) -> Result<()> {
    info!("Rendering workflow definition: {}", args.definition.display());

    let workflow = load_definition(&args.definition)?;
    let options = args.header.render_options(config);

    match output_path(&args.definition, args.output.as_deref(), config) {
        Some(path) => {
            WorkflowWriter::write(&path, &workflow, &options)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Wrote {}", path.display());
        }
        None => {
            let yaml = workflow.to_yaml_with(&options)?;
            std::io::stdout()
                .lock()
                .write_all(yaml.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Where to write: the explicit output, else a file in the configured
/// output directory named after the definition, else stdout (`None`).
fn output_path(definition: &Path, output: Option<&Path>, config: &CliConfig) -> Option<PathBuf> {
    if let Some(output) = output {
        return Some(output.to_path_buf());
    }
    let dir = config.output_dir.as_ref()?;
    let stem = definition
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    Some(dir.join(WorkflowWriter::file_name(stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const DEFINITION: &str = "name: CI\non:\n  push:\njobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - run: cargo test\n";

    #[test]
    fn test_output_path_resolution() {
        let config = CliConfig {
            header: None,
            output_dir: Some(PathBuf::from(".github/workflows")),
        };
        let definition = Path::new("defs/Release Build.yml");

        assert_eq!(
            output_path(definition, Some(Path::new("out.yml")), &config),
            Some(PathBuf::from("out.yml"))
        );
        assert_eq!(
            output_path(definition, None, &config),
            Some(PathBuf::from(".github/workflows/release-build.yml"))
        );
        assert_eq!(output_path(definition, None, &CliConfig::default()), None);
    }

    #[test]
    fn test_render_to_file_with_configured_header() {
        let temp = tempdir().unwrap();
        let definition = temp.path().join("ci.yml");
        fs::write(&definition, DEFINITION).unwrap();
        let output = temp.path().join("out").join("ci.yml");

        let args = RenderArgs {
            definition,
            output: Some(output.clone()),
            header: HeaderArgs::default(),
        };
        let config = CliConfig {
            header: Some("Generated by wfgen".to_string()),
            output_dir: None,
        };
        execute(args, &config).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "# Generated by wfgen\nname: CI\non:\n  push: {}\njobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - run: cargo test\n"
        );
    }

    #[test]
    fn test_render_into_output_dir() {
        let temp = tempdir().unwrap();
        let definition = temp.path().join("nightly.json");
        fs::write(
            &definition,
            r#"{"name": "Nightly", "on": {"schedule": [{"cron": "0 0 * * *"}]}, "jobs": {}}"#,
        )
        .unwrap();
        let out_dir = temp.path().join("workflows");

        let args = RenderArgs {
            definition,
            output: None,
            header: HeaderArgs {
                header: None,
                no_header: true,
            },
        };
        let config = CliConfig {
            header: Some("ignored".to_string()),
            output_dir: Some(out_dir.clone()),
        };
        execute(args, &config).unwrap();

        assert_eq!(
            fs::read_to_string(out_dir.join("nightly.yml")).unwrap(),
            "name: Nightly\non:\n  schedule:\n    - cron: 0 0 * * *\njobs: {}\n"
        );
    }

    #[test]
    fn test_render_rejects_unknown_extension() {
        let temp = tempdir().unwrap();
        let definition = temp.path().join("ci.toml");
        fs::write(&definition, "name = 'CI'\n").unwrap();

        let args = RenderArgs {
            definition,
            output: None,
            header: HeaderArgs::default(),
        };
        assert!(execute(args, &CliConfig::default()).is_err());
    }
}
