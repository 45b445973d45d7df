//! CLI command definitions.
//!
//! Each subcommand loads a workflow definition and renders it with the
//! shared header settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use wfgen_core::RenderOptions;
use wfgen_model::{Workflow, WorkflowReader};

use crate::config::CliConfig;

pub mod check;
pub mod render;

/// wfgen - typed GitHub Actions workflow generator
#[derive(Parser)]
#[command(name = "wfgen")]
#[command(version, about = "wfgen - typed GitHub Actions workflow generator")]
#[command(long_about = r#"
wfgen renders workflow definitions (YAML or JSON) into deterministic,
canonically formatted GitHub Actions workflow files.

COMMANDS:
  render  → Render a definition to stdout or a file
  check   → Verify a generated workflow file is up to date

CONFIGURATION:
  wfgen.toml in the working directory (or --config) may set `header`
  and `output_dir`. WFGEN_HEADER overrides the configured header.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure (invalid definition or out-of-date file)
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (defaults to ./wfgen.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a workflow definition to YAML
    Render(render::RenderArgs),

    /// Check that a generated workflow file matches its definition
    Check(check::CheckArgs),
}

/// Header flags shared by `render` and `check`.
#[derive(Args, Debug, Clone, Default)]
pub struct HeaderArgs {
    /// Header comment for the generated file
    #[arg(long, env = "WFGEN_HEADER")]
    pub header: Option<String>,

    /// Omit the header comment, even if one is configured
    #[arg(long)]
    pub no_header: bool,
}

impl HeaderArgs {
    /// Flag (or `WFGEN_HEADER`) wins over the config file; `--no-header` wins over both.
    pub fn render_options(&self, config: &CliConfig) -> RenderOptions {
        if self.no_header {
            return RenderOptions::new();
        }
        match self.header.as_ref().or(config.header.as_ref()) {
            Some(header) => RenderOptions::new().with_header(header.clone()),
            None => RenderOptions::new(),
        }
    }
}

/// Load a workflow definition, attaching the path to any error.
pub fn load_definition(path: &Path) -> Result<Workflow> {
    if !path.exists() {
        anyhow::bail!("Definition not found: {}", path.display());
    }
    WorkflowReader::read_file(path)
        .with_context(|| format!("Failed to load definition {}", path.display()))
}
