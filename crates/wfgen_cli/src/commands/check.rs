//! Check command - Verify a generated workflow is up to date.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use super::{load_definition, HeaderArgs};
use crate::config::CliConfig;

#[derive(Args)]
pub struct CheckArgs {
    /// Workflow definition (.yml, .yaml or .json)
    definition: PathBuf,

    /// Generated workflow file to compare against
    #[arg(long)]
    against: PathBuf,

    #[command(flatten)]
    header: HeaderArgs,
}

pub fn execute(args: CheckArgs, config: &CliConfig) -> Result<()> {
    info!(
        "Checking {} against {}",
        args.against.display(),
        args.definition.display()
    );

    let workflow = load_definition(&args.definition)?;
    let expected = workflow.to_yaml_with(&args.header.render_options(config))?;

    if !args.against.exists() {
        anyhow::bail!("Generated file not found: {}", args.against.display());
    }
    let actual = fs::read_to_string(&args.against)
        .with_context(|| format!("Failed to read {}", args.against.display()))?;

    match first_difference(&expected, &actual) {
        None => {
            println!("✅ {} is up to date", args.against.display());
            Ok(())
        }
        Some(line) => {
            debug!("Expected:\n{}", expected);
            anyhow::bail!(
                "{} is out of date (first difference at line {}); re-run `wfgen render`",
                args.against.display(),
                line
            )
        }
    }
}

/// 1-based line number of the first difference, or `None` if identical.
fn first_difference(expected: &str, actual: &str) -> Option<usize> {
    if expected == actual {
        return None;
    }
    let mut expected_lines = expected.split('\n');
    let mut actual_lines = actual.split('\n');
    let mut line = 1;
    loop {
        match (expected_lines.next(), actual_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            _ => return Some(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DEFINITION: &str = "name: CI\njobs:\n  lint:\n    runs-on: ubuntu-latest\n";
    const RENDERED: &str = "name: CI\non: {}\njobs:\n  lint:\n    runs-on: ubuntu-latest\n";

    fn args(dir: &std::path::Path, generated: &str) -> CheckArgs {
        let definition = dir.join("ci.yml");
        fs::write(&definition, DEFINITION).unwrap();
        let against = dir.join("generated.yml");
        fs::write(&against, generated).unwrap();
        CheckArgs {
            definition,
            against,
            header: HeaderArgs::default(),
        }
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("a\nb\n", "a\nb\n"), None);
        assert_eq!(first_difference("a\nb\n", "a\nc\n"), Some(2));
        assert_eq!(first_difference("a\nb\n", "a\nb\nc\n"), Some(3));
        assert_eq!(first_difference("a\n", "b\n"), Some(1));
    }

    #[test]
    fn test_up_to_date() {
        let temp = tempdir().unwrap();
        assert!(execute(args(temp.path(), RENDERED), &CliConfig::default()).is_ok());
    }

    #[test]
    fn test_drift_detected() {
        let temp = tempdir().unwrap();
        let stale = RENDERED.replace("ubuntu-latest", "ubuntu-22.04");
        let err = execute(args(temp.path(), &stale), &CliConfig::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("out of date"), "{}", message);
        assert!(message.contains("line 5"), "{}", message);
    }

    #[test]
    fn test_header_is_part_of_the_comparison() {
        let temp = tempdir().unwrap();
        let config = CliConfig {
            header: Some("Generated by wfgen".to_string()),
            output_dir: None,
        };
        assert!(execute(args(temp.path(), RENDERED), &config).is_err());

        let with_header = format!("# Generated by wfgen\n{}", RENDERED);
        assert!(execute(args(temp.path(), &with_header), &config).is_ok());
    }
}
