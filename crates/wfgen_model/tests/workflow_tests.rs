//! Integration tests for the workflow model.

use std::fs;
use tempfile::tempdir;

use wfgen_core::RenderOptions;
use wfgen_model::{
    Access, Concurrency, DefinitionFormat, InputType, Job, Matrix, PermissionScopes, Permissions,
    PullRequestTrigger, PushTrigger, Step, Strategy, Triggers, Workflow, WorkflowDispatch,
    WorkflowInput, WorkflowReader, WorkflowWriter,
};

const SIMPLE_EXPECTED: &str = r#"name: Simple Workflow
on:
  push: {}
permissions:
  actions: read
env:
  ENV_FIELD: "1"
jobs:
  echo:
    name: Echo
    runs-on: macos-latest
    steps:
      - name: Echoing!
        run: echo "Hello World!"
"#;

fn simple_workflow() -> Workflow {
    Workflow::new("Simple Workflow")
        .on(Triggers::new().push(PushTrigger::new()))
        .permissions(Permissions::scoped(PermissionScopes {
            actions: Some(Access::Read),
            ..PermissionScopes::default()
        }))
        .env("ENV_FIELD", "1")
        .job(
            "echo",
            Job::new("macos-latest")
                .name("Echo")
                .step(Step::run(r#"echo "Hello World!""#).name("Echoing!")),
        )
}

/// The canonical single-job workflow renders in declared field order.
#[test]
fn test_simple_workflow() {
    assert_eq!(simple_workflow().to_yaml().unwrap(), SIMPLE_EXPECTED);
}

/// The same workflow loaded from a YAML definition renders identically.
#[test]
fn test_simple_workflow_from_yaml_definition() {
    let definition = r#"
name: Simple Workflow
on:
  push: {}
permissions:
  actions: read
env:
  ENV_FIELD: "1"
jobs:
  echo:
    name: Echo
    runs-on: macos-latest
    steps:
      - name: Echoing!
        run: echo "Hello World!"
"#;
    let workflow = WorkflowReader::parse(definition, DefinitionFormat::Yaml).unwrap();
    assert_eq!(workflow, simple_workflow());
    assert_eq!(workflow.to_yaml().unwrap(), SIMPLE_EXPECTED);
}

/// JSON definitions keep their key order too.
#[test]
fn test_simple_workflow_from_json_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("simple.json");
    fs::write(
        &path,
        r#"{
  "name": "Simple Workflow",
  "on": { "push": {} },
  "permissions": { "actions": "read" },
  "env": { "ENV_FIELD": "1" },
  "jobs": {
    "echo": {
      "name": "Echo",
      "runs-on": "macos-latest",
      "steps": [{ "name": "Echoing!", "run": "echo \"Hello World!\"" }]
    }
  }
}"#,
    )
    .unwrap();

    let workflow = WorkflowReader::read_file(&path).unwrap();
    assert_eq!(workflow.to_yaml().unwrap(), SIMPLE_EXPECTED);
}

#[test]
fn test_invalid_definition_names_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.yml");
    fs::write(&path, "jobs:\n  build:\n    runs_on: ubuntu-latest\n").unwrap();

    let err = WorkflowReader::read_file(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("broken.yml"), "{}", message);
    assert!(message.contains("runs_on"), "{}", message);
}

/// A multi-line run command uses block-literal form, one level under `run:`.
#[test]
fn test_multi_line_script() {
    let workflow = Workflow::default().job(
        "echo",
        Job::new("ubuntu-latest").step(Step::run("echo \"Hello World!\"\n")),
    );
    let yaml = workflow.to_yaml().unwrap();
    assert!(
        yaml.contains("      - run: |\n          echo \"Hello World!\"\n"),
        "{}",
        yaml
    );
}

/// Unset fields leave no trace; explicitly empty ones render as empty collections.
#[test]
fn test_absent_versus_empty() {
    let unset = Workflow::new("W").job("a", Job::new("ubuntu-latest"));
    let yaml = unset.to_yaml().unwrap();
    assert!(!yaml.contains("steps"));
    assert!(!yaml.contains("permissions"));

    let mut empty = Job::new("ubuntu-latest");
    empty.steps = Some(Vec::new());
    let yaml = Workflow::new("W").job("a", empty).to_yaml().unwrap();
    assert!(yaml.contains("    steps: []\n"), "{}", yaml);
}

#[test]
fn test_full_workflow_renders_and_reparses() {
    let workflow = Workflow::new("Release")
        .run_name("Release ${{ github.ref_name }}")
        .on(Triggers::new()
            .push(PushTrigger::new().tags(["v*"]))
            .pull_request(PullRequestTrigger::new().branches(["main"]))
            .workflow_dispatch(WorkflowDispatch::new().input(
                "dry-run",
                WorkflowInput::new(InputType::Boolean)
                    .description("Skip publishing")
                    .default_value(false),
            ))
            .cron("30 2 * * *"))
        .permissions(Permissions::read_all())
        .concurrency(Concurrency::new("release").cancel_in_progress(false))
        .env("RUST_BACKTRACE", 1)
        .job(
            "build",
            Job::new("${{ matrix.os }}")
                .strategy(Strategy::matrix(
                    Matrix::new().dimension("os", ["ubuntu-latest", "macos-latest"]),
                ))
                .step(Step::uses("actions/checkout@v4").with("fetch-depth", 0))
                .step(
                    Step::run("cargo build --release\ncargo test --release\n")
                        .name("Build")
                        .env("CARGO_INCREMENTAL", "0"),
                )
                .output("version", "${{ steps.meta.outputs.version }}"),
        )
        .job(
            "publish",
            Job::new("ubuntu-latest")
                .needs("build")
                .when("startsWith(github.ref, 'refs/tags/')")
                .environment("production")
                .step(Step::run("cargo publish").continue_on_error(false)),
        );

    let yaml = workflow.to_yaml().unwrap();
    let reparsed = WorkflowReader::parse(&yaml, DefinitionFormat::Yaml).unwrap();
    assert_eq!(reparsed, workflow);
    assert_eq!(reparsed.to_yaml().unwrap(), yaml);

    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let jobs: Vec<_> = value["jobs"]
        .as_mapping()
        .unwrap()
        .keys()
        .map(|k| k.as_str().unwrap().to_string())
        .collect();
    assert_eq!(jobs, vec!["build", "publish"]);
    assert_eq!(value["env"]["RUST_BACKTRACE"], serde_yaml::Value::from(1));
}

#[test]
fn test_writer_writes_header_and_creates_directories() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(".github").join("workflows").join("simple.yml");
    let options = RenderOptions::new().with_header("Generated by wfgen. Do not edit.");

    WorkflowWriter::write(&path, &simple_workflow(), &options).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        format!("# Generated by wfgen. Do not edit.\n{}", SIMPLE_EXPECTED)
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let workflow = simple_workflow();
    let first = workflow.to_yaml().unwrap();
    for _ in 0..10 {
        assert_eq!(workflow.to_yaml().unwrap(), first);
    }
}
