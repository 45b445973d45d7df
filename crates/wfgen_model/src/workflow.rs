//! Top-level workflow document and the settings shared with jobs.

use serde::{Deserialize, Serialize};
use tracing::debug;
use wfgen_core::{render_document, Mapping, Node, OrderedMap, RenderOptions, Scalar, ToNode};

use crate::error::ModelResult;
use crate::job::Job;
use crate::triggers::Triggers;

/// Environment variables, in declaration order.
pub type Env = OrderedMap<Scalar>;

/// A complete workflow file.
///
/// Rendered field order: `name`, `run-name`, `on`, `permissions`, `env`,
/// `defaults`, `concurrency`, `jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Workflow {
    pub name: Option<String>,
    pub run_name: Option<String>,
    #[serde(default)]
    pub on: Triggers,
    pub permissions: Option<Permissions>,
    pub env: Option<Env>,
    pub defaults: Option<Defaults>,
    pub concurrency: Option<Concurrency>,
    #[serde(default)]
    pub jobs: OrderedMap<Job>,
}

impl Workflow {
    /// Create a named workflow with no triggers and no jobs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = Some(run_name.into());
        self
    }

    pub fn on(mut self, triggers: Triggers) -> Self {
        self.on = triggers;
        self
    }

    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.env
            .get_or_insert_with(Env::new)
            .insert(key, value.into());
        self
    }

    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Add a job. Re-using an id replaces the earlier job in place.
    pub fn job(mut self, id: impl Into<String>, job: Job) -> Self {
        self.jobs.insert(id, job);
        self
    }

    /// Render to YAML text.
    pub fn to_yaml(&self) -> ModelResult<String> {
        self.to_yaml_with(&RenderOptions::default())
    }

    /// Render to YAML text with document options such as a header comment.
    pub fn to_yaml_with(&self, options: &RenderOptions) -> ModelResult<String> {
        debug!(
            "Rendering workflow {:?} with {} job(s)",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.jobs.len()
        );
        Ok(render_document(&self.to_node(), options)?)
    }
}

impl ToNode for Workflow {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("name", &self.name)
            .field("run-name", &self.run_name)
            .field("on", &self.on)
            .field("permissions", &self.permissions)
            .field("env", &self.env)
            .field("defaults", &self.defaults)
            .field("concurrency", &self.concurrency)
            .field("jobs", &self.jobs)
            .into()
    }
}

/// `GITHUB_TOKEN` permissions, either a preset or per-scope levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permissions {
    Preset(PermissionPreset),
    Scoped(PermissionScopes),
}

impl Permissions {
    pub fn read_all() -> Self {
        Permissions::Preset(PermissionPreset::ReadAll)
    }

    pub fn write_all() -> Self {
        Permissions::Preset(PermissionPreset::WriteAll)
    }

    pub fn scoped(scopes: PermissionScopes) -> Self {
        Permissions::Scoped(scopes)
    }
}

impl ToNode for Permissions {
    fn to_node(&self) -> Node {
        match self {
            Permissions::Preset(preset) => preset.as_str().into(),
            Permissions::Scoped(scopes) => scopes.to_node(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionPreset {
    ReadAll,
    WriteAll,
}

impl PermissionPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionPreset::ReadAll => "read-all",
            PermissionPreset::WriteAll => "write-all",
        }
    }
}

/// Access level for one permission scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Write,
    #[serde(rename = "none")]
    NoAccess,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
            Access::NoAccess => "none",
        }
    }
}

impl ToNode for Access {
    fn to_node(&self) -> Node {
        self.as_str().into()
    }
}

/// Per-scope permissions, rendered in GitHub's documented scope order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PermissionScopes {
    pub actions: Option<Access>,
    pub attestations: Option<Access>,
    pub checks: Option<Access>,
    pub contents: Option<Access>,
    pub deployments: Option<Access>,
    pub discussions: Option<Access>,
    pub id_token: Option<Access>,
    pub issues: Option<Access>,
    pub packages: Option<Access>,
    pub pages: Option<Access>,
    pub pull_requests: Option<Access>,
    pub repository_projects: Option<Access>,
    pub security_events: Option<Access>,
    pub statuses: Option<Access>,
}

impl ToNode for PermissionScopes {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("actions", &self.actions)
            .field("attestations", &self.attestations)
            .field("checks", &self.checks)
            .field("contents", &self.contents)
            .field("deployments", &self.deployments)
            .field("discussions", &self.discussions)
            .field("id-token", &self.id_token)
            .field("issues", &self.issues)
            .field("packages", &self.packages)
            .field("pages", &self.pages)
            .field("pull-requests", &self.pull_requests)
            .field("repository-projects", &self.repository_projects)
            .field("security-events", &self.security_events)
            .field("statuses", &self.statuses)
            .into()
    }
}

/// Defaults applied to every `run` step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub run: Option<RunDefaults>,
}

impl Defaults {
    pub fn run(run: RunDefaults) -> Self {
        Self { run: Some(run) }
    }
}

impl ToNode for Defaults {
    fn to_node(&self) -> Node {
        Mapping::new().field("run", &self.run).into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunDefaults {
    pub shell: Option<String>,
    pub working_directory: Option<String>,
}

impl ToNode for RunDefaults {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("shell", &self.shell)
            .field("working-directory", &self.working_directory)
            .into()
    }
}

/// Concurrency group for workflows and jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Concurrency {
    pub group: String,
    pub cancel_in_progress: Option<bool>,
}

impl Concurrency {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            cancel_in_progress: None,
        }
    }

    pub fn cancel_in_progress(mut self, cancel: bool) -> Self {
        self.cancel_in_progress = Some(cancel);
        self
    }
}

impl ToNode for Concurrency {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("group", &self.group)
            .field("cancel-in-progress", &self.cancel_in_progress)
            .into()
    }
}
