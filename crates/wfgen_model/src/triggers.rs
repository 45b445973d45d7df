//! Workflow trigger (`on:`) definitions.

use serde::{Deserialize, Deserializer, Serialize};
use wfgen_core::{Mapping, Node, OrderedMap, Scalar, ToNode};

/// Events that start the workflow.
///
/// Rendered field order: `push`, `pull_request`, `pull_request_target`,
/// `workflow_dispatch`, `workflow_call`, `workflow_run`, `schedule`,
/// `release`, `issues`, `merge_group`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Triggers {
    #[serde(default, deserialize_with = "enabled")]
    pub push: Option<PushTrigger>,
    #[serde(default, deserialize_with = "enabled")]
    pub pull_request: Option<PullRequestTrigger>,
    #[serde(default, deserialize_with = "enabled")]
    pub pull_request_target: Option<PullRequestTrigger>,
    #[serde(default, deserialize_with = "enabled")]
    pub workflow_dispatch: Option<WorkflowDispatch>,
    #[serde(default, deserialize_with = "enabled")]
    pub workflow_call: Option<WorkflowCall>,
    pub workflow_run: Option<WorkflowRunTrigger>,
    pub schedule: Option<Vec<Schedule>>,
    #[serde(default, deserialize_with = "enabled")]
    pub release: Option<ActivityTrigger>,
    #[serde(default, deserialize_with = "enabled")]
    pub issues: Option<ActivityTrigger>,
    #[serde(default, deserialize_with = "enabled")]
    pub merge_group: Option<ActivityTrigger>,
}

/// A trigger key written with no value (`push:`) still enables the trigger.
fn enabled<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(|value| Some(value.unwrap_or_default()))
}

impl Triggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, trigger: PushTrigger) -> Self {
        self.push = Some(trigger);
        self
    }

    pub fn pull_request(mut self, trigger: PullRequestTrigger) -> Self {
        self.pull_request = Some(trigger);
        self
    }

    pub fn pull_request_target(mut self, trigger: PullRequestTrigger) -> Self {
        self.pull_request_target = Some(trigger);
        self
    }

    pub fn workflow_dispatch(mut self, trigger: WorkflowDispatch) -> Self {
        self.workflow_dispatch = Some(trigger);
        self
    }

    pub fn workflow_call(mut self, trigger: WorkflowCall) -> Self {
        self.workflow_call = Some(trigger);
        self
    }

    pub fn workflow_run(mut self, trigger: WorkflowRunTrigger) -> Self {
        self.workflow_run = Some(trigger);
        self
    }

    /// Add a cron schedule.
    pub fn cron(mut self, cron: impl Into<String>) -> Self {
        self.schedule
            .get_or_insert_with(Vec::new)
            .push(Schedule { cron: cron.into() });
        self
    }

    pub fn release(mut self, trigger: ActivityTrigger) -> Self {
        self.release = Some(trigger);
        self
    }

    pub fn issues(mut self, trigger: ActivityTrigger) -> Self {
        self.issues = Some(trigger);
        self
    }

    pub fn merge_group(mut self, trigger: ActivityTrigger) -> Self {
        self.merge_group = Some(trigger);
        self
    }
}

impl ToNode for Triggers {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("push", &self.push)
            .field("pull_request", &self.pull_request)
            .field("pull_request_target", &self.pull_request_target)
            .field("workflow_dispatch", &self.workflow_dispatch)
            .field("workflow_call", &self.workflow_call)
            .field("workflow_run", &self.workflow_run)
            .field("schedule", &self.schedule)
            .field("release", &self.release)
            .field("issues", &self.issues)
            .field("merge_group", &self.merge_group)
            .into()
    }
}

/// Branch, tag and path filters for `push`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PushTrigger {
    pub branches: Option<Vec<String>>,
    pub branches_ignore: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub tags_ignore: Option<Vec<String>>,
    pub paths: Option<Vec<String>>,
    pub paths_ignore: Option<Vec<String>>,
}

impl PushTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }
}

impl ToNode for PushTrigger {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("branches", &self.branches)
            .field("branches-ignore", &self.branches_ignore)
            .field("tags", &self.tags)
            .field("tags-ignore", &self.tags_ignore)
            .field("paths", &self.paths)
            .field("paths-ignore", &self.paths_ignore)
            .into()
    }
}

/// Filters for `pull_request` and `pull_request_target`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PullRequestTrigger {
    pub types: Option<Vec<String>>,
    pub branches: Option<Vec<String>>,
    pub branches_ignore: Option<Vec<String>>,
    pub paths: Option<Vec<String>>,
    pub paths_ignore: Option<Vec<String>>,
}

impl PullRequestTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }
}

impl ToNode for PullRequestTrigger {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("types", &self.types)
            .field("branches", &self.branches)
            .field("branches-ignore", &self.branches_ignore)
            .field("paths", &self.paths)
            .field("paths-ignore", &self.paths_ignore)
            .into()
    }
}

/// Manual trigger with optional typed inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowDispatch {
    pub inputs: Option<OrderedMap<WorkflowInput>>,
}

impl WorkflowDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, name: impl Into<String>, input: WorkflowInput) -> Self {
        self.inputs
            .get_or_insert_with(OrderedMap::new)
            .insert(name, input);
        self
    }
}

impl ToNode for WorkflowDispatch {
    fn to_node(&self) -> Node {
        Mapping::new().field("inputs", &self.inputs).into()
    }
}

/// Reusable-workflow entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowCall {
    pub inputs: Option<OrderedMap<WorkflowInput>>,
    pub secrets: Option<OrderedMap<CallSecret>>,
}

impl WorkflowCall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, name: impl Into<String>, input: WorkflowInput) -> Self {
        self.inputs
            .get_or_insert_with(OrderedMap::new)
            .insert(name, input);
        self
    }

    pub fn secret(mut self, name: impl Into<String>, secret: CallSecret) -> Self {
        self.secrets
            .get_or_insert_with(OrderedMap::new)
            .insert(name, secret);
        self
    }
}

impl ToNode for WorkflowCall {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("inputs", &self.inputs)
            .field("secrets", &self.secrets)
            .into()
    }
}

/// Input type accepted by dispatch and call inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    String,
    Boolean,
    Number,
    Choice,
    Environment,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::String => "string",
            InputType::Boolean => "boolean",
            InputType::Number => "number",
            InputType::Choice => "choice",
            InputType::Environment => "environment",
        }
    }
}

impl ToNode for InputType {
    fn to_node(&self) -> Node {
        self.as_str().into()
    }
}

/// A dispatch or call input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowInput {
    pub description: Option<String>,
    pub required: Option<bool>,
    pub default: Option<Scalar>,
    #[serde(rename = "type")]
    pub input_type: Option<InputType>,
    pub options: Option<Vec<String>>,
}

impl WorkflowInput {
    pub fn new(input_type: InputType) -> Self {
        Self {
            input_type: Some(input_type),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn default_value(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

impl ToNode for WorkflowInput {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("description", &self.description)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("type", &self.input_type)
            .field("options", &self.options)
            .into()
    }
}

/// A secret a reusable workflow expects from its caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallSecret {
    pub description: Option<String>,
    pub required: Option<bool>,
}

impl ToNode for CallSecret {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("description", &self.description)
            .field("required", &self.required)
            .into()
    }
}

/// Run after another workflow completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowRunTrigger {
    pub workflows: Vec<String>,
    pub types: Option<Vec<String>>,
    pub branches: Option<Vec<String>>,
}

impl ToNode for WorkflowRunTrigger {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("workflows", &self.workflows)
            .field("types", &self.types)
            .field("branches", &self.branches)
            .into()
    }
}

/// Events filtered only by activity type (`release`, `issues`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActivityTrigger {
    pub types: Option<Vec<String>>,
}

impl ActivityTrigger {
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: Some(types.into_iter().map(Into::into).collect()),
        }
    }
}

impl ToNode for ActivityTrigger {
    fn to_node(&self) -> Node {
        Mapping::new().field("types", &self.types).into()
    }
}

/// One `schedule` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schedule {
    pub cron: String,
}

impl ToNode for Schedule {
    fn to_node(&self) -> Node {
        Mapping::new().field("cron", &self.cron).into()
    }
}
