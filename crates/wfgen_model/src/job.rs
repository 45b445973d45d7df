//! Job definitions.

use serde::{Deserialize, Serialize};
use wfgen_core::{Mapping, Node, OrderedMap, Scalar, ToNode};

use crate::step::Step;
use crate::workflow::{Concurrency, Defaults, Env, Permissions};

/// A single string or a list of strings, as accepted by `runs-on` and
/// `needs`. Renders in the same shape it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(value: Vec<String>) -> Self {
        OneOrMany::Many(value)
    }
}

impl From<Vec<&str>> for OneOrMany {
    fn from(value: Vec<&str>) -> Self {
        OneOrMany::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl ToNode for OneOrMany {
    fn to_node(&self) -> Node {
        match self {
            OneOrMany::One(value) => value.to_node(),
            OneOrMany::Many(values) => values.to_node(),
        }
    }
}

/// Secrets passed to a reusable workflow: `inherit` or an explicit map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobSecrets {
    Keyword(String),
    Map(OrderedMap<String>),
}

impl JobSecrets {
    pub fn inherit() -> Self {
        JobSecrets::Keyword("inherit".to_string())
    }
}

impl ToNode for JobSecrets {
    fn to_node(&self) -> Node {
        match self {
            JobSecrets::Keyword(keyword) => keyword.to_node(),
            JobSecrets::Map(map) => map.to_node(),
        }
    }
}

/// One job in the workflow.
///
/// Rendered field order: `name`, `needs`, `if`, `runs-on`, `environment`,
/// `permissions`, `concurrency`, `timeout-minutes`, `continue-on-error`,
/// `strategy`, `container`, `services`, `env`, `defaults`, `outputs`,
/// `steps`, `uses`, `with`, `secrets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Job {
    pub name: Option<String>,
    pub needs: Option<OneOrMany>,
    #[serde(rename = "if")]
    pub if_condition: Option<String>,
    pub runs_on: Option<OneOrMany>,
    pub environment: Option<String>,
    pub permissions: Option<Permissions>,
    pub concurrency: Option<Concurrency>,
    pub timeout_minutes: Option<u32>,
    pub continue_on_error: Option<bool>,
    pub strategy: Option<Strategy>,
    pub container: Option<Container>,
    pub services: Option<OrderedMap<Container>>,
    pub env: Option<Env>,
    pub defaults: Option<Defaults>,
    pub outputs: Option<OrderedMap<String>>,
    pub steps: Option<Vec<Step>>,
    pub uses: Option<String>,
    pub with: Option<OrderedMap<Scalar>>,
    pub secrets: Option<JobSecrets>,
}

impl Job {
    /// A job running on the given runner label(s).
    pub fn new(runs_on: impl Into<OneOrMany>) -> Self {
        Self {
            runs_on: Some(runs_on.into()),
            ..Self::default()
        }
    }

    /// A job that calls a reusable workflow.
    pub fn call(uses: impl Into<String>) -> Self {
        Self {
            uses: Some(uses.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn needs(mut self, needs: impl Into<OneOrMany>) -> Self {
        self.needs = Some(needs.into());
        self
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.if_condition = Some(condition.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn service(mut self, name: impl Into<String>, container: Container) -> Self {
        self.services
            .get_or_insert_with(OrderedMap::new)
            .insert(name, container);
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.env
            .get_or_insert_with(Env::new)
            .insert(key, value.into());
        self
    }

    pub fn output(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs
            .get_or_insert_with(OrderedMap::new)
            .insert(name, value.into());
        self
    }

    /// Append a step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.get_or_insert_with(Vec::new).push(step);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.with
            .get_or_insert_with(OrderedMap::new)
            .insert(key, value.into());
        self
    }

    pub fn secrets(mut self, secrets: JobSecrets) -> Self {
        self.secrets = Some(secrets);
        self
    }
}

impl ToNode for Job {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("name", &self.name)
            .field("needs", &self.needs)
            .field("if", &self.if_condition)
            .field("runs-on", &self.runs_on)
            .field("environment", &self.environment)
            .field("permissions", &self.permissions)
            .field("concurrency", &self.concurrency)
            .field("timeout-minutes", &self.timeout_minutes)
            .field("continue-on-error", &self.continue_on_error)
            .field("strategy", &self.strategy)
            .field("container", &self.container)
            .field("services", &self.services)
            .field("env", &self.env)
            .field("defaults", &self.defaults)
            .field("outputs", &self.outputs)
            .field("steps", &self.steps)
            .field("uses", &self.uses)
            .field("with", &self.with)
            .field("secrets", &self.secrets)
            .into()
    }
}

/// Matrix strategy settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Strategy {
    pub matrix: Option<Matrix>,
    pub fail_fast: Option<bool>,
    pub max_parallel: Option<u32>,
}

impl Strategy {
    pub fn matrix(matrix: Matrix) -> Self {
        Self {
            matrix: Some(matrix),
            ..Self::default()
        }
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    pub fn max_parallel(mut self, max: u32) -> Self {
        self.max_parallel = Some(max);
        self
    }
}

impl ToNode for Strategy {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("matrix", &self.matrix)
            .field("fail-fast", &self.fail_fast)
            .field("max-parallel", &self.max_parallel)
            .into()
    }
}

/// Build matrix: named dimensions first, then `include` and `exclude`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    #[serde(flatten)]
    pub dimensions: OrderedMap<Vec<Scalar>>,
    pub include: Option<Vec<OrderedMap<Scalar>>>,
    pub exclude: Option<Vec<OrderedMap<Scalar>>>,
}

impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimension<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        self.dimensions
            .insert(name, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn include(mut self, combination: OrderedMap<Scalar>) -> Self {
        self.include.get_or_insert_with(Vec::new).push(combination);
        self
    }

    pub fn exclude(mut self, combination: OrderedMap<Scalar>) -> Self {
        self.exclude.get_or_insert_with(Vec::new).push(combination);
        self
    }
}

impl ToNode for Matrix {
    fn to_node(&self) -> Node {
        let mut mapping = Mapping::new();
        for (name, values) in self.dimensions.iter() {
            mapping.push(name, values.to_node());
        }
        mapping
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .into()
    }
}

/// A job container or service container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Container {
    pub image: String,
    pub env: Option<Env>,
    pub ports: Option<Vec<Scalar>>,
    pub volumes: Option<Vec<String>>,
    pub options: Option<String>,
}

impl Container {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            ..Self::default()
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.env
            .get_or_insert_with(Env::new)
            .insert(key, value.into());
        self
    }

    pub fn port(mut self, port: impl Into<Scalar>) -> Self {
        self.ports.get_or_insert_with(Vec::new).push(port.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

impl ToNode for Container {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("image", &self.image)
            .field("env", &self.env)
            .field("ports", &self.ports)
            .field("volumes", &self.volumes)
            .field("options", &self.options)
            .into()
    }
}
