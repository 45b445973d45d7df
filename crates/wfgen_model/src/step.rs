//! Step definitions.

use serde::{Deserialize, Serialize};
use wfgen_core::{Mapping, Node, OrderedMap, Scalar, ToNode};

use crate::workflow::Env;

/// One step of a job: either an action (`uses`) or a shell command (`run`).
///
/// Rendered field order: `id`, `if`, `name`, `uses`, `with`, `run`, `shell`,
/// `working-directory`, `env`, `continue-on-error`, `timeout-minutes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Step {
    pub id: Option<String>,
    #[serde(rename = "if")]
    pub if_condition: Option<String>,
    pub name: Option<String>,
    pub uses: Option<String>,
    pub with: Option<OrderedMap<Scalar>>,
    pub run: Option<String>,
    pub shell: Option<String>,
    pub working_directory: Option<String>,
    pub env: Option<Env>,
    pub continue_on_error: Option<bool>,
    pub timeout_minutes: Option<u32>,
}

impl Step {
    /// A shell step. Multi-line commands render as a block literal.
    pub fn run(command: impl Into<String>) -> Self {
        Self {
            run: Some(command.into()),
            ..Self::default()
        }
    }

    /// An action step, e.g. `actions/checkout@v4`.
    pub fn uses(action: impl Into<String>) -> Self {
        Self {
            uses: Some(action.into()),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.if_condition = Some(condition.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an action input.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.with
            .get_or_insert_with(OrderedMap::new)
            .insert(key, value.into());
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    pub fn working_directory(mut self, dir: impl Into<String>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.env
            .get_or_insert_with(Env::new)
            .insert(key, value.into());
        self
    }

    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = Some(continue_on_error);
        self
    }

    pub fn timeout_minutes(mut self, minutes: u32) -> Self {
        self.timeout_minutes = Some(minutes);
        self
    }
}

impl ToNode for Step {
    fn to_node(&self) -> Node {
        Mapping::new()
            .field("id", &self.id)
            .field("if", &self.if_condition)
            .field("name", &self.name)
            .field("uses", &self.uses)
            .field("with", &self.with)
            .field("run", &self.run)
            .field("shell", &self.shell)
            .field("working-directory", &self.working_directory)
            .field("env", &self.env)
            .field("continue-on-error", &self.continue_on_error)
            .field("timeout-minutes", &self.timeout_minutes)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfgen_core::render;

    #[test]
    fn test_action_step() {
        let step = Step::uses("actions/setup-node@v4")
            .name("Setup Node")
            .with("node-version", "20")
            .with("cache", "npm");
        assert_eq!(
            render(&step.to_node()).unwrap(),
            "name: Setup Node\nuses: actions/setup-node@v4\nwith:\n  node-version: \"20\"\n  cache: npm\n"
        );
    }

    #[test]
    fn test_multi_line_run() {
        let step = Step::run("python -m pip install --upgrade pip\npip install -r requirements.txt\n")
            .name("Install dependencies");
        assert_eq!(
            render(&step.to_node()).unwrap(),
            "name: Install dependencies\nrun: |\n  python -m pip install --upgrade pip\n  pip install -r requirements.txt\n"
        );
    }

    #[test]
    fn test_step_deserialize_if() {
        let step: Step = serde_yaml::from_str("if: success()\nrun: make\nworking-directory: app\n").unwrap();
        assert_eq!(step.if_condition.as_deref(), Some("success()"));
        assert_eq!(step.working_directory.as_deref(), Some("app"));
    }
}
