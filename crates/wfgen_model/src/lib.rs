//! # wfgen_model
//!
//! Typed model of a GitHub Actions workflow.
//!
//! Every record maps field by field onto a [`wfgen_core::Node`] tree, in a
//! fixed documented order, and renders through the core YAML renderer.
//! Optional fields are `Option`s: `None` is left out of the output, while an
//! explicitly empty value renders as `{}` or `[]`.
//!
//! ## Example
//!
//! ```rust
//! use wfgen_model::{Job, PushTrigger, Step, Triggers, Workflow};
//!
//! let workflow = Workflow::new("CI")
//!     .on(Triggers::new().push(PushTrigger::new().branches(["main"])))
//!     .job(
//!         "test",
//!         Job::new("ubuntu-latest")
//!             .step(Step::uses("actions/checkout@v4"))
//!             .step(Step::run("cargo test").name("Test")),
//!     );
//!
//! let yaml = workflow.to_yaml().unwrap();
//! assert!(yaml.starts_with("name: CI\non:\n  push:\n"));
//! ```

pub mod error;
pub mod job;
pub mod reader;
pub mod step;
pub mod triggers;
pub mod workflow;
pub mod writer;

pub use error::{ModelError, ModelResult};
pub use job::{Container, Job, JobSecrets, Matrix, OneOrMany, Strategy};
pub use reader::{DefinitionFormat, WorkflowReader};
pub use step::Step;
pub use triggers::{
    ActivityTrigger, CallSecret, InputType, PullRequestTrigger, PushTrigger, Schedule, Triggers,
    WorkflowCall, WorkflowDispatch, WorkflowInput, WorkflowRunTrigger,
};
pub use workflow::{
    Access, Concurrency, Defaults, Env, PermissionPreset, PermissionScopes, Permissions,
    RunDefaults, Workflow,
};
pub use writer::WorkflowWriter;
