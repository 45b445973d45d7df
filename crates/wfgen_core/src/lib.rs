//! # wfgen_core
//!
//! Document tree and deterministic YAML renderer for wfgen.
//!
//! This crate knows nothing about workflow fields. It renders a generic
//! [`Node`] tree (scalars, ordered mappings, sequences and absent fields)
//! into YAML text that a CI runner reads back into the same structure.
//!
//! ## Guarantees
//!
//! - **Deterministic**: the same tree always renders to the same bytes
//! - **Ordered**: mapping keys come out in insertion order
//! - **Omission**: [`Node::Absent`] entries leave no trace in the output
//! - **Safe scalars**: strings a parser could mistake for another type are quoted
//!
//! ## Example
//!
//! ```rust
//! use wfgen_core::{render, Mapping, Node};
//!
//! let root: Node = Mapping::new()
//!     .field("name", "CI")
//!     .field("timeout", &None::<i64>)
//!     .field("env", &Mapping::new().field("DEBUG", "true"))
//!     .into();
//!
//! assert_eq!(render(&root).unwrap(), "name: CI\nenv:\n  DEBUG: \"true\"\n");
//! ```

pub mod error;
pub mod node;
pub mod ordered_map;
pub mod render;
mod scalar;

pub use error::{RenderError, RenderResult};
pub use node::{Mapping, Node, Scalar, ToNode};
pub use ordered_map::OrderedMap;
pub use render::{render, render_document, RenderOptions, INDENT};
