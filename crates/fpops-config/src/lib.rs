//! fpops Config
//!
//! This crate contains the serializable pipeline definition types for fpops.
//! A definition describes a chain of data-shaping stages; it is turned into an
//! executable operation by `fpops-data`.
//!
//! Definitions are loaded from JSON files (via the CLI's `run` and `validate`
//! commands).

mod pipeline;
mod stage;

pub use pipeline::PipelineDef;
pub use stage::{FieldDef, StageDef};
