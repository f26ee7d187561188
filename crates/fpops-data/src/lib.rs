//! fpops data
//!
//! Data-shaping operations built on the public `fpops-core` contract. Each
//! function returns an [`Operation`](fpops_core::Operation) whose single node
//! takes the data to shape, so transformations can be described before any
//! data exists and chained with `>>`:
//!
//! ```ignore
//! let email = get("user", Value::Null) >> get("contact.email", "unknown");
//! let outcome = email.execute(response).await;
//! ```
//!
//! [`resolve_pipeline`] turns a declarative
//! [`PipelineDef`](fpops_config::PipelineDef) into the same kind of chain.

mod build;
mod error;
mod get;
mod merge;
mod resolve;
mod update;

pub use build::{Field, FieldFn, Schema, build};
pub use error::{DataError, ResolveError};
pub use get::{get, lookup};
pub use merge::{Source, SourceFn, merge};
pub use resolve::resolve_pipeline;
pub use update::update;
