//! fpops core
//!
//! This crate provides the operation engine for fpops: describe a unit of work
//! before any data exists, compose units into pipelines, and run the pipeline
//! later against concrete inputs.
//!
//! # Architecture
//!
//! ```text
//! Operation
//! ├── bind(bindings) -> Operation     partial application of the first node
//! ├── then(op) / op >> op -> Operation chaining (concatenates node lists)
//! ├── validate()                       arity/shape check, runs nothing
//! └── execute(args) / .await -> Outcome
//!
//! Executor
//! └── for each node: binder::resolve -> Signature::apply -> Callable::invoke
//!     stop at the first failure
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fpops_core::{Args, Bindings, PLACEHOLDER, Signature, operation};
//!
//! let add = operation(Signature::of("add", ["a", "b"]), |v| {
//!   Ok(json!(v[0].as_i64().unwrap_or(0) + v[1].as_i64().unwrap_or(0)))
//! });
//! let mul = operation(Signature::of("mul", ["x", "y"]), |v| {
//!   Ok(json!(v[0].as_i64().unwrap_or(0) * v[1].as_i64().unwrap_or(0)))
//! });
//!
//! // add(a, b), then mul(<previous result>, 3)
//! let pipeline = &add >> mul.bind(Bindings::new().slot(PLACEHOLDER).arg(3));
//! pipeline.validate()?;
//!
//! let outcome = pipeline.execute(Args::new().kwarg("a", 1).kwarg("b", 2)).await;
//! assert_eq!(outcome.value_or(Value::Null), json!(9));
//! ```

mod args;
mod binder;
mod error;
mod executor;
mod node;
mod operation;
mod outcome;
mod signature;

pub use args::{Args, Bindings, PLACEHOLDER, Slot};
pub use binder::{fill_holes, resolve};
pub use error::{BoxError, OperationError, SignatureError, ValidationError};
pub use node::{BindState, Callable, Node};
pub use operation::{Operation, async_operation, operation, pipe};
pub use outcome::Outcome;
pub use signature::{Param, Signature};
