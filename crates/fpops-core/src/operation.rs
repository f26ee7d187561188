//! Operations: immutable node chains with binding, chaining and execution.

use std::future::{Future, IntoFuture};
use std::ops::Shr;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use serde_json::Value;
use tracing::{debug, warn};

use crate::args::{Args, Bindings};
use crate::binder::fill_holes;
use crate::error::{BoxError, SignatureError, ValidationError};
use crate::executor::Executor;
use crate::node::{BindState, Callable, Node};
use crate::outcome::Outcome;
use crate::signature::Signature;

/// Wrap a synchronous function as a one-node operation.
///
/// The function receives one value per parameter of `signature`, in order.
pub fn operation<F>(signature: Signature, f: F) -> Operation
where
  F: Fn(Vec<Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
{
  Callable::new(signature, f).into()
}

/// Wrap an asynchronous function as a one-node operation.
pub fn async_operation<F, Fut>(signature: Signature, f: F) -> Operation
where
  F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
  Callable::new_async(signature, f).into()
}

/// Chain operations in order.
pub fn pipe<I>(ops: I) -> Result<Operation, ValidationError>
where
  I: IntoIterator,
  I::Item: Into<Operation>,
{
  ops
    .into_iter()
    .map(Into::into)
    .reduce(|chain, next| chain.then(next))
    .ok_or(ValidationError::Empty)
}

/// An ordered, immutable sequence of nodes.
///
/// Cloning is cheap; clones share their nodes. Binding and chaining always
/// return a new `Operation` and never change `self`.
///
/// ```ignore
/// let pipeline = add.bind(Args::positional([1, 2])) >> add_one;
/// let outcome = pipeline.await;
/// assert_eq!(outcome.value_or(Value::Null), json!(4));
/// ```
#[derive(Debug, Clone)]
pub struct Operation {
  nodes: Vec<Arc<Node>>,
}

impl From<Callable> for Operation {
  fn from(callable: Callable) -> Self {
    Self {
      nodes: vec![Arc::new(Node::new(Arc::new(callable)))],
    }
  }
}

impl From<&Operation> for Operation {
  fn from(op: &Operation) -> Self {
    op.clone()
  }
}

impl Operation {
  /// Nodes in execution order.
  pub fn nodes(&self) -> &[Arc<Node>] {
    &self.nodes
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Node names in execution order.
  pub fn names(&self) -> Vec<&str> {
    self.nodes.iter().map(|n| n.name()).collect()
  }

  fn first(&self) -> &Node {
    &self.nodes[0]
  }

  /// Partially apply the first node.
  ///
  /// An unbound first node stores `bindings`. A first node with placeholders
  /// has them filled from `bindings`. A fully bound first node keeps its
  /// arguments and the new ones are discarded.
  pub fn bind(&self, bindings: impl Into<Bindings>) -> Operation {
    let first = self.first();
    let supplied = bindings.into();

    let bound = match first.state() {
      BindState::Unbound => supplied,
      BindState::Partial(_) => fill_holes(first.signature(), first.bindings(), supplied),
      BindState::Constant => {
        if !supplied.is_empty() {
          debug!(node = %first.name(), "discarding arguments for fully bound node");
        }
        first.bindings().clone()
      }
    };

    let mut nodes = Vec::with_capacity(self.nodes.len());
    nodes.push(Arc::new(first.with_bindings(bound)));
    nodes.extend(self.nodes[1..].iter().cloned());
    Operation { nodes }
  }

  /// Append `next` after this operation.
  pub fn then(&self, next: impl Into<Operation>) -> Operation {
    let next = next.into();
    let mut nodes = Vec::with_capacity(self.nodes.len() + next.nodes.len());
    nodes.extend(self.nodes.iter().cloned());
    nodes.extend(next.nodes);
    Operation { nodes }
  }

  /// Run the chain with `extras` supplied to the first node.
  ///
  /// Failures never escape as errors; they are returned as
  /// [`Outcome::Failure`].
  pub fn execute(&self, extras: impl Into<Args>) -> BoxFuture<'static, Outcome> {
    Executor::new(self.nodes.clone())
      .run(extras.into())
      .boxed()
  }

  /// Run independent invocations concurrently, one per input.
  ///
  /// Outcomes are returned in input order.
  pub async fn execute_all<I>(&self, inputs: I) -> Vec<Outcome>
  where
    I: IntoIterator,
    I::Item: Into<Args>,
  {
    join_all(inputs.into_iter().map(|input| self.execute(input))).await
  }

  /// Check that the chain can run without running any node.
  pub fn validate(&self) -> Result<(), ValidationError> {
    self
      .nodes
      .iter()
      .enumerate()
      .try_for_each(|(index, node)| validate_node(index, node))
      .inspect_err(|e| warn!(error = %e, "operation validation failed"))
  }
}

fn validate_node(index: usize, node: &Node) -> Result<(), ValidationError> {
  let signature = node.signature();
  let bound = node.bindings();
  let shape = |complete: bool| {
    signature
      .check_shape(
        bound.positional.len(),
        bound.keyword.keys().map(String::as_str),
        complete,
      )
      .map_err(|e: SignatureError| ValidationError::Shape {
        node: node.name().to_string(),
        index,
        message: e.to_string(),
      })
  };

  match node.state() {
    BindState::Unbound if index > 0 && !signature.accepts_single() => {
      Err(ValidationError::UpstreamArity {
        node: node.name().to_string(),
        index,
        accepted: signature.arity(),
        required: signature.required_count(),
      })
    }
    BindState::Unbound => Ok(()),
    BindState::Constant => shape(true),
    BindState::Partial(holes) if index > 0 && holes > 1 => {
      Err(ValidationError::MultiplePlaceholders {
        node: node.name().to_string(),
        index,
        count: holes,
      })
    }
    BindState::Partial(_) => shape(index > 0),
  }
}

impl<O: Into<Operation>> Shr<O> for Operation {
  type Output = Operation;

  fn shr(self, next: O) -> Operation {
    self.then(next)
  }
}

impl<O: Into<Operation>> Shr<O> for &Operation {
  type Output = Operation;

  fn shr(self, next: O) -> Operation {
    self.then(next)
  }
}

impl<O: Into<Operation>> Shr<O> for Callable {
  type Output = Operation;

  fn shr(self, next: O) -> Operation {
    Operation::from(self).then(next)
  }
}

impl IntoFuture for Operation {
  type Output = Outcome;
  type IntoFuture = BoxFuture<'static, Outcome>;

  /// Awaiting an operation runs it without call arguments.
  fn into_future(self) -> Self::IntoFuture {
    self.execute(Args::new())
  }
}

impl IntoFuture for &Operation {
  type Output = Outcome;
  type IntoFuture = BoxFuture<'static, Outcome>;

  fn into_future(self) -> Self::IntoFuture {
    self.execute(Args::new())
  }
}
