//! Wrapped callables and the nodes that carry their bound arguments.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::args::Bindings;
use crate::error::BoxError;
use crate::signature::Signature;

type SyncFn = dyn Fn(Vec<Value>) -> Result<Value, BoxError> + Send + Sync;
type AsyncFn = dyn Fn(Vec<Value>) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync;

/// The function body of a callable.
#[derive(Clone)]
enum Body {
  Sync(Arc<SyncFn>),
  Async(Arc<AsyncFn>),
}

/// Why a callable did not produce a value.
#[derive(Debug)]
pub(crate) enum Fault {
  Failed(BoxError),
  Panicked(String),
}

/// A function plus the signature it was declared with.
///
/// The function receives one value per declared parameter, in declaration
/// order. Callables are treated as stateless and may be shared freely.
#[derive(Clone)]
pub struct Callable {
  signature: Signature,
  body: Body,
}

impl Callable {
  /// Wrap a synchronous function.
  pub fn new<F>(signature: Signature, f: F) -> Self
  where
    F: Fn(Vec<Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
  {
    Self {
      signature,
      body: Body::Sync(Arc::new(f)),
    }
  }

  /// Wrap a function returning a future.
  pub fn new_async<F, Fut>(signature: Signature, f: F) -> Self
  where
    F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
  {
    Self {
      signature,
      body: Body::Async(Arc::new(move |values| f(values).boxed())),
    }
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub fn name(&self) -> &str {
    &self.signature.name
  }

  pub fn is_async(&self) -> bool {
    matches!(self.body, Body::Async(_))
  }

  /// Call the function, capturing both returned errors and panics.
  pub(crate) async fn invoke(&self, values: Vec<Value>) -> Result<Value, Fault> {
    match &self.body {
      Body::Sync(f) => match catch_unwind(AssertUnwindSafe(|| f(values))) {
        Ok(result) => result.map_err(Fault::Failed),
        Err(payload) => Err(Fault::Panicked(panic_message(payload))),
      },
      Body::Async(f) => {
        let future = catch_unwind(AssertUnwindSafe(|| f(values)))
          .map_err(|payload| Fault::Panicked(panic_message(payload)))?;
        match AssertUnwindSafe(future).catch_unwind().await {
          Ok(result) => result.map_err(Fault::Failed),
          Err(payload) => Err(Fault::Panicked(panic_message(payload))),
        }
      }
    }
  }
}

impl fmt::Debug for Callable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Callable")
      .field("signature", &self.signature)
      .field("async", &self.is_async())
      .finish()
  }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "callable panicked".to_string()
  }
}

/// Binding state of a node, which drives argument resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
  /// Nothing bound.
  Unbound,
  /// Bound without holes; runtime arguments are ignored.
  Constant,
  /// Bound with this many holes.
  Partial(usize),
}

/// One callable plus its statically bound arguments.
///
/// Nodes are never mutated; binding produces a new node.
#[derive(Debug, Clone)]
pub struct Node {
  callable: Arc<Callable>,
  bindings: Bindings,
}

impl Node {
  pub fn new(callable: Arc<Callable>) -> Self {
    Self {
      callable,
      bindings: Bindings::new(),
    }
  }

  /// A copy of this node sharing the callable, with different bindings.
  pub fn with_bindings(&self, bindings: Bindings) -> Self {
    Self {
      callable: Arc::clone(&self.callable),
      bindings,
    }
  }

  pub fn callable(&self) -> &Callable {
    &self.callable
  }

  pub fn signature(&self) -> &Signature {
    self.callable.signature()
  }

  pub fn name(&self) -> &str {
    self.callable.name()
  }

  pub fn bindings(&self) -> &Bindings {
    &self.bindings
  }

  pub fn state(&self) -> BindState {
    if self.bindings.is_empty() {
      return BindState::Unbound;
    }
    match self.bindings.hole_count() {
      0 => BindState::Constant,
      holes => BindState::Partial(holes),
    }
  }
}
