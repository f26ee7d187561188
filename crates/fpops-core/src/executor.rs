//! Sequential chain execution.
//!
//! The executor walks the node list once. Each step resolves the node's
//! arguments, invokes it, and either advances with the returned value as the
//! next upstream value or stops with a failure. Nodes after a failure never
//! run.
//!
//! Start and completion events are `debug` since operations also run nested
//! inside other operations. Failures are `error`.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::args::Args;
use crate::binder;
use crate::error::OperationError;
use crate::node::{Fault, Node};
use crate::outcome::Outcome;

/// Executor state between steps.
enum State {
  /// About to run `nodes[index]`.
  Pending {
    index: usize,
    upstream: Option<Value>,
    extras: Args,
  },
  Done(Outcome),
}

/// Drives one invocation of a node chain.
pub(crate) struct Executor {
  execution_id: String,
  nodes: Vec<Arc<Node>>,
}

impl Executor {
  pub(crate) fn new(nodes: Vec<Arc<Node>>) -> Self {
    Self {
      execution_id: uuid::Uuid::new_v4().to_string(),
      nodes,
    }
  }

  /// Run the chain to completion.
  #[instrument(
    name = "operation_execute",
    skip(self, extras),
    fields(
      execution_id = %self.execution_id,
      nodes = self.nodes.len(),
    )
  )]
  pub(crate) async fn run(self, extras: Args) -> Outcome {
    debug!(
      execution_id = %self.execution_id,
      positional = extras.positional.len(),
      keyword = extras.keyword.len(),
      "operation_started"
    );

    let mut state = State::Pending {
      index: 0,
      upstream: None,
      extras,
    };

    let outcome = loop {
      state = match state {
        State::Pending {
          index,
          upstream,
          extras,
        } => self.step(index, upstream, extras).await,
        State::Done(outcome) => break outcome,
      };
    };

    match &outcome {
      Outcome::Success(value) => {
        debug!(execution_id = %self.execution_id, output = %value, "operation_completed");
      }
      Outcome::Failure(e) => {
        error!(execution_id = %self.execution_id, error = %e, "operation_failed");
      }
    }

    outcome
  }

  /// Run a single node and decide the next state.
  async fn step(&self, index: usize, upstream: Option<Value>, extras: Args) -> State {
    let node = &self.nodes[index];
    let name = node.name();

    let args = match binder::resolve(node, upstream, extras) {
      Ok(args) => args,
      Err(message) => return self.fail(binding_error(name, index, message)),
    };

    let values = match node.signature().apply(args) {
      Ok(values) => values,
      Err(e) => return self.fail(binding_error(name, index, e.to_string())),
    };

    debug!(node = %name, index, "node_started");

    match node.callable().invoke(values).await {
      Ok(value) => {
        debug!(node = %name, index, output = %value, "node_completed");
        let next = index + 1;
        if next >= self.nodes.len() {
          State::Done(Outcome::Success(value))
        } else {
          State::Pending {
            index: next,
            upstream: Some(value),
            extras: Args::new(),
          }
        }
      }
      Err(Fault::Failed(source)) => self.fail(OperationError::Invocation {
        node: name.to_string(),
        index,
        source,
      }),
      Err(Fault::Panicked(message)) => self.fail(OperationError::Panicked {
        node: name.to_string(),
        index,
        message,
      }),
    }
  }

  fn fail(&self, e: OperationError) -> State {
    error!(
      execution_id = %self.execution_id,
      node = %e.node(),
      index = e.index(),
      error = %e,
      "node_failed"
    );
    State::Done(Outcome::Failure(e))
  }
}

fn binding_error(node: &str, index: usize, message: String) -> OperationError {
  OperationError::Binding {
    node: node.to_string(),
    index,
    message,
  }
}
