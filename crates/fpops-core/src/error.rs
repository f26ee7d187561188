//! Error types for operation binding, validation, and execution.

use thiserror::Error;

/// Error type returned by wrapped callables.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors captured while executing an operation.
///
/// These never escape `execute`; they are carried inside
/// [`Outcome::Failure`](crate::Outcome::Failure).
#[derive(Debug, Error)]
pub enum OperationError {
  /// The wrapped callable returned an error.
  #[error("node '{node}' (#{index}) failed: {source}")]
  Invocation {
    node: String,
    index: usize,
    #[source]
    source: BoxError,
  },

  /// The wrapped callable panicked.
  #[error("node '{node}' (#{index}) panicked: {message}")]
  Panicked {
    node: String,
    index: usize,
    message: String,
  },

  /// The resolved arguments could not be applied to the node's signature.
  #[error("cannot bind arguments for node '{node}' (#{index}): {message}")]
  Binding {
    node: String,
    index: usize,
    message: String,
  },
}

impl OperationError {
  /// Name of the node that produced this error.
  pub fn node(&self) -> &str {
    match self {
      Self::Invocation { node, .. } | Self::Panicked { node, .. } | Self::Binding { node, .. } => {
        node
      }
    }
  }

  /// Position of the failing node in its chain.
  pub fn index(&self) -> usize {
    match self {
      Self::Invocation { index, .. }
      | Self::Panicked { index, .. }
      | Self::Binding { index, .. } => *index,
    }
  }
}

/// Errors raised by [`Operation::validate`](crate::Operation::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  /// A chain must contain at least one node.
  #[error("an operation needs at least one node")]
  Empty,

  /// An unbound node after the first cannot take the single upstream value.
  #[error(
    "node '{node}' (#{index}) receives the upstream value but accepts {accepted} parameter(s) with {required} required"
  )]
  UpstreamArity {
    node: String,
    index: usize,
    accepted: usize,
    required: usize,
  },

  /// Only the first node may carry more than one placeholder.
  #[error("node '{node}' (#{index}) has {count} placeholders; only the first node may have more than one")]
  MultiplePlaceholders {
    node: String,
    index: usize,
    count: usize,
  },

  /// Bound arguments do not fit the node's signature.
  #[error("bound arguments do not fit node '{node}' (#{index}): {message}")]
  Shape {
    node: String,
    index: usize,
    message: String,
  },
}

/// Errors mapping call arguments onto a declared signature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignatureError {
  #[error("{name}() takes {expected} positional argument(s) but {given} were given")]
  TooManyPositional {
    name: String,
    expected: usize,
    given: usize,
  },

  #[error("{name}() got an unexpected keyword argument '{keyword}'")]
  UnexpectedKeyword { name: String, keyword: String },

  #[error("{name}() missing required argument '{param}'")]
  MissingArgument { name: String, param: String },
}
