use fpops_core::ValidationError;
use thiserror::Error;

/// Errors raised by the data operations themselves.
///
/// They surface as the source of an
/// [`OperationError::Invocation`](fpops_core::OperationError::Invocation).
#[derive(Debug, Error)]
pub enum DataError {
  /// The operation needs an object input.
  #[error("{operation} expects an object, got {found}")]
  NotAnObject {
    operation: &'static str,
    found: &'static str,
  },
}

/// Errors that can occur while turning a pipeline definition into an operation.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// A pipeline needs at least one stage.
  #[error("pipeline '{name}' has no stages")]
  EmptyPipeline { name: String },

  /// A constant merge source must be an object.
  #[error("pipeline '{name}': merge source #{index} is a constant {found}, expected an object")]
  InvalidSource {
    name: String,
    index: usize,
    found: &'static str,
  },

  /// The resolved chain failed validation.
  #[error("pipeline '{name}' is invalid: {source}")]
  Validation {
    name: String,
    #[source]
    source: ValidationError,
  },
}

/// JSON type name used in error messages.
pub(crate) fn kind(value: &serde_json::Value) -> &'static str {
  match value {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "boolean",
    serde_json::Value::Number(_) => "number",
    serde_json::Value::String(_) => "string",
    serde_json::Value::Array(_) => "array",
    serde_json::Value::Object(_) => "object",
  }
}
