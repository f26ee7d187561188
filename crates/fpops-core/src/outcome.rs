//! The success/failure container returned by every execution.

use serde_json::Value;

use crate::error::OperationError;

/// Result of executing an [`Operation`](crate::Operation).
///
/// Exactly one variant is active. Nothing on `Outcome` panics, so callers can
/// always inspect a failed chain as an ordinary value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = Value, E = OperationError> {
  Success(T),
  Failure(E),
}

impl<T, E> Outcome<T, E> {
  pub fn is_ok(&self) -> bool {
    matches!(self, Self::Success(_))
  }

  pub fn is_err(&self) -> bool {
    !self.is_ok()
  }

  /// Return the held value, or `fallback` on failure.
  pub fn value_or(self, fallback: T) -> T {
    match self {
      Self::Success(value) => value,
      Self::Failure(_) => fallback,
    }
  }

  /// Return the held value, or compute one from the error.
  pub fn value_or_else(self, f: impl FnOnce(E) -> T) -> T {
    match self {
      Self::Success(value) => value,
      Self::Failure(error) => f(error),
    }
  }

  pub fn ok(self) -> Option<T> {
    match self {
      Self::Success(value) => Some(value),
      Self::Failure(_) => None,
    }
  }

  pub fn err(self) -> Option<E> {
    match self {
      Self::Success(_) => None,
      Self::Failure(error) => Some(error),
    }
  }

  pub fn as_ref(&self) -> Outcome<&T, &E> {
    match self {
      Self::Success(value) => Outcome::Success(value),
      Self::Failure(error) => Outcome::Failure(error),
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
    match self {
      Self::Success(value) => Outcome::Success(f(value)),
      Self::Failure(error) => Outcome::Failure(error),
    }
  }

  pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
    match self {
      Self::Success(value) => Outcome::Success(value),
      Self::Failure(error) => Outcome::Failure(f(error)),
    }
  }

  pub fn into_result(self) -> Result<T, E> {
    self.into()
  }
}

impl<T: Default, E> Outcome<T, E> {
  pub fn value_or_default(self) -> T {
    self.value_or_else(|_| T::default())
  }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
  fn from(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Self::Success(value),
      Err(error) => Self::Failure(error),
    }
  }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
  fn from(outcome: Outcome<T, E>) -> Self {
    match outcome {
      Outcome::Success(value) => Ok(value),
      Outcome::Failure(error) => Err(error),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn failure() -> Outcome {
    Outcome::Failure(OperationError::Binding {
      node: "add".to_string(),
      index: 0,
      message: "missing".to_string(),
    })
  }

  #[test]
  fn test_success_value_or() {
    let outcome: Outcome = Outcome::Success(json!(4));
    assert!(outcome.is_ok());
    assert_eq!(outcome.value_or(Value::Null), json!(4));
  }

  #[test]
  fn test_failure_value_or_returns_fallback() {
    let outcome = failure();
    assert!(outcome.is_err());
    assert_eq!(outcome.value_or(Value::Null), Value::Null);
    assert_eq!(failure().value_or(json!("fallback")), json!("fallback"));
  }

  #[test]
  fn test_failure_keeps_error() {
    let error = failure().err().unwrap();
    assert_eq!(error.node(), "add");
    assert_eq!(error.index(), 0);
  }

  #[test]
  fn test_outcomes_compare_by_value() {
    let success: Outcome<i64, String> = Outcome::Success(3);
    assert_eq!(success.clone(), Outcome::Success(3));
    assert_ne!(success, Outcome::Failure("boom".to_string()));
    assert_eq!(
      Outcome::<i64, String>::from(Err("boom".to_string())),
      Outcome::Failure("boom".to_string())
    );
  }

  #[test]
  fn test_result_conversions() {
    let outcome: Outcome<i64, String> = Ok(3).into();
    assert_eq!(outcome.map(|v| v * 2).into_result(), Ok(6));

    let outcome: Outcome<i64, String> = Err("boom".to_string()).into();
    assert_eq!(outcome.value_or_default(), 0);
  }
}
