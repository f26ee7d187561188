//! Combining several object sources into one object.

use std::fmt;
use std::sync::Arc;

use fpops_core::{BoxError, Operation, Outcome, Signature, async_operation};
use serde_json::{Map, Value};
use tracing::debug;

use crate::build::Schema;

/// A plain function producing an object from the input.
pub type SourceFn = Arc<dyn Fn(&Value) -> Result<Value, BoxError> + Send + Sync>;

/// One input to [`merge`].
#[derive(Clone)]
pub enum Source {
  /// A fixed object.
  Static(Map<String, Value>),
  /// Executed with the input. Failures and non-object results are skipped.
  Op(Operation),
  /// Called with the input. An error fails the whole merge; a non-object
  /// result is skipped.
  Fn(SourceFn),
  /// Fields evaluated against the input, as [`build`](crate::build) does.
  Fields(Schema),
}

impl Source {
  pub fn func<F>(f: F) -> Self
  where
    F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
  {
    Self::Fn(Arc::new(f))
  }
}

impl fmt::Debug for Source {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Static(map) => f.debug_tuple("Static").field(map).finish(),
      Self::Op(op) => f.debug_tuple("Op").field(&op.names()).finish(),
      Self::Fn(_) => f.write_str("Fn(..)"),
      Self::Fields(schema) => f.debug_tuple("Fields").field(schema).finish(),
    }
  }
}

impl From<Map<String, Value>> for Source {
  fn from(map: Map<String, Value>) -> Self {
    Self::Static(map)
  }
}

impl From<Operation> for Source {
  fn from(op: Operation) -> Self {
    Self::Op(op)
  }
}

impl From<Schema> for Source {
  fn from(schema: Schema) -> Self {
    Self::Fields(schema)
  }
}

/// Merge the objects produced by `sources` into one.
///
/// Every source sees the same input. Later sources override earlier keys.
pub fn merge<I>(sources: I) -> Operation
where
  I: IntoIterator,
  I::Item: Into<Source>,
{
  let sources: Arc<Vec<Source>> = Arc::new(sources.into_iter().map(Into::into).collect());

  async_operation(Signature::of("merge", ["data"]), move |args| {
    let sources = Arc::clone(&sources);
    async move {
      let data = args.into_iter().next().unwrap_or(Value::Null);
      let mut out = Map::new();

      for (index, source) in sources.iter().enumerate() {
        let produced = match source {
          Source::Static(map) => Value::Object(map.clone()),
          Source::Op(op) => match op.execute(data.clone()).await {
            Outcome::Success(value) => value,
            Outcome::Failure(e) => {
              debug!(source = index, error = %e, "merge source failed, skipping");
              continue;
            }
          },
          Source::Fn(f) => f(&data)?,
          Source::Fields(schema) => Value::Object(schema.evaluate(&data).await),
        };

        match produced {
          Value::Object(map) => out.extend(map),
          other => debug!(source = index, found = %other, "merge source is not an object, skipping"),
        }
      }

      Ok::<_, BoxError>(Value::Object(out))
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Field, get};
  use fpops_core::operation;
  use serde_json::json;

  fn object(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      _ => Map::new(),
    }
  }

  #[tokio::test]
  async fn test_merge_static_later_wins() {
    let op = merge([object(json!({ "a": 1 })), object(json!({ "b": 2 })), object(json!({ "a": 3 }))]);
    let outcome = op.execute(Value::Null).await;
    assert_eq!(outcome.value_or(Value::Null), json!({ "a": 3, "b": 2 }));
  }

  #[tokio::test]
  async fn test_merge_operations_and_fields() {
    let data = json!({
      "user": {
        "name": "Lin",
        "profile": { "city": "Oslo" },
        "settings": { "theme": "dark" }
      }
    });

    let op = merge([
      Source::from(get("user.profile", Value::Null)),
      Source::from(get("user.settings", Value::Null)),
      Source::from(
        Schema::new()
          .field("name", get("user.name", Value::Null))
          .field("active", Field::Value(json!(true))),
      ),
    ]);

    let outcome = op.execute(data).await;
    assert_eq!(
      outcome.value_or(Value::Null),
      json!({ "city": "Oslo", "theme": "dark", "name": "Lin", "active": true })
    );
  }

  #[tokio::test]
  async fn test_merge_skips_failed_and_non_object_sources() {
    let failing = operation(Signature::of("explode", ["data"]), |_| Err("boom".into()));
    let op = merge([
      Source::from(failing),
      Source::from(get("count", Value::Null)),
      Source::from(object(json!({ "kept": true }))),
    ]);

    let outcome = op.execute(json!({ "count": 4 })).await;
    assert_eq!(outcome.value_or(Value::Null), json!({ "kept": true }));
  }

  #[tokio::test]
  async fn test_merge_functions() {
    let op = merge([
      Source::func(|d| Ok(json!({ "id": d["user_id"].clone() }))),
      Source::func(|d| {
        let count = d["items"].as_array().map(Vec::len).unwrap_or(0);
        Ok(json!({ "score": count * 10 }))
      }),
    ]);

    let outcome = op
      .execute(json!({ "user_id": "u1", "items": [1, 2, 3] }))
      .await;
    assert_eq!(outcome.value_or(Value::Null), json!({ "id": "u1", "score": 30 }));
  }

  #[tokio::test]
  async fn test_merge_function_error_fails() {
    let op = merge([
      Source::from(object(json!({ "a": 1 }))),
      Source::func(|_| Err("no data".into())),
    ]);

    let outcome = op.execute(json!({})).await;
    let err = outcome.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(err.contains("no data"), "unexpected error: {err}");
  }
}
