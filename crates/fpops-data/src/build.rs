//! Object construction from a schema of fields.

use std::fmt;
use std::sync::Arc;

use fpops_core::{BoxError, Operation, Signature, async_operation};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::debug;

/// A plain function evaluated against the input.
pub type FieldFn = Arc<dyn Fn(&Value) -> Result<Value, BoxError> + Send + Sync>;

/// How one key of a built object gets its value.
#[derive(Clone)]
pub enum Field {
  /// Copied as is.
  Value(Value),
  /// Called with the input. An error yields `null`.
  Fn(FieldFn),
  /// Executed with the input. A failure yields `null`.
  Op(Operation),
  /// Built recursively from the input.
  Nested(Schema),
}

impl Field {
  pub fn func<F>(f: F) -> Self
  where
    F: Fn(&Value) -> Result<Value, BoxError> + Send + Sync + 'static,
  {
    Self::Fn(Arc::new(f))
  }
}

impl fmt::Debug for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Self::Fn(_) => f.write_str("Fn(..)"),
      Self::Op(op) => f.debug_tuple("Op").field(&op.names()).finish(),
      Self::Nested(schema) => f.debug_tuple("Nested").field(schema).finish(),
    }
  }
}

impl From<Value> for Field {
  fn from(value: Value) -> Self {
    Self::Value(value)
  }
}

impl From<Operation> for Field {
  fn from(op: Operation) -> Self {
    Self::Op(op)
  }
}

impl From<Schema> for Field {
  fn from(schema: Schema) -> Self {
    Self::Nested(schema)
  }
}

/// Ordered `key -> Field` entries describing an object.
#[derive(Debug, Clone, Default)]
pub struct Schema {
  fields: Vec<(String, Field)>,
}

impl Schema {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a field. A repeated key replaces the earlier value in the output.
  pub fn field(mut self, key: impl Into<String>, field: impl Into<Field>) -> Self {
    self.fields.push((key.into(), field.into()));
    self
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  /// Evaluate every field against `data`.
  ///
  /// Field failures never fail the whole object; they become `null`.
  pub fn evaluate<'a>(&'a self, data: &'a Value) -> BoxFuture<'a, Map<String, Value>> {
    async move {
      let mut out = Map::new();
      for (key, field) in &self.fields {
        let value = match field {
          Field::Value(value) => value.clone(),
          Field::Fn(f) => f(data).unwrap_or_else(|e| {
            debug!(field = %key, error = %e, "field function failed");
            Value::Null
          }),
          Field::Op(op) => op.execute(data.clone()).await.value_or_else(|e| {
            debug!(field = %key, error = %e, "field operation failed");
            Value::Null
          }),
          Field::Nested(schema) => Value::Object(schema.evaluate(data).await),
        };
        out.insert(key.clone(), value);
      }
      out
    }
    .boxed()
  }
}

impl<K: Into<String>, F: Into<Field>> FromIterator<(K, F)> for Schema {
  fn from_iter<I: IntoIterator<Item = (K, F)>>(iter: I) -> Self {
    iter
      .into_iter()
      .fold(Schema::new(), |schema, (key, field)| schema.field(key, field))
  }
}

/// Build a new object from `schema`, evaluated against the input.
///
/// ```ignore
/// let summary = build(
///   Schema::new()
///     .field("id", get("user_id", Value::Null))
///     .field("active", json!(true)),
/// );
/// ```
pub fn build(schema: Schema) -> Operation {
  let schema = Arc::new(schema);

  async_operation(Signature::of("build", ["data"]), move |args| {
    let schema = Arc::clone(&schema);
    async move {
      let data = args.into_iter().next().unwrap_or(Value::Null);
      Ok::<_, BoxError>(Value::Object(schema.evaluate(&data).await))
    }
  })
}
