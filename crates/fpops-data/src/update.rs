use fpops_core::{Operation, Signature, operation};
use serde_json::{Map, Value};

use crate::error::{DataError, kind};

/// Shallow-update the input object with `values`.
///
/// Keys in `values` replace keys of the input. A non-object input fails the
/// operation with [`DataError::NotAnObject`].
pub fn update(values: Map<String, Value>) -> Operation {
  operation(Signature::of("update", ["data"]), move |args| {
    match args.into_iter().next().unwrap_or(Value::Null) {
      Value::Object(mut source) => {
        source.extend(values.clone());
        Ok(Value::Object(source))
      }
      other => Err(
        DataError::NotAnObject {
          operation: "update",
          found: kind(&other),
        }
        .into(),
      ),
    }
  })
}
