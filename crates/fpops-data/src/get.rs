//! Nested value access by dotted path.

use fpops_core::{Operation, Signature, operation};
use serde_json::Value;

/// Read a nested value from the input by path.
///
/// Segments are separated by `.`; `items[0]` is the same as `items.0`.
/// Objects are indexed by key and arrays by non-negative integer segments.
/// A missing key, an out-of-range index, a step into a scalar, or a final
/// `null` all produce `default`. An empty path returns the input itself.
///
/// ```ignore
/// let email = get("user.contact.email", "unknown");
/// let outcome = email.execute(json!({ "user": {} })).await;
/// assert_eq!(outcome.value_or(Value::Null), json!("unknown"));
/// ```
pub fn get(path: impl Into<String>, default: impl Into<Value>) -> Operation {
  let path = path.into();
  let default = default.into();

  operation(Signature::of("get", ["data"]), move |args| {
    let data = args.into_iter().next().unwrap_or(Value::Null);
    if path.is_empty() {
      return Ok(data);
    }
    Ok(lookup(&data, &path).cloned().unwrap_or_else(|| default.clone()))
  })
}

/// Walk `path` through `data`, returning `None` for anything unreachable or
/// `null`.
pub fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
  if path.is_empty() {
    return Some(data);
  }

  let normalized = path.replace('[', ".").replace(']', "");
  normalized.split('.').try_fold(data, |current, segment| {
    let next = match current {
      Value::Object(map) => map.get(segment),
      Value::Array(items) if is_index(segment) => {
        segment.parse::<usize>().ok().and_then(|i| items.get(i))
      }
      _ => None,
    };
    next.filter(|value| !value.is_null())
  })
}

fn is_index(segment: &str) -> bool {
  !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
