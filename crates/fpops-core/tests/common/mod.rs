//! Arithmetic operations shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fpops_core::{BoxError, Operation, Signature, async_operation, operation};
use serde_json::{Value, json};

pub fn int(value: &Value) -> Result<i64, BoxError> {
  value
    .as_i64()
    .ok_or_else(|| format!("expected integer, got {}", value).into())
}

pub fn add() -> Operation {
  async_operation(Signature::of("add", ["a", "b"]), |v| async move {
    let sum = int(&v[0])? + int(&v[1])?;
    Ok::<_, BoxError>(json!(sum))
  })
}

pub fn add_one() -> Operation {
  async_operation(Signature::of("add_one", ["a"]), |v| async move {
    let next = int(&v[0])? + 1;
    Ok::<_, BoxError>(json!(next))
  })
}

pub fn mul() -> Operation {
  async_operation(Signature::of("mul", ["x", "y"]), |v| async move {
    let product = int(&v[0])? * int(&v[1])?;
    Ok::<_, BoxError>(json!(product))
  })
}

pub fn sub() -> Operation {
  operation(Signature::of("sub", ["x", "y"]), |v| {
    Ok(json!(int(&v[0])? - int(&v[1])?))
  })
}

pub fn negate() -> Operation {
  operation(Signature::of("negate", ["x"]), |v| Ok(json!(-int(&v[0])?)))
}

pub fn div() -> Operation {
  operation(Signature::of("div", ["x", "y"]), |v| {
    let (x, y) = (int(&v[0])?, int(&v[1])?);
    if y == 0 {
      return Err("division by zero".into());
    }
    Ok(json!(x as f64 / y as f64))
  })
}

pub fn identity() -> Operation {
  async_operation(Signature::of("identity", ["value"]), |mut v| async move {
    Ok::<_, BoxError>(v.remove(0))
  })
}

/// Pass-through node that counts how often it runs.
pub fn counted(name: &str, counter: Arc<AtomicUsize>) -> Operation {
  operation(Signature::of(name, ["value"]), move |mut v| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(v.remove(0))
  })
}

/// Node that always fails.
pub fn fail() -> Operation {
  operation(Signature::of("fail", ["value"]), |_| Err("boom".into()))
}
