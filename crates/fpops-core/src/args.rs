//! Argument containers: call-time extras and statically bound slots.
//!
//! [`Args`] holds concrete values supplied when a chain is invoked.
//! [`Bindings`] holds what a node was partially applied with; each position is
//! a [`Slot`], either a fixed value or a hole that the binder fills later.
//!
//! ```ignore
//! use fpops_core::{Bindings, PLACEHOLDER};
//!
//! // mul(_, 3)
//! let bound = Bindings::new().slot(PLACEHOLDER).arg(3);
//! ```

use std::collections::HashMap;

use serde_json::Value;

/// One bound argument position.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
  /// A value fixed at bind time.
  Fixed(Value),
  /// Filled when the chain runs: from call arguments on the first node, or
  /// from the upstream value on later nodes.
  Hole,
}

/// The shared "substitute here" marker.
pub const PLACEHOLDER: Slot = Slot::Hole;

impl Slot {
  pub fn is_hole(&self) -> bool {
    matches!(self, Self::Hole)
  }
}

impl From<Value> for Slot {
  fn from(value: Value) -> Self {
    Self::Fixed(value)
  }
}

/// Concrete arguments supplied at call time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
  pub positional: Vec<Value>,
  pub keyword: HashMap<String, Value>,
}

impl Args {
  pub fn new() -> Self {
    Self::default()
  }

  /// Arguments made of positional values only.
  pub fn positional<I, V>(values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
  {
    Self {
      positional: values.into_iter().map(Into::into).collect(),
      keyword: HashMap::new(),
    }
  }

  pub fn arg(mut self, value: impl Into<Value>) -> Self {
    self.positional.push(value.into());
    self
  }

  pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.keyword.insert(name.into(), value.into());
    self
  }

  pub fn is_empty(&self) -> bool {
    self.positional.is_empty() && self.keyword.is_empty()
  }
}

impl From<Value> for Args {
  /// A single value becomes the only positional argument.
  fn from(value: Value) -> Self {
    Self::new().arg(value)
  }
}

/// Arguments stored on a node by partial application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
  pub positional: Vec<Slot>,
  pub keyword: HashMap<String, Slot>,
}

impl Bindings {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn arg(self, value: impl Into<Value>) -> Self {
    self.slot(Slot::Fixed(value.into()))
  }

  pub fn hole(self) -> Self {
    self.slot(Slot::Hole)
  }

  pub fn slot(mut self, slot: Slot) -> Self {
    self.positional.push(slot);
    self
  }

  pub fn kwarg(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.kwslot(name, Slot::Fixed(value.into()))
  }

  pub fn kwarg_hole(self, name: impl Into<String>) -> Self {
    self.kwslot(name, Slot::Hole)
  }

  pub fn kwslot(mut self, name: impl Into<String>, slot: Slot) -> Self {
    self.keyword.insert(name.into(), slot);
    self
  }

  /// True when nothing has been bound.
  pub fn is_empty(&self) -> bool {
    self.positional.is_empty() && self.keyword.is_empty()
  }

  /// Number of holes across positional and keyword slots.
  pub fn hole_count(&self) -> usize {
    self.positional.iter().filter(|s| s.is_hole()).count()
      + self.keyword.values().filter(|s| s.is_hole()).count()
  }

  /// Convert to concrete arguments, or `None` if any hole remains.
  pub fn to_args(&self) -> Option<Args> {
    let positional = self
      .positional
      .iter()
      .map(|slot| match slot {
        Slot::Fixed(value) => Some(value.clone()),
        Slot::Hole => None,
      })
      .collect::<Option<Vec<_>>>()?;

    let keyword = self
      .keyword
      .iter()
      .map(|(name, slot)| match slot {
        Slot::Fixed(value) => Some((name.clone(), value.clone())),
        Slot::Hole => None,
      })
      .collect::<Option<HashMap<_, _>>>()?;

    Some(Args {
      positional,
      keyword,
    })
  }
}

impl From<Args> for Bindings {
  fn from(args: Args) -> Self {
    Self {
      positional: args.positional.into_iter().map(Slot::Fixed).collect(),
      keyword: args
        .keyword
        .into_iter()
        .map(|(name, value)| (name, Slot::Fixed(value)))
        .collect(),
    }
  }
}
