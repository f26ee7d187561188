//! Parameter metadata declared when a callable is wrapped.
//!
//! The engine never inspects closures at run time. A [`Signature`] records the
//! parameter names (and optional defaults) once, and is used both by
//! validation and by the final argument-to-parameter mapping.

use std::collections::HashSet;

use serde_json::Value;

use crate::args::Args;
use crate::error::SignatureError;

/// A declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
  pub name: String,
  pub default: Option<Value>,
}

impl Param {
  pub fn required(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      default: None,
    }
  }

  pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
    Self {
      name: name.into(),
      default: Some(default.into()),
    }
  }

  pub fn is_required(&self) -> bool {
    self.default.is_none()
  }
}

/// Name and parameter list of a wrapped callable.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
  pub name: String,
  pub params: Vec<Param>,
}

impl Signature {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      params: Vec::new(),
    }
  }

  /// Signature with required parameters only.
  pub fn of<I, S>(name: impl Into<String>, params: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name: name.into(),
      params: params.into_iter().map(Param::required).collect(),
    }
  }

  pub fn param(mut self, name: impl Into<String>) -> Self {
    self.params.push(Param::required(name));
    self
  }

  pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
    self.params.push(Param::optional(name, default));
    self
  }

  pub fn arity(&self) -> usize {
    self.params.len()
  }

  pub fn required_count(&self) -> usize {
    self.params.iter().filter(|p| p.is_required()).count()
  }

  /// Whether a call with exactly one positional argument can succeed.
  pub fn accepts_single(&self) -> bool {
    self.arity() >= 1 && self.required_count() <= 1
  }

  fn has_param(&self, name: &str) -> bool {
    self.params.iter().any(|p| p.name == name)
  }

  /// Check that `positional` values and the named keywords fit this signature.
  ///
  /// With `complete` set, every required parameter must also be covered.
  pub fn check_shape<'a>(
    &self,
    positional: usize,
    keywords: impl IntoIterator<Item = &'a str>,
    complete: bool,
  ) -> Result<(), SignatureError> {
    let keywords: HashSet<&str> = keywords.into_iter().collect();

    if let Some(keyword) = keywords.iter().find(|k| !self.has_param(k)) {
      return Err(SignatureError::UnexpectedKeyword {
        name: self.name.clone(),
        keyword: keyword.to_string(),
      });
    }

    let open = self.arity() - keywords.len();
    if positional > open {
      return Err(SignatureError::TooManyPositional {
        name: self.name.clone(),
        expected: open,
        given: positional,
      });
    }

    if complete {
      let mut remaining = positional;
      for param in &self.params {
        if keywords.contains(param.name.as_str()) {
          continue;
        }
        if remaining > 0 {
          remaining -= 1;
        } else if param.is_required() {
          return Err(SignatureError::MissingArgument {
            name: self.name.clone(),
            param: param.name.clone(),
          });
        }
      }
    }

    Ok(())
  }

  /// Map final call arguments onto the parameter list, in declaration order.
  ///
  /// Keywords claim their parameters first; positional values then fill the
  /// remaining parameters left to right; defaults fill whatever is left.
  pub fn apply(&self, mut args: Args) -> Result<Vec<Value>, SignatureError> {
    self.check_shape(
      args.positional.len(),
      args.keyword.keys().map(String::as_str),
      true,
    )?;

    let mut positional = args.positional.into_iter();
    let mut values = Vec::with_capacity(self.arity());

    for param in &self.params {
      let value = match args.keyword.remove(&param.name) {
        Some(value) => value,
        None => match positional.next() {
          Some(value) => value,
          None => param
            .default
            .clone()
            .ok_or_else(|| SignatureError::MissingArgument {
              name: self.name.clone(),
              param: param.name.clone(),
            })?,
        },
      };
      values.push(value);
    }

    Ok(values)
  }
}
