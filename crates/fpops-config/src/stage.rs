//! Stage and field definitions.
//!
//! # Examples
//!
//! ```json
//! { "type": "get", "path": "user.contact.email", "default": "unknown" }
//! { "type": "update", "values": { "source": "cli" } }
//! { "type": "build", "schema": {
//!     "id": { "type": "get", "path": "user_id" },
//!     "active": { "type": "const", "value": true }
//! } }
//! { "type": "merge", "sources": [
//!     { "type": "get", "path": "profile" },
//!     { "type": "const", "value": { "version": 2 } }
//! ] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One step of a pipeline. Each stage receives the previous stage's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageDef {
  /// Read a nested value by dotted path.
  Get {
    path: String,
    #[serde(default)]
    default: Value,
  },
  /// Shallow-update the input object.
  Update { values: Map<String, Value> },
  /// Build a new object from a schema evaluated against the input.
  Build { schema: BTreeMap<String, FieldDef> },
  /// Merge several object sources evaluated against the same input.
  Merge { sources: Vec<FieldDef> },
}

/// A value producer inside `build` schemas and `merge` sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDef {
  /// A fixed value.
  Const { value: Value },
  Get {
    path: String,
    #[serde(default)]
    default: Value,
  },
  /// A nested object built from its own schema.
  Build { schema: BTreeMap<String, FieldDef> },
  Update { values: Map<String, Value> },
  Merge { sources: Vec<FieldDef> },
}
