use serde::{Deserialize, Serialize};

use crate::stage::StageDef;

/// A named chain of stages, executed in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDef {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub stages: Vec<StageDef>,
}
