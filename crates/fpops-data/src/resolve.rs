//! Turning pipeline definitions into executable operations.

use std::collections::BTreeMap;

use fpops_config::{FieldDef, PipelineDef, StageDef};
use fpops_core::{Operation, pipe};
use serde_json::Value;
use tracing::{info, instrument};

use crate::build::{Field, Schema, build};
use crate::error::{ResolveError, kind};
use crate::get::get;
use crate::merge::{Source, merge};
use crate::update::update;

/// Resolve a pipeline definition into a validated operation.
///
/// Each stage becomes one node; stages are chained in order and the chain is
/// validated before it is returned.
#[instrument(name = "pipeline_resolve", skip(def), fields(pipeline = %def.name))]
pub fn resolve_pipeline(def: &PipelineDef) -> Result<Operation, ResolveError> {
  let stages = def
    .stages
    .iter()
    .map(|stage| resolve_stage(&def.name, stage))
    .collect::<Result<Vec<_>, _>>()?;

  let op = pipe(stages).map_err(|_| ResolveError::EmptyPipeline {
    name: def.name.clone(),
  })?;

  op.validate().map_err(|source| ResolveError::Validation {
    name: def.name.clone(),
    source,
  })?;

  info!(stages = op.node_count(), "pipeline_resolved");
  Ok(op)
}

fn resolve_stage(pipeline: &str, stage: &StageDef) -> Result<Operation, ResolveError> {
  Ok(match stage {
    StageDef::Get { path, default } => get(path.clone(), default.clone()),
    StageDef::Update { values } => update(values.clone()),
    StageDef::Build { schema } => build(resolve_schema(pipeline, schema)?),
    StageDef::Merge { sources } => merge(resolve_sources(pipeline, sources)?),
  })
}

fn resolve_schema(
  pipeline: &str,
  schema: &BTreeMap<String, FieldDef>,
) -> Result<Schema, ResolveError> {
  schema
    .iter()
    .map(|(key, def)| Ok::<_, ResolveError>((key.clone(), resolve_field(pipeline, def)?)))
    .collect()
}

fn resolve_field(pipeline: &str, def: &FieldDef) -> Result<Field, ResolveError> {
  Ok(match def {
    FieldDef::Const { value } => Field::Value(value.clone()),
    FieldDef::Get { path, default } => Field::Op(get(path.clone(), default.clone())),
    FieldDef::Build { schema } => Field::Nested(resolve_schema(pipeline, schema)?),
    FieldDef::Update { values } => Field::Op(update(values.clone())),
    FieldDef::Merge { sources } => Field::Op(merge(resolve_sources(pipeline, sources)?)),
  })
}

fn resolve_sources(pipeline: &str, sources: &[FieldDef]) -> Result<Vec<Source>, ResolveError> {
  sources
    .iter()
    .enumerate()
    .map(|(index, def)| resolve_source(pipeline, index, def))
    .collect()
}

fn resolve_source(pipeline: &str, index: usize, def: &FieldDef) -> Result<Source, ResolveError> {
  Ok(match def {
    FieldDef::Const {
      value: Value::Object(map),
    } => Source::Static(map.clone()),
    FieldDef::Const { value } => {
      return Err(ResolveError::InvalidSource {
        name: pipeline.to_string(),
        index,
        found: kind(value),
      });
    }
    FieldDef::Get { path, default } => Source::Op(get(path.clone(), default.clone())),
    FieldDef::Build { schema } => Source::Fields(resolve_schema(pipeline, schema)?),
    FieldDef::Update { values } => Source::Op(update(values.clone())),
    FieldDef::Merge { sources } => Source::Op(merge(resolve_sources(pipeline, sources)?)),
  })
}
