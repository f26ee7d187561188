use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fpops_config::PipelineDef;
use fpops_core::{Operation, Outcome};
use fpops_data::resolve_pipeline;

/// fpops - Compose data-shaping operations and run them as pipelines
#[derive(Parser)]
#[command(name = "fpops")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log filter, e.g. `debug` or `fpops_core=trace` (default: $RUST_LOG or info)
  #[arg(long, global = true)]
  log_level: Option<String>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a pipeline against a JSON payload read from stdin
  Run {
    /// Path to the pipeline file (JSON)
    pipeline_file: PathBuf,
  },

  /// Resolve and validate a pipeline without running it
  Validate {
    /// Path to the pipeline file (JSON)
    pipeline_file: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.log_level.as_deref());

  match cli.command {
    Some(Commands::Run { pipeline_file }) => run_pipeline(pipeline_file)?,
    Some(Commands::Validate { pipeline_file }) => validate_pipeline(&pipeline_file)?,
    None => {
      println!("fpops - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(log_level: Option<&str>) {
  let filter = match log_level {
    Some(level) => EnvFilter::new(level),
    None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn run_pipeline(pipeline_file: PathBuf) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_pipeline_async(pipeline_file).await })
}

async fn run_pipeline_async(pipeline_file: PathBuf) -> Result<()> {
  let content = tokio::fs::read_to_string(&pipeline_file)
    .await
    .with_context(|| format!("failed to read pipeline file: {}", pipeline_file.display()))?;
  let op = load_pipeline(&content, &pipeline_file)?;

  // Read payload from stdin
  let payload = read_payload_from_stdin()?;
  eprintln!("Payload: {}", payload);

  match op.execute(payload).await {
    Outcome::Success(value) => {
      println!("{}", serde_json::to_string_pretty(&value)?);
      Ok(())
    }
    Outcome::Failure(e) => bail!("pipeline execution failed: {e}"),
  }
}

fn validate_pipeline(pipeline_file: &Path) -> Result<()> {
  let content = std::fs::read_to_string(pipeline_file)
    .with_context(|| format!("failed to read pipeline file: {}", pipeline_file.display()))?;
  let op = load_pipeline(&content, pipeline_file)?;

  eprintln!("Pipeline is valid: {}", op.names().join(" >> "));
  Ok(())
}

fn load_pipeline(content: &str, pipeline_file: &Path) -> Result<Operation> {
  let def: PipelineDef = serde_json::from_str(content)
    .with_context(|| format!("failed to parse pipeline file: {}", pipeline_file.display()))?;

  eprintln!("Loaded pipeline: {}", def.name);

  let op = resolve_pipeline(&def).context("failed to resolve pipeline")?;
  eprintln!("Resolved pipeline with {} stages", op.node_count());
  Ok(op)
}

fn read_payload_from_stdin() -> Result<serde_json::Value> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    // No stdin pipe, use empty object
    Ok(serde_json::json!({}))
  } else {
    let mut input = String::new();
    io::stdin()
      .read_to_string(&mut input)
      .context("failed to read payload from stdin")?;

    if input.trim().is_empty() {
      Ok(serde_json::json!({}))
    } else {
      serde_json::from_str(&input).context("failed to parse payload JSON from stdin")
    }
  }
}
