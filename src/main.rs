//! Binary entrypoint: analyze one Python file and render the report.
//!
//! Exit codes: 0 on success, 1 on parse/input/persistence failure, 2 on
//! usage errors (non-Python input).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quality_engine::types::HistoryOutcome;
use quality_engine::{render, Config, Engine, HistoryStore};

#[derive(Parser)]
#[command(
  name = "quality-engine",
  version,
  about = "Deterministic quality scoring for Python source files"
)]
struct Cli {
  /// Python source file to analyze
  file: PathBuf,

  /// History log location
  #[arg(long, default_value = "history.json")]
  history: PathBuf,

  /// Emit the report as JSON instead of the terminal dashboard
  #[arg(long)]
  json: bool,
}

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();

  if cli.file.extension().is_none_or(|ext| ext != "py") {
    eprintln!("quality-engine: not a Python file: {}", cli.file.display());
    return ExitCode::from(2);
  }

  let engine = Engine::new(Config::default(), HistoryStore::new(&cli.history));
  let report = match engine.analyze(&cli.file) {
    Ok(report) => report,
    Err(e) => {
      eprintln!("quality-engine: {e}");
      return ExitCode::FAILURE;
    }
  };

  if cli.json {
    println!("{}", render::render_json(&report));
  } else {
    render::render_dashboard(&report);
  }

  // A failed history write still renders the run, but the invocation fails.
  match report.history {
    HistoryOutcome::Recorded(_) => ExitCode::SUCCESS,
    HistoryOutcome::Failed(_) => ExitCode::FAILURE,
  }
}
