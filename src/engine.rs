//! Core orchestration: parse → extract → score → persist → report.

use std::fs;
use std::path::Path;

use chrono::Utc;

use crate::config::Config;
use crate::error::EngineError;
use crate::history::HistoryStore;
use crate::metrics;
use crate::parser;
use crate::score;
use crate::types::{AnalysisReport, HistoryEntry, HistoryOutcome};

/// One-shot analysis engine. Owns the thresholds and the history handle.
pub struct Engine {
  config: Config,
  store: HistoryStore,
}

impl Engine {
  pub fn new(config: Config, store: HistoryStore) -> Self {
    Self { config, store }
  }

  pub fn with_defaults(store: HistoryStore) -> Self {
    Self::new(Config::default(), store)
  }

  /// Analyze one Python source file.
  ///
  /// Fails before scoring on unreadable input or invalid syntax (nothing is
  /// written to history in either case). A history write failure is carried
  /// inside the report instead, so the run's metrics and score survive it.
  pub fn analyze(&self, path: &Path) -> Result<AnalysisReport, EngineError> {
    let source =
      fs::read_to_string(path).map_err(|e| EngineError::input_not_found(path, e))?;

    let module =
      parser::parse(&source).map_err(|e| EngineError::parse(path, e.to_string()))?;

    let metrics = metrics::extract(&module, &self.config);
    let result = score::score(&metrics, &self.config);
    tracing::debug!(path = %path.display(), score = result.score, "analysis complete");

    let filename = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());

    let entry = HistoryEntry {
      timestamp: Utc::now(),
      filename: filename.clone(),
      score: result.score,
    };

    let history = match self.store.record(&entry).and_then(|()| self.store.stats()) {
      Ok(stats) => HistoryOutcome::Recorded(stats),
      Err(e) => {
        tracing::warn!(error = %e, "history not updated");
        HistoryOutcome::Failed(e)
      }
    };

    Ok(AnalysisReport {
      filename,
      metrics,
      score: result,
      history,
    })
  }
}
