//! Core types for the quality engine (internal models + JSON contracts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Structural facts extracted from one parsed source unit.
///
/// Built once per analysis and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsRecord {
  /// Function and method definitions, top-level and nested.
  pub function_count: usize,
  /// Import statements of all forms.
  pub import_count: usize,
  /// True iff the first statement of the module is a single string literal.
  pub has_module_docstring: bool,
  /// True iff any parameter or return position carries a type annotation.
  pub uses_type_hints: bool,
  /// Functions spanning more than the configured line limit.
  pub long_function_count: usize,
  /// Lines in the source unit (a trailing newline adds no line).
  pub total_lines: usize,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Deduction rules, in their fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
  NoFunctions,
  MissingModuleDocstring,
  MissingTypeHints,
  LongFunctions,
  FileTooLong,
}

impl Rule {
  /// Points deducted when the rule fires.
  pub fn amount(self) -> u8 {
    match self {
      Self::NoFunctions => 30,
      Self::MissingModuleDocstring => 10,
      Self::MissingTypeHints => 10,
      Self::LongFunctions => 10,
      Self::FileTooLong => 10,
    }
  }

  /// Short human-readable reason for report rendering.
  pub fn explanation(self) -> &'static str {
    match self {
      Self::NoFunctions => "No function definitions found",
      Self::MissingModuleDocstring => "Module has no docstring",
      Self::MissingTypeHints => "No type hints on any function",
      Self::LongFunctions => "Contains functions over the line limit",
      Self::FileTooLong => "File exceeds the line limit",
    }
  }
}

/// One fired rule with the points it removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deduction {
  pub rule: Rule,
  pub amount: u8,
}

impl Deduction {
  pub fn new(rule: Rule) -> Self {
    Self {
      rule,
      amount: rule.amount(),
    }
  }
}

/// Outcome of scoring one metrics record.
///
/// `score` is always `clamp(100 - sum(amounts), 0, 100)`; the deduction
/// listing preserves rule evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
  pub score: u8,
  pub applied_deductions: Vec<Deduction>,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// One persisted analysis outcome. Append-only; never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub timestamp: DateTime<Utc>,
  pub filename: String,
  pub score: u8,
}

/// Aggregates over the full history log, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStats {
  pub total_analyses: u64,
  /// Mean score; 0.0 on an empty log.
  pub average_score: f64,
  /// Highest score seen; 0 on an empty log.
  pub best_score: u8,
}

impl HistoryStats {
  pub fn empty() -> Self {
    Self {
      total_analyses: 0,
      average_score: 0.0,
      best_score: 0,
    }
  }
}

// ---------------------------------------------------------------------------
// Analysis report
// ---------------------------------------------------------------------------

/// Whether this run's entry made it into the history log.
///
/// A failed write must not discard the run's metrics and score, but the
/// caller has to see that history was not updated.
#[derive(Debug)]
pub enum HistoryOutcome {
  Recorded(HistoryStats),
  Failed(EngineError),
}

/// Everything one analysis invocation produced.
#[derive(Debug)]
pub struct AnalysisReport {
  pub filename: String,
  pub metrics: MetricsRecord,
  pub score: ScoreResult,
  pub history: HistoryOutcome,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what --json emits)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
  pub total_analyses: u64,
  pub average_score: f64,
  pub best_score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
  pub filename: String,
  pub metrics: MetricsRecord,
  pub score: u8,
  pub applied_deductions: Vec<Deduction>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub stats: Option<StatsOutput>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub history_error: Option<String>,
}

impl From<&AnalysisReport> for ReportOutput {
  fn from(report: &AnalysisReport) -> Self {
    let (stats, history_error) = match &report.history {
      HistoryOutcome::Recorded(stats) => (
        Some(StatsOutput {
          total_analyses: stats.total_analyses,
          average_score: (stats.average_score * 100.0).round() / 100.0,
          best_score: stats.best_score,
        }),
        None,
      ),
      HistoryOutcome::Failed(e) => (None, Some(e.to_string())),
    };

    Self {
      filename: report.filename.clone(),
      metrics: report.metrics.clone(),
      score: report.score.score,
      applied_deductions: report.score.applied_deductions.clone(),
      stats,
      history_error,
    }
  }
}
