//! Deterministic quality scoring for single Python source files.
//!
//! Parses one file with tree-sitter, extracts structural metrics, applies
//! ordered deduction rules to produce a bounded 0-100 score, and appends the
//! outcome to a durable JSON history log with aggregate stats.
//!
//! No AI, no DB, no network; pure computation + local file persistence.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod metrics;
pub mod parser;
pub mod render;
pub mod score;
pub mod types;

pub use config::Config;
pub use engine::Engine;
pub use error::EngineError;
pub use history::HistoryStore;
pub use types::{
  AnalysisReport, HistoryEntry, HistoryOutcome, HistoryStats, MetricsRecord, ScoreResult,
};
