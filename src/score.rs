//! Score engine: ordered deduction rules over a metrics record.

use crate::config::Config;
use crate::types::{Deduction, MetricsRecord, Rule, ScoreResult};

const BASE_SCORE: i32 = 100;

/// Apply the deduction rules in their fixed order and clamp to [0, 100].
///
/// Rules fire independently and stack additively, so the order only affects
/// the `applied_deductions` listing, never the numeric result.
pub fn score(metrics: &MetricsRecord, config: &Config) -> ScoreResult {
  let mut applied = Vec::new();

  if metrics.function_count == 0 {
    applied.push(Deduction::new(Rule::NoFunctions));
  }
  if !metrics.has_module_docstring {
    applied.push(Deduction::new(Rule::MissingModuleDocstring));
  }
  if !metrics.uses_type_hints {
    applied.push(Deduction::new(Rule::MissingTypeHints));
  }
  if metrics.long_function_count > 0 {
    applied.push(Deduction::new(Rule::LongFunctions));
  }
  if metrics.total_lines > config.max_file_lines {
    applied.push(Deduction::new(Rule::FileTooLong));
  }

  let total: i32 = applied.iter().map(|d| i32::from(d.amount)).sum();
  ScoreResult {
    score: (BASE_SCORE - total).clamp(0, 100) as u8,
    applied_deductions: applied,
  }
}
