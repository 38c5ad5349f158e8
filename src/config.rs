//! Analysis thresholds with sane defaults.

/// Tunable thresholds for metric extraction and scoring.
#[derive(Debug, Clone)]
pub struct Config {
  /// A function spanning more than this many source lines counts as long.
  pub long_function_lines: usize,
  /// Files longer than this many lines are penalized.
  pub max_file_lines: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      long_function_lines: 20,
      max_file_lines: 300,
    }
  }
}
