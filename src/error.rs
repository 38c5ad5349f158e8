//! Structured error types for the analysis engine.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("input: {}: {source}", .path.display())]
  InputNotFound {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("parse: {}: {reason}", .path.display())]
  Parse { path: PathBuf, reason: String },

  #[error("persistence: {}: {reason}", .path.display())]
  Persistence { path: PathBuf, reason: String },
}

impl EngineError {
  pub fn input_not_found(path: &Path, source: std::io::Error) -> Self {
    Self::InputNotFound {
      path: path.to_path_buf(),
      source,
    }
  }

  pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
    Self::Parse {
      path: path.to_path_buf(),
      reason: reason.into(),
    }
  }

  pub fn persistence(path: &Path, reason: impl Into<String>) -> Self {
    Self::Persistence {
      path: path.to_path_buf(),
      reason: reason.into(),
    }
  }
}
