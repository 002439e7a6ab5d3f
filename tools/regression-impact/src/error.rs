//! Structured error types for rule loading.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong before matching starts. Fatal to the
/// analysis call; no partial result is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("unsupported schema_version: {found}")]
  UnsupportedSchema { found: String },

  #[error("components[{index}]: missing required field `{field}`")]
  MissingField { index: usize, field: String },

  #[error("{field}: invalid level {value:?} (expected low|medium|high)")]
  InvalidLevel { field: String, value: String },

  #[error("component {component:?}: invalid pattern {pattern:?}: {reason}")]
  InvalidPattern {
    component: String,
    pattern: String,
    reason: String,
  },
}

impl ConfigError {
  pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Read {
      path: path.into(),
      source,
    }
  }

  pub fn missing_field(index: usize, field: &str) -> Self {
    Self::MissingField {
      index,
      field: field.to_string(),
    }
  }

  pub fn invalid_level(field: impl Into<String>, value: &str) -> Self {
    Self::InvalidLevel {
      field: field.into(),
      value: value.to_string(),
    }
  }

  pub fn invalid_pattern(component: &str, pattern: &str, reason: impl Into<String>) -> Self {
    Self::InvalidPattern {
      component: component.to_string(),
      pattern: pattern.to_string(),
      reason: reason.into(),
    }
  }
}
