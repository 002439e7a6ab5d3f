//! Runtime configuration for the CLI with sane defaults.

use std::path::PathBuf;

/// Rule document location when neither `--rules` nor the env var is given.
pub const DEFAULT_RULES_PATH: &str = "regression/component_map.json";

/// Environment variable that overrides the default rule path.
pub const RULES_PATH_ENV: &str = "REGRESSION_IMPACT_RULES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
  /// Human-readable report.
  #[default]
  Text,
  /// Pretty-printed ImpactResult.
  Json,
}

#[derive(Debug, Clone)]
pub struct Config {
  pub rules_path: PathBuf,
  pub format: OutputFormat,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      rules_path: PathBuf::from(DEFAULT_RULES_PATH),
      format: OutputFormat::default(),
    }
  }
}
