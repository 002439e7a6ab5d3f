//! Regression Impact Engine — deterministic, rule-based change-impact analysis.
//!
//! Matches changed file paths against a declarative component map, collects
//! the files that touched each component, and recommends a regression
//! testing level (low / medium / high).
//!
//! No diffing, no DB, no network; pure computation over a list of paths.

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod level;
pub mod pattern;
pub mod report;
pub mod rules;
pub mod types;

use std::path::Path;

pub use cache::RuleCache;
pub use config::{Config, OutputFormat};
pub use error::ConfigError;
pub use types::{Component, ImpactResult, ImpactedComponent, Level, RuleSet};

use pattern::normalize_path;

/// Run the analysis against already-loaded rules (no I/O).
///
/// Blank entries in `changed_files` are dropped before matching.
pub fn analyze<S: AsRef<str>>(
  rules: &RuleSet,
  rules_path: &str,
  changed_files: &[S],
) -> ImpactResult {
  let changed: Vec<&str> = changed_files
    .iter()
    .map(|p| p.as_ref())
    .filter(|p| !p.trim().is_empty())
    .collect();

  let impacted = aggregate::aggregate(&rules.components, &changed);
  let recommended = level::resolve(&impacted, rules.default_level);

  tracing::debug!(
    changed = changed.len(),
    impacted = impacted.len(),
    recommended = %recommended,
    "analyzed change set"
  );

  ImpactResult {
    changed_files: changed.iter().map(|p| normalize_path(p)).collect(),
    impacted_components: impacted,
    recommended_regression_level: recommended,
    rules_path: normalize_path(rules_path),
  }
}

/// Load the rule file and analyze `changed_files` against it.
///
/// Any `ConfigError` aborts before matching starts.
pub fn analyze_change_set<S: AsRef<str>>(
  rules_path: &Path,
  changed_files: &[S],
) -> Result<ImpactResult, ConfigError> {
  let _span = tracing::debug_span!("analyze_change_set", rules = %rules_path.display()).entered();
  let rules = rules::load(rules_path)?;
  Ok(analyze(&rules, &rules_path.to_string_lossy(), changed_files))
}
