//! Core types for the regression impact engine (rule document + result contract).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pattern::{self, PatternSet};

// ---------------------------------------------------------------------------
// Level (total order)
// ---------------------------------------------------------------------------

/// Regression testing depth. Declaration order is the ordering: low < medium < high.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  #[default]
  Low,
  Medium,
  High,
}

impl Level {
  /// Strict parse of the lowercase rule-document spelling.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "low" => Some(Self::Low),
      "medium" => Some(Self::Medium),
      "high" => Some(Self::High),
      _ => None,
    }
  }

  pub fn ordinal(self) -> u8 {
    match self {
      Self::Low => 1,
      Self::Medium => 2,
      Self::High => 3,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ---------------------------------------------------------------------------
// Rule document (JSON contract — what the rule file contains)
// ---------------------------------------------------------------------------

/// Loosely-typed rule document. Every field is optional here so that
/// validation can report precise errors; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleDocument {
  #[serde(default)]
  pub schema_version: Option<serde_json::Value>,
  #[serde(default)]
  pub default_level: Option<String>,
  #[serde(default)]
  pub components: Vec<ComponentDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentDocument {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub paths: Vec<String>,
  #[serde(default)]
  pub exclude_paths: Vec<String>,
  #[serde(default)]
  pub product_impact: Option<bool>,
  #[serde(default)]
  pub regression_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Validated rule set
// ---------------------------------------------------------------------------

/// Validated rules, loaded once per analysis call.
#[derive(Debug, Clone)]
pub struct RuleSet {
  pub schema_version: u64,
  pub default_level: Level,
  pub components: Vec<Component>,
}

/// One logical component with compiled include/exclude patterns.
#[derive(Debug, Clone)]
pub struct Component {
  pub name: String,
  pub description: String,
  pub paths: PatternSet,
  pub exclude_paths: PatternSet,
  pub product_impact: bool,
  /// Resolved at load time; later changes to the default do not affect it.
  pub regression_level: Level,
}

impl Component {
  /// Does this component claim `path`? Exclusions win over inclusions.
  pub fn matches(&self, path: &str) -> bool {
    self.matches_normalized(&pattern::normalize_path(path))
  }

  /// Same as [`Component::matches`] for a path that is already normalized.
  /// Normalization is not idempotent (`././a`), so callers must not apply it twice.
  pub(crate) fn matches_normalized(&self, path: &str) -> bool {
    if !self.exclude_paths.is_empty() && self.exclude_paths.matches_normalized(path) {
      return false;
    }
    self.paths.matches_normalized(path)
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
//
// Fields are declared in key order so serialized output has sorted keys.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactedComponent {
  pub description: String,
  pub files: Vec<String>,
  pub name: String,
  pub product_impact: bool,
  pub regression_level: Level,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactResult {
  pub changed_files: Vec<String>,
  pub impacted_components: Vec<ImpactedComponent>,
  pub recommended_regression_level: Level,
  pub rules_path: String,
}

impl ImpactResult {
  pub fn component(&self, name: &str) -> Option<&ImpactedComponent> {
    self.impacted_components.iter().find(|c| c.name == name)
  }

  pub fn component_names(&self) -> Vec<&str> {
    self
      .impacted_components
      .iter()
      .map(|c| c.name.as_str())
      .collect()
  }
}
