//! Load and validate the component-mapping rule document into a typed RuleSet.

use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;
use crate::pattern::PatternSet;
use crate::types::*;

/// The only rule document schema this engine understands.
pub const SCHEMA_VERSION: u64 = 1;

/// Read a rule file from disk and validate it.
pub fn load(path: &Path) -> Result<RuleSet, ConfigError> {
  let bytes = std::fs::read(path).map_err(|e| ConfigError::read(path, e))?;
  let rules = parse(&decode(path, bytes)?)?;
  tracing::debug!(
    path = %path.display(),
    components = rules.components.len(),
    default_level = %rules.default_level,
    "loaded rule set"
  );
  Ok(rules)
}

/// Rule files must be UTF-8; anything else is a read error for `path`.
pub(crate) fn decode(path: &Path, bytes: Vec<u8>) -> Result<String, ConfigError> {
  String::from_utf8(bytes)
    .map_err(|e| ConfigError::read(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Parse rule document text (JSON) and validate it.
pub fn parse(raw: &str) -> Result<RuleSet, ConfigError> {
  let doc: RuleDocument = serde_json::from_str(raw)?;
  validate(doc)
}

/// Validate a deserialized document. Nothing is constructed until the
/// schema version and default level check out.
pub fn validate(doc: RuleDocument) -> Result<RuleSet, ConfigError> {
  let schema_version = match &doc.schema_version {
    Some(v) if v.as_u64() == Some(SCHEMA_VERSION) => SCHEMA_VERSION,
    Some(v) => {
      return Err(ConfigError::UnsupportedSchema {
        found: v.to_string(),
      })
    }
    None => {
      return Err(ConfigError::UnsupportedSchema {
        found: "none".to_string(),
      })
    }
  };

  let default_level = match doc.default_level.as_deref() {
    Some(s) => Level::parse(s).ok_or_else(|| ConfigError::invalid_level("default_level", s))?,
    None => Level::default(),
  };

  let components = doc
    .components
    .into_iter()
    .enumerate()
    .map(|(index, raw)| validate_component(index, raw, default_level))
    .collect::<Result<Vec<_>, ConfigError>>()?;

  let mut seen = HashSet::new();
  for c in &components {
    if !seen.insert(c.name.as_str()) {
      tracing::warn!(component = %c.name, "duplicate component name; matches will merge");
    }
  }

  Ok(RuleSet {
    schema_version,
    default_level,
    components,
  })
}

fn validate_component(
  index: usize,
  raw: ComponentDocument,
  default_level: Level,
) -> Result<Component, ConfigError> {
  let name = raw
    .name
    .ok_or_else(|| ConfigError::missing_field(index, "name"))?;

  let regression_level = match raw.regression_level.as_deref() {
    Some(s) => Level::parse(s).ok_or_else(|| {
      ConfigError::invalid_level(format!("components[{}].regression_level", index), s)
    })?,
    None => default_level,
  };

  let compile = |patterns: &[String]| {
    PatternSet::compile(patterns)
      .map_err(|e| ConfigError::invalid_pattern(&name, e.pattern(), e.to_string()))
  };
  let paths = compile(&raw.paths)?;
  let exclude_paths = compile(&raw.exclude_paths)?;

  Ok(Component {
    description: raw.description.unwrap_or_default(),
    paths,
    exclude_paths,
    product_impact: raw.product_impact.unwrap_or(true),
    regression_level,
    name,
  })
}
