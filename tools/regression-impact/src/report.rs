//! Changed-file input parsing and result rendering for the CLI.

use std::fmt::Write;

use crate::config::OutputFormat;
use crate::types::ImpactResult;

/// One path per line; surrounding whitespace trimmed, blank lines dropped.
pub fn parse_changed_files(text: &str) -> Vec<String> {
  text
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}

/// Text report: recommended level, then one line per impacted component.
pub fn render_text(result: &ImpactResult) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "Recommended regression level: {}",
    result.recommended_regression_level
  );

  if result.impacted_components.is_empty() {
    out.push_str("Impacted components: (none matched)\n");
    return out;
  }

  out.push_str("Impacted components:\n");
  for c in &result.impacted_components {
    let impact = if c.product_impact { "product" } else { "non-product" };
    let _ = writeln!(
      out,
      "- {} ({}, level={}): {}",
      c.name,
      impact,
      c.regression_level,
      c.files.join(", ")
    );
  }
  out
}

pub fn render_json(result: &ImpactResult) -> Result<String, serde_json::Error> {
  let mut out = serde_json::to_string_pretty(result)?;
  out.push('\n');
  Ok(out)
}

pub fn render(result: &ImpactResult, format: OutputFormat) -> Result<String, serde_json::Error> {
  match format {
    OutputFormat::Text => Ok(render_text(result)),
    OutputFormat::Json => render_json(result),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{ImpactedComponent, Level};

  fn result(components: Vec<ImpactedComponent>, level: Level) -> ImpactResult {
    ImpactResult {
      changed_files: components.iter().flat_map(|c| c.files.clone()).collect(),
      impacted_components: components,
      recommended_regression_level: level,
      rules_path: "regression/component_map.json".into(),
    }
  }

  #[test]
  fn parse_changed_files_skips_blank_lines() {
    let files = parse_changed_files("app/app.py\n\n   \n  app/templates/x.html  \r\n");
    assert_eq!(files, vec!["app/app.py", "app/templates/x.html"]);
    assert!(parse_changed_files("").is_empty());
  }

  #[test]
  fn text_report_without_matches() {
    let out = render_text(&result(vec![], Level::Low));
    assert_eq!(
      out,
      "Recommended regression level: low\nImpacted components: (none matched)\n"
    );
  }

  #[test]
  fn text_report_lists_components() {
    let out = render_text(&result(
      vec![
        ImpactedComponent {
          description: "endpoints".into(),
          files: vec!["app/app.py".into()],
          name: "api".into(),
          product_impact: true,
          regression_level: Level::High,
        },
        ImpactedComponent {
          description: "suites".into(),
          files: vec!["tests/a.py".into(), "tests/b.py".into()],
          name: "tests".into(),
          product_impact: false,
          regression_level: Level::Low,
        },
      ],
      Level::High,
    ));
    assert_eq!(
      out,
      "Recommended regression level: high\n\
       Impacted components:\n\
       - api (product, level=high): app/app.py\n\
       - tests (non-product, level=low): tests/a.py, tests/b.py\n"
    );
  }

  #[test]
  fn json_report_has_sorted_keys() {
    let out = render(&result(vec![], Level::Medium), OutputFormat::Json).unwrap();
    let changed = out.find("\"changed_files\"").unwrap();
    let impacted = out.find("\"impacted_components\"").unwrap();
    let level = out.find("\"recommended_regression_level\"").unwrap();
    let rules = out.find("\"rules_path\"").unwrap();
    assert!(changed < impacted && impacted < level && level < rules);
    assert!(out.contains("\"medium\""));
    assert!(out.ends_with('\n'));
  }
}
