//! Build the per-component impact map for a batch of changed paths.

use std::collections::BTreeMap;

use crate::pattern::normalize_path;
use crate::types::{Component, ImpactedComponent};

/// Match every changed file against every component.
///
/// The map is keyed by component name: the first matching component for a
/// name snapshots its metadata, and every match appends the normalized path.
/// Repeated input paths are appended again. Returns entries sorted by name.
pub fn aggregate<S: AsRef<str>>(
  components: &[Component],
  changed_files: &[S],
) -> Vec<ImpactedComponent> {
  let mut impacted: BTreeMap<String, ImpactedComponent> = BTreeMap::new();

  for file in changed_files {
    let path = normalize_path(file.as_ref());
    for component in components.iter().filter(|c| c.matches_normalized(&path)) {
      impacted
        .entry(component.name.clone())
        .or_insert_with(|| ImpactedComponent {
          description: component.description.clone(),
          files: Vec::new(),
          name: component.name.clone(),
          product_impact: component.product_impact,
          regression_level: component.regression_level,
        })
        .files
        .push(path.clone());
    }
  }

  impacted.into_values().collect()
}
