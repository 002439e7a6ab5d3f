//! Reduce impacted components to one recommended regression level.

use crate::types::{ImpactedComponent, Level};

/// Highest level among product-impacting components, or `default_level`
/// when none was touched.
pub fn resolve(impacted: &[ImpactedComponent], default_level: Level) -> Level {
  impacted
    .iter()
    .filter(|c| c.product_impact)
    .map(|c| c.regression_level)
    .max_by_key(|level| level.ordinal())
    .unwrap_or(default_level)
}
