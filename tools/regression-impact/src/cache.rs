//! Rule set cache for repeated analyses against the same rule file.
//!
//! Each lookup re-reads the file and compares a blake3 digest of its bytes,
//! so an edited rule file is always reparsed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::ConfigError;
use crate::rules;
use crate::types::{ImpactResult, RuleSet};

#[derive(Debug)]
struct CachedRules {
  digest: blake3::Hash,
  rules: Arc<RuleSet>,
}

#[derive(Debug, Default)]
pub struct RuleCache {
  entries: Mutex<HashMap<PathBuf, CachedRules>>,
}

impl RuleCache {
  pub fn new() -> Self {
    Self::default()
  }

  fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, CachedRules>> {
    // The map is only ever replaced wholesale per key, so a poisoned lock is still consistent.
    self.entries.lock().unwrap_or_else(|e| e.into_inner())
  }

  /// Load rules for `path`, reusing the cached set when the contents are unchanged.
  pub fn load(&self, path: &Path) -> Result<Arc<RuleSet>, ConfigError> {
    let bytes = std::fs::read(path).map_err(|e| ConfigError::read(path, e))?;
    let digest = blake3::hash(&bytes);

    if let Some(hit) = self.entries().get(path) {
      if hit.digest == digest {
        tracing::debug!(path = %path.display(), "rule cache hit");
        return Ok(Arc::clone(&hit.rules));
      }
    }

    let parsed = match rules::decode(path, bytes).and_then(|raw| rules::parse(&raw)) {
      Ok(r) => Arc::new(r),
      Err(e) => {
        self.invalidate(path);
        return Err(e);
      }
    };

    tracing::debug!(path = %path.display(), digest = %digest.to_hex(), "rule cache refresh");
    self.entries().insert(
      path.to_path_buf(),
      CachedRules {
        digest,
        rules: Arc::clone(&parsed),
      },
    );
    Ok(parsed)
  }

  /// Same contract as [`crate::analyze_change_set`], with cached rule loading.
  pub fn analyze_change_set<S: AsRef<str>>(
    &self,
    rules_path: &Path,
    changed_files: &[S],
  ) -> Result<ImpactResult, ConfigError> {
    let rules = self.load(rules_path)?;
    Ok(crate::analyze(&rules, &rules_path.to_string_lossy(), changed_files))
  }

  pub fn invalidate(&self, path: &Path) {
    self.entries().remove(path);
  }

  pub fn clear(&self) {
    self.entries().clear();
  }

  pub fn len(&self) -> usize {
    self.entries().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
