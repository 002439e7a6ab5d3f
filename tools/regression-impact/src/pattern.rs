//! Path normalization and right-anchored, segment-wise glob matching.
//!
//! A pattern is split on `/` and each segment is matched against the
//! corresponding trailing segment of the path, so `*.html` matches
//! `app/templates/dashboard.html` and `templates/*.html` matches it too.
//! A pattern starting with `/` must match an absolute path of the same depth.
//! There is no recursive wildcard: `**` behaves like `*` inside one segment.
//! Empty and `.` segments are ignored on both sides.

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;

/// Normalize a changed path for matching and reporting:
/// - backslash -> forward slash
/// - strip ONE leading `./` (`././a` becomes `./a`)
///
/// No `..` resolution, no case folding, no repeated-slash collapsing.
pub fn normalize_path(p: &str) -> String {
  let s = p.replace('\\', "/");
  match s.strip_prefix("./") {
    Some(rest) => rest.to_string(),
    None => s,
  }
}

/// `/`-separated segments of a path or pattern, skipping empty and `.` segments.
fn segments(s: &str) -> impl Iterator<Item = &str> {
  s.split('/').filter(|seg| !seg.is_empty() && *seg != ".")
}

#[derive(Debug, Error)]
pub enum PatternError {
  #[error("empty pattern")]
  Empty { pattern: String },

  #[error("{source}")]
  Glob {
    pattern: String,
    #[source]
    source: globset::Error,
  },
}

impl PatternError {
  pub fn pattern(&self) -> &str {
    match self {
      Self::Empty { pattern } | Self::Glob { pattern, .. } => pattern,
    }
  }
}

/// Rewrite one pattern segment into globset syntax with our pinned rules:
/// runs of `*` collapse to one, braces are literal, an unclosed `[` is literal.
/// Closed character classes pass through (`[!..]` and `[^..]` both negate).
fn translate_segment(segment: &str) -> String {
  let mut out = String::with_capacity(segment.len() + 4);
  let mut in_class = false;
  // Byte offsets of the open `[` in `segment` and in `out`.
  let mut class_open = (0usize, 0usize);
  // Just after `[`, where `!`/`^` negates and `]` is literal.
  let mut class_start = false;
  // Characters seen inside the current class, not counting a leading negation.
  let mut class_len = 0usize;
  let mut prev_star = false;

  for (i, ch) in segment.char_indices() {
    if in_class {
      out.push(ch);
      let negation = class_start && (ch == '!' || ch == '^');
      class_start = false;
      if negation {
        continue;
      }
      if ch == ']' && class_len > 0 {
        in_class = false;
      } else {
        class_len += 1;
      }
      continue;
    }

    match ch {
      '*' if prev_star => continue,
      '*' => out.push('*'),
      '[' => {
        in_class = true;
        class_start = true;
        class_len = 0;
        class_open = (i, out.len());
        out.push('[');
      }
      '{' => out.push_str("[{]"),
      '}' => out.push_str("[}]"),
      _ => out.push(ch),
    }
    prev_star = ch == '*';
  }

  if in_class {
    let (seg_at, out_at) = class_open;
    out.truncate(out_at);
    out.push_str("[[]");
    out.push_str(&translate_segment(&segment[seg_at + 1..]));
  }
  out
}

/// One compiled glob pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
  anchored: bool,
  segments: Vec<GlobMatcher>,
}

impl PathPattern {
  pub fn new(source: &str) -> Result<Self, PatternError> {
    let anchored = source.starts_with('/');
    let segments = segments(source)
      .map(|seg| {
        GlobBuilder::new(&translate_segment(seg))
          .literal_separator(true)
          .backslash_escape(false)
          .build()
          .map(|g| g.compile_matcher())
          .map_err(|e| PatternError::Glob {
            pattern: source.to_string(),
            source: e,
          })
      })
      .collect::<Result<Vec<_>, _>>()?;

    if segments.is_empty() {
      return Err(PatternError::Empty {
        pattern: source.to_string(),
      });
    }

    Ok(Self {
      anchored,
      segments,
    })
  }

  /// Match an already-normalized path.
  pub fn matches_normalized(&self, path: &str) -> bool {
    let parts: Vec<&str> = segments(path).collect();
    if self.anchored {
      if !path.starts_with('/') || parts.len() != self.segments.len() {
        return false;
      }
    } else if parts.len() < self.segments.len() {
      return false;
    }

    self
      .segments
      .iter()
      .rev()
      .zip(parts.iter().rev())
      .all(|(glob, part)| glob.is_match(part))
  }
}

/// Ordered set of patterns; matches if ANY pattern matches. Empty never matches.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
  patterns: Vec<PathPattern>,
}

impl PatternSet {
  pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self, PatternError> {
    let patterns = sources
      .iter()
      .map(|s| PathPattern::new(s.as_ref()))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { patterns })
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Normalize `path` and test it against every pattern.
  pub fn matches(&self, path: &str) -> bool {
    self.matches_normalized(&normalize_path(path))
  }

  pub fn matches_normalized(&self, path: &str) -> bool {
    self.patterns.iter().any(|p| p.matches_normalized(path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(patterns: &[&str]) -> PatternSet {
    PatternSet::compile(patterns).unwrap()
  }

  #[test]
  fn normalize_path_basics() {
    assert_eq!(normalize_path("app\\templates\\x.html"), "app/templates/x.html");
    assert_eq!(normalize_path("./app/app.py"), "app/app.py");
    assert_eq!(normalize_path(".\\app\\app.py"), "app/app.py");
    assert_eq!(normalize_path("App/App.py"), "App/App.py");
  }

  #[test]
  fn normalize_strips_only_first_dot_slash() {
    assert_eq!(normalize_path("././a.py"), "./a.py");
    assert_eq!(normalize_path(".github/ci.yml"), ".github/ci.yml");
    assert_eq!(normalize_path("../a.py"), "../a.py");
  }

  #[test]
  fn single_segment_pattern_is_right_anchored() {
    let s = set(&["*.html"]);
    assert!(s.matches("app/templates/dashboard.html"));
    assert!(s.matches("index.html"));
    assert!(!s.matches("app/templates/dashboard.html.bak"));
  }

  #[test]
  fn multi_segment_pattern_matches_suffix() {
    let s = set(&["app/templates/*.html"]);
    assert!(s.matches("app/templates/dashboard.html"));
    assert!(s.matches("repo/app/templates/dashboard.html"));
    assert!(!s.matches("templates/dashboard.html"));
    assert!(!s.matches("app/templates/partials/nav.html"));
  }

  #[test]
  fn star_does_not_cross_segments() {
    let s = set(&["app/*"]);
    assert!(s.matches("app/app.py"));
    assert!(!s.matches("app/templates/x.html"));
  }

  #[test]
  fn double_star_is_not_recursive() {
    let s = set(&["app/**.py"]);
    assert!(s.matches("app/app.py"));
    assert!(!s.matches("app/sub/app.py"));
    assert!(set(&["**"]).matches("anything/at/all"));
  }

  #[test]
  fn question_mark_and_classes() {
    assert!(set(&["v?.txt"]).matches("docs/v1.txt"));
    assert!(!set(&["v?.txt"]).matches("docs/v10.txt"));
    assert!(set(&["test_[ab].py"]).matches("tests/test_a.py"));
    assert!(!set(&["test_[ab].py"]).matches("tests/test_c.py"));
    assert!(set(&["test_[!ab].py"]).matches("tests/test_c.py"));
    assert!(!set(&["test_[!ab].py"]).matches("tests/test_a.py"));
  }

  #[test]
  fn braces_are_literal() {
    let s = set(&["{a,b}.txt"]);
    assert!(s.matches("{a,b}.txt"));
    assert!(!s.matches("a.txt"));
  }

  #[test]
  fn leading_dot_files_match_star() {
    assert!(set(&["*.yml"]).matches(".github/workflows/.ci.yml"));
  }

  #[test]
  fn matching_is_case_sensitive() {
    assert!(!set(&["*.HTML"]).matches("app/index.html"));
  }

  #[test]
  fn absolute_pattern_is_fully_anchored() {
    let s = set(&["/app/*.py"]);
    assert!(s.matches("/app/app.py"));
    assert!(!s.matches("app/app.py"));
    assert!(!s.matches("/repo/app/app.py"));
  }

  #[test]
  fn pattern_longer_than_path_never_matches() {
    assert!(!set(&["a/b/c.py"]).matches("b/c.py"));
  }

  #[test]
  fn empty_set_never_matches() {
    let s = PatternSet::default();
    assert!(s.is_empty());
    assert!(!s.matches("app/app.py"));
    assert!(!s.matches(""));
  }

  #[test]
  fn any_pattern_in_set_matches() {
    let s = set(&["*.md", "docs/*"]);
    assert!(s.matches("README.md"));
    assert!(s.matches("docs/guide.txt"));
    assert!(!s.matches("src/lib.rs"));
  }

  #[test]
  fn backslash_paths_are_normalized_before_matching() {
    assert!(set(&["app/templates/*.html"]).matches("app\\templates\\dashboard.html"));
  }

  #[test]
  fn empty_pattern_is_rejected() {
    let err = PathPattern::new("").unwrap_err();
    assert_eq!(err.pattern(), "");
    assert!(matches!(err, PatternError::Empty { .. }));
    assert!(PathPattern::new("//").is_err());
  }

  #[test]
  fn unclosed_class_is_literal() {
    let s = set(&["app/[ab.py"]);
    assert!(s.matches("app/[ab.py"));
    assert!(!s.matches("app/a.py"));
    assert!(set(&["[!]"]).matches("x/[!]"));
  }

  #[test]
  fn caret_class_negates() {
    assert!(set(&["test_[^ab].py"]).matches("tests/test_c.py"));
    assert!(!set(&["test_[^ab].py"]).matches("tests/test_a.py"));
  }

  #[test]
  fn dot_segments_are_ignored_when_matching() {
    assert!(set(&["app/app.py"]).matches("app/./app.py"));
    assert!(!set(&["*/x.py"]).matches("././x.py"));
    assert!(set(&["x.py"]).matches("././x.py"));
    assert!(set(&["app/./*.py"]).matches("app/app.py"));
  }

  #[test]
  fn translate_segment_rules() {
    assert_eq!(translate_segment("a**b"), "a*b");
    assert_eq!(translate_segment("{x}"), "[{]x[}]");
    assert_eq!(translate_segment("[*{]"), "[*{]");
    assert_eq!(translate_segment("[]a]*"), "[]a]*");
    assert_eq!(translate_segment("[!]a]"), "[!]a]");
    assert_eq!(translate_segment("[ab.py"), "[[]ab.py");
    assert_eq!(translate_segment("[!]"), "[[]!]");
    assert_eq!(translate_segment("x**[*{"), "x*[[]*[{]");
  }
}
