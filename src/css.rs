//! The CSS-subset engine behind the live preview and the editor buttons:
//! declaration extraction, the line-level syntax gate, and the formatter.
//!
//! This is not a CSS parser. One regex sweep picks up `property: value`
//! pairs anywhere in the text, properties outside the flexbox allow-list
//! are dropped, and the last occurrence of a property wins. Swapping in a
//! real parser would change which submissions are accepted.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Flexbox properties the preview container accepts from learner input,
/// in the order they are reported back.
pub const ALLOWED_PROPERTIES: [&str; 7] = [
  "display",
  "flex-direction",
  "justify-content",
  "align-items",
  "flex-wrap",
  "align-content",
  "gap",
];

/// Fixed container styles the learner builds on. `display` can be
/// overridden from input; the sizing cannot (it is not allow-listed).
const BASELINE: [(&str, &str); 3] = [("display", "flex"), ("width", "100%"), ("height", "350px")];

static DECLARATION_RE: OnceLock<Regex> = OnceLock::new();

/// `<identifier-with-hyphens> : <value up to `;` or end of line>`.
/// Case-insensitive so `DISPLAY: FLEX` still produces a match, which the
/// allow-list then drops; the sweep never errors on garbage.
fn declaration_re() -> &'static Regex {
  DECLARATION_RE
    .get_or_init(|| Regex::new(r"(?i)([a-z-]+)\s*:\s*([^;\n]+)").expect("valid declaration regex"))
}

/// A single accepted `property: value` declaration, wire-ready.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleDecl {
  pub property: String,
  pub value: String,
}

/// Accepted declarations from one extraction pass, keyed by property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppliedStyleSet {
  values: HashMap<&'static str, String>,
}

impl AppliedStyleSet {
  pub fn get(&self, property: &str) -> Option<&str> {
    self.values.get(property).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  fn insert(&mut self, property: &'static str, value: String) {
    self.values.insert(property, value);
  }

  /// Declarations in the fixed allow-list order, for stable output.
  pub fn declarations(&self) -> Vec<StyleDecl> {
    ALLOWED_PROPERTIES
      .iter()
      .filter_map(|p| {
        self.values.get(p).map(|v| StyleDecl {
          property: (*p).to_string(),
          value: v.clone(),
        })
      })
      .collect()
  }
}

/// Sweep raw editor text for `property: value` pairs. Properties are matched
/// exactly (lowercase, hyphenated) against the allow-list; repeats keep the
/// last value; a value containing a `:` is cut at the first one, mirroring
/// the editor's split-based handling. Malformed input simply yields an
/// empty set.
pub fn extract(css: &str) -> AppliedStyleSet {
  let mut set = AppliedStyleSet::default();
  for caps in declaration_re().captures_iter(css) {
    let candidate = &caps[1];
    if let Some(property) = ALLOWED_PROPERTIES.iter().copied().find(|p| *p == candidate) {
      let value = caps[2].split(':').next().unwrap_or("").trim().to_string();
      set.insert(property, value);
    }
  }
  set
}

/// Container styles for the live preview: the fixed baseline merged with
/// the learner's extracted declarations.
pub fn preview_declarations(css: &str) -> Vec<StyleDecl> {
  let set = extract(css);
  let mut out = Vec::with_capacity(BASELINE.len() + set.len());
  for (property, default_value) in BASELINE {
    let value = if property == "display" {
      set.get("display").unwrap_or(default_value)
    } else {
      default_value
    };
    out.push(StyleDecl { property: property.to_string(), value: value.to_string() });
  }
  for decl in set.declarations() {
    if decl.property != "display" {
      out.push(decl);
    }
  }
  out
}

/// Line-level sanity check run before a solution check: every non-blank
/// line must contain a `:`, `{` or `}`. Reports the first offending line
/// verbatim; the message is not localized since it quotes code.
pub fn validate_syntax(css: &str) -> Result<(), String> {
  for line in css.lines() {
    if line.trim().is_empty() {
      continue;
    }
    if !line.contains(':') && !line.contains('{') && !line.contains('}') {
      return Err(format!("Invalid CSS syntax: {}", line));
    }
  }
  Ok(())
}

/// Tidy editor text: trim every line, drop blank lines, and indent
/// declaration lines (those containing a `:`) by two spaces.
pub fn format_css(css: &str) -> String {
  css
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|line| {
      if line.contains(':') {
        format!("  {}", line)
      } else {
        line.to_string()
      }
    })
    .collect::<Vec<_>>()
    .join("\n")
}
