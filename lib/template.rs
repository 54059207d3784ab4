//! Structured source templates with typed placeholder fill.
//!
//! Placeholders use `${NAME}` syntax. Each binding carries its own escaping
//! rule, so configuration values with quotes, backslashes, or newlines can
//! never break out of the generated source.

use crate::error::{BuildError, BuildResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Compiled regex for `${NAME}` placeholder extraction.
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Z][A-Z0-9_]*)\}").expect("Invalid regex pattern"));

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A value bound to a placeholder, tagged with its escaping rule.
#[derive(Debug, Clone)]
pub enum Fill {
    /// Inserted verbatim. For fragments that are already valid source.
    Raw(String),
    /// Rendered as a quoted JavaScript string literal, fully escaped.
    JsString(String),
}

/// A source template over `${NAME}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    text: &'static str,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Fill {
    /// Render the binding into source text.
    fn render(&self) -> String {
        match self {
            Fill::Raw(s) => s.clone(),
            // JSON string literals are valid JS string literals.
            Fill::JsString(s) => serde_json::Value::String(s.clone()).to_string(),
        }
    }
}

impl Template {
    /// Wrap a static template string.
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Names of all placeholders appearing in the template.
    pub fn placeholders(&self) -> Vec<String> {
        PLACEHOLDER_REGEX
            .captures_iter(self.text)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    /// Substitute every placeholder with its binding.
    ///
    /// Fails on the first placeholder with no binding; unused bindings are
    /// allowed.
    pub fn fill(&self, bindings: &BTreeMap<&str, Fill>) -> BuildResult<String> {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0;

        for cap in PLACEHOLDER_REGEX.captures_iter(self.text) {
            let m = cap.get(0).ok_or_else(|| {
                BuildError::Generic("placeholder capture without match".to_string())
            })?;
            let name = &cap[1];

            let fill = bindings
                .get(name)
                .ok_or_else(|| BuildError::UndefinedPlaceholder(name.to_string()))?;

            out.push_str(&self.text[last..m.start()]);
            out.push_str(&fill.render());
            last = m.end();
        }

        out.push_str(&self.text[last..]);
        Ok(out)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
