//! Values available to a template render.

use std::collections::{HashMap, HashSet};

use panel_core::Result;
use serde::{Deserialize, Serialize};

/// Rendered in place of adviser details that are missing.
pub const NOT_AVAILABLE: &str = "[Not available]";

/// How a placeholder renders when the context has no value for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    /// `{{leadAdviser.email}}`, `{{2ndotherAdviser.biography}}`, ...
    AdviserDetail,
    /// Candidate, NDA, panel-date and derived values.
    Plain,
}

impl TokenCategory {
    pub fn of(token: &str) -> Self {
        match token.split_once('.') {
            Some((root, _)) if root.ends_with("Adviser") => Self::AdviserDetail,
            _ => Self::Plain,
        }
    }

    pub fn fallback(&self) -> &'static str {
        match self {
            Self::AdviserDetail => NOT_AVAILABLE,
            Self::Plain => "",
        }
    }
}

/// Named values plus the optional template sections that should be kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionContext {
    #[serde(default)]
    values: HashMap<String, String>,
    #[serde(default)]
    sections: HashSet<String>,
}

impl SubstitutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(token.into(), value.into());
        self
    }

    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(token, value);
        self
    }

    /// Flatten a record's scalar fields into the context, as `prefix.field`
    /// or, without a prefix, as bare `field` tokens. Nulls, arrays and nested
    /// objects are skipped.
    pub fn insert_record<T: Serialize>(&mut self, prefix: Option<&str>, record: &T) -> Result<&mut Self> {
        let value = serde_json::to_value(record)?;
        if let serde_json::Value::Object(map) = value {
            for (key, field) in map {
                let rendered = match field {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                let token = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key,
                };
                self.values.insert(token, rendered);
            }
        }
        Ok(self)
    }

    pub fn enable_section(&mut self, name: impl Into<String>) -> &mut Self {
        self.sections.insert(name.into());
        self
    }

    pub fn section_enabled(&self, name: &str) -> bool {
        self.sections.contains(name)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// Value for a token, applying the category fallback when the value is
    /// missing or empty.
    pub fn resolve(&self, token: &str) -> &str {
        match self.get(token) {
            Some(v) if !v.is_empty() => v,
            _ => TokenCategory::of(token).fallback(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
