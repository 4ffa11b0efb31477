//! Keyed style table with built-in defaults
//!
//! Older format generations only persisted the values a user changed, so a
//! freshly created document starts with an empty table and is seeded from the
//! defaults before those deltas are applied. Modern documents persist the
//! complete table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    /// Numeric value (spatium-relative lengths, font sizes, ...).
    Number(f64),
    /// Boolean switch.
    Bool(bool),
    /// Free-form text (font families, formats).
    Text(String),
}

/// Style table for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    values: BTreeMap<String, StyleValue>,
}

/// Built-in default style values.
fn default_values() -> BTreeMap<String, StyleValue> {
    let mut values = BTreeMap::new();
    values.insert("spatium".into(), StyleValue::Number(1.75));
    values.insert("staffLineWidth".into(), StyleValue::Number(0.11));
    values.insert("barWidth".into(), StyleValue::Number(0.18));
    values.insert("measureSpacing".into(), StyleValue::Number(1.2));
    values.insert("minMeasureWidth".into(), StyleValue::Number(5.0));
    values.insert("showMeasureNumber".into(), StyleValue::Bool(true));
    values.insert("concertPitch".into(), StyleValue::Bool(false));
    values.insert("pageWidth".into(), StyleValue::Number(8.27));
    values.insert("pageHeight".into(), StyleValue::Number(11.69));
    values.insert("musicalSymbolFont".into(), StyleValue::Text("Leland".into()));
    values.insert("chordSymbolFontSize".into(), StyleValue::Number(12.0));
    values
}

impl Style {
    /// Create an empty style table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with the built-in defaults.
    pub fn reset_to_defaults(&mut self) {
        self.values = default_values();
    }

    /// Set one style value, overriding a default or a previous override.
    pub fn set(&mut self, key: impl Into<String>, value: StyleValue) {
        self.values.insert(key.into(), value);
    }

    /// Look up a style value.
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.values.get(key)
    }

    /// Whether no values have been set at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the table exactly matches the built-in defaults.
    pub fn is_default(&self) -> bool {
        self.values == default_values()
    }

    /// Number of values currently set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.values.iter()
    }
}
