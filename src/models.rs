use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Damage category enumeration the label decoder resolves into
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DamageLevel {
    Low,
    Medium,
    High,
}

/// Qualitative certainty bucket derived from prediction confidence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Certainty {
    Low,
    Moderate,
    High,
    #[strum(serialize = "Very High")]
    VeryHigh,
}

impl Certainty {
    /// Bucket a confidence score; boundary values belong to the higher bucket.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < 0.35 {
            Certainty::Low
        } else if confidence < 0.50 {
            Certainty::Moderate
        } else if confidence < 0.65 {
            Certainty::High
        } else {
            Certainty::VeryHigh
        }
    }
}

/// A single raw input field value: numeric or categorical string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// One row of key/value pairs supplied per prediction request.
///
/// Backed by an ordered map so repeated runs walk fields in the same
/// order; the assembler reindexes to the trained schema regardless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord(BTreeMap<String, FieldValue>);

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Rename a field if present; no-op otherwise.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.0.remove(from) {
            self.0.insert(to.to_string(), value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Prediction result with confidence score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted damage category
    pub label: DamageLevel,

    /// Maximum class probability (0.0 - 1.0)
    pub confidence: f64,

    /// All class probabilities keyed by decoded label
    pub probabilities: BTreeMap<String, f64>,
}

impl Prediction {
    pub fn new(label: DamageLevel, confidence: f64) -> Self {
        Self {
            label,
            confidence,
            probabilities: BTreeMap::new(),
        }
    }

    pub fn with_probabilities(mut self, probabilities: BTreeMap<String, f64>) -> Self {
        self.probabilities = probabilities;
        self
    }

    /// Certainty bucket for this prediction's confidence
    pub fn certainty(&self) -> Certainty {
        Certainty::from_confidence(self.confidence)
    }
}
