use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extractor::lookup_path;
use crate::raw_keys::{OUTPUT_ID, OUTPUT_LABEL, OUTPUT_UNIT, OUTPUT_VALUE};

/// Candidate locations of computed outputs in a pricing response.
pub const OUTPUT_SOURCE_PATHS: &[&[&str]] = &[
    &["outputs"],
    &["results"],
    &["data", "outputs"],
    &["pricing", "outputs"],
];

/// One computed result returned by the pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOutput {
    id: String,
    label: String,
    value: Value,
    unit: Option<String>,
}

impl PricingOutput {
    /// Creates an output whose label defaults to its id.
    #[must_use]
    pub fn new(id: impl Into<String>, label: Option<String>, value: Value) -> Self {
        let id = id.into();
        let label = label.unwrap_or_else(|| id.clone());

        Self {
            id,
            label,
            value,
            unit: None,
        }
    }

    /// Returns the output identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the computed value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the unit of measure, when any.
    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    fn from_raw(index: usize, raw: &Value) -> Self {
        let Some(object) = raw.as_object() else {
            return Self::new(format!("output_{index}"), None, raw.clone());
        };

        let id = OUTPUT_ID
            .first_text(object)
            .unwrap_or_else(|| format!("output_{index}"));
        let value = OUTPUT_VALUE
            .first_present(object)
            .cloned()
            .unwrap_or(Value::Null);

        Self {
            unit: OUTPUT_UNIT.first_text(object),
            ..Self::new(id, OUTPUT_LABEL.first_text(object), value)
        }
    }
}

/// Extracts computed outputs from a raw pricing response.
///
/// Arrays of descriptors and `{id: value}` objects are both accepted; the
/// first non-empty candidate wins.
#[must_use]
pub fn extract_outputs(response: &Value) -> Vec<PricingOutput> {
    let source = OUTPUT_SOURCE_PATHS.iter().find_map(|path| {
        lookup_path(response, path).filter(|candidate| match candidate {
            Value::Array(items) => !items.is_empty(),
            Value::Object(entries) => !entries.is_empty(),
            _ => false,
        })
    });

    match source {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, raw)| PricingOutput::from_raw(index, raw))
            .collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(id, value)| PricingOutput::new(id.clone(), None, value.clone()))
            .collect(),
        _ => Vec::new(),
    }
}
