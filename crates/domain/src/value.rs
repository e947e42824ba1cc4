use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// One user-entered prompt value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptValue {
    /// Numeric input.
    Number(Number),
    /// Free text or a selected option value.
    Text(String),
}

impl PromptValue {
    /// Converts a loose JSON value into a prompt value.
    ///
    /// `null`, arrays and objects carry no prompt value and yield `None`.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Bool(flag) => Some(Self::Text(flag.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns the string form used for comparisons and payloads.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(number) => number_text(number),
            Self::Text(text) => text.clone(),
        }
    }

    /// Returns whether the value counts as set in a boolean comparison.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
            Self::Text(text) => !text.is_empty(),
        }
    }

    /// Returns the value as JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Number(number) => Value::Number(number.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

impl From<&str> for PromptValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PromptValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for PromptValue {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i64> for PromptValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<f64> for PromptValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(Self::Number)
            .unwrap_or_else(|| Self::Text(value.to_string()))
    }
}

/// Current prompt values keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptValues(BTreeMap<String, PromptValue>);

impl PromptValues {
    /// Creates an empty value map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a value map from a JSON object, skipping entries without a value.
    ///
    /// Anything other than an object yields an empty map.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::new();
        };

        object
            .iter()
            .filter_map(|(field_id, raw)| {
                PromptValue::from_json(raw).map(|value| (field_id.clone(), value))
            })
            .collect()
    }

    /// Sets one field value, returning the previous one.
    pub fn insert(
        &mut self,
        field_id: impl Into<String>,
        value: impl Into<PromptValue>,
    ) -> Option<PromptValue> {
        self.0.insert(field_id.into(), value.into())
    }

    /// Removes one field value.
    pub fn remove(&mut self, field_id: &str) -> Option<PromptValue> {
        self.0.remove(field_id)
    }

    /// Returns one field value.
    #[must_use]
    pub fn get(&self, field_id: &str) -> Option<&PromptValue> {
        self.0.get(field_id)
    }

    /// Returns whether no values are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of set values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates values in field id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PromptValue)> {
        self.0.iter().map(|(field_id, value)| (field_id.as_str(), value))
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>, V: Into<PromptValue>> FromIterator<(K, V)> for PromptValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field_id, value)| (field_id.into(), value.into()))
                .collect(),
        )
    }
}

/// Renders a JSON value the way it is compared and sent upstream.
///
/// Integral numbers drop the fractional part (`1.0` renders as `1`), `null`
/// renders empty and arrays join their elements with commas.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn number_text(number: &Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(integer) = number.as_u64() {
        return integer.to_string();
    }

    number
        .as_f64()
        .map(|float| float.to_string())
        .unwrap_or_else(|| number.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PromptValue, PromptValues, value_text};

    #[test]
    fn integral_floats_render_without_fraction() {
        assert_eq!(value_text(&json!(1.0)), "1");
        assert_eq!(value_text(&json!(2.5)), "2.5");
        assert_eq!(value_text(&json!(-4)), "-4");
    }

    #[test]
    fn null_renders_empty_and_arrays_join() {
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(["a", 1, true])), "a,1,true");
    }

    #[test]
    fn value_map_from_json_skips_empty_entries() {
        let values = PromptValues::from_json(&json!({
            "width": 210,
            "paper": "gloss",
            "notes": null,
            "extras": ["x"],
        }));

        assert_eq!(values.len(), 2);
        assert_eq!(values.get("width"), Some(&PromptValue::from(210)));
        assert_eq!(values.get("paper"), Some(&PromptValue::from("gloss")));
    }

    #[test]
    fn value_map_from_non_object_is_empty() {
        assert!(PromptValues::from_json(&json!(["a"])).is_empty());
    }

    #[test]
    fn truthiness_matches_loose_semantics() {
        assert!(PromptValue::from("no").is_truthy());
        assert!(!PromptValue::from("").is_truthy());
        assert!(!PromptValue::from(0).is_truthy());
        assert!(PromptValue::from(0.5).is_truthy());
    }

    #[test]
    fn prompt_values_round_trip_as_plain_object() {
        let values: PromptValues = [("qty", PromptValue::from(100))].into_iter().collect();
        let encoded = serde_json::to_value(&values).unwrap_or_else(|_| unreachable!());

        assert_eq!(encoded, json!({"qty": 100}));
    }
}
