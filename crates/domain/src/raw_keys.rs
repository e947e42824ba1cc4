use serde_json::{Map, Value};

use crate::value::value_text;

/// Alternative source keys for one canonical concept, highest priority first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyCandidates(&'static [&'static str]);

pub(crate) const FIELD_ID: KeyCandidates = KeyCandidates(&["id", "key", "code", "slug", "name"]);
pub(crate) const FIELD_LABEL: KeyCandidates = KeyCandidates(&["label", "title", "name"]);
pub(crate) const FIELD_TYPE: KeyCandidates =
    KeyCandidates(&["type", "inputType", "kind", "uiType"]);
pub(crate) const FIELD_OPTIONS: KeyCandidates =
    KeyCandidates(&["options", "choices", "values", "items"]);
pub(crate) const FIELD_DEFAULT: KeyCandidates =
    KeyCandidates(&["default", "defaultValue", "initial", "value"]);
pub(crate) const FIELD_DEFAULT_INDEX: KeyCandidates = KeyCandidates(&["defaultIndex"]);
pub(crate) const FIELD_MIN: KeyCandidates = KeyCandidates(&["min", "minimum"]);
pub(crate) const FIELD_MAX: KeyCandidates = KeyCandidates(&["max", "maximum"]);
pub(crate) const FIELD_STEP: KeyCandidates = KeyCandidates(&["step", "increment"]);
pub(crate) const FIELD_REQUIRED: KeyCandidates =
    KeyCandidates(&["required", "isRequired", "mandatory"]);
pub(crate) const FIELD_VISIBILITY: KeyCandidates =
    KeyCandidates(&["visibility", "visibleWhen", "showWhen", "showIf"]);
pub(crate) const FIELD_HIDDEN_WHEN: KeyCandidates =
    KeyCandidates(&["hiddenWhen", "hideWhen", "hideIf"]);

pub(crate) const OPTION_VALUE: KeyCandidates = KeyCandidates(&["value", "id", "key", "name"]);
pub(crate) const OPTION_LABEL: KeyCandidates = KeyCandidates(&["label", "title", "name"]);
pub(crate) const OPTION_IMAGE: KeyCandidates =
    KeyCandidates(&["imageUrl", "image", "thumbnail", "url"]);
pub(crate) const OPTION_COLOR: KeyCandidates = KeyCandidates(&["color"]);

pub(crate) const CONDITION_FIELD: KeyCandidates = KeyCandidates(&["field", "id", "key"]);
pub(crate) const CONDITION_EXPECTED: KeyCandidates = KeyCandidates(&["equals", "value", "is"]);

pub(crate) const OUTPUT_ID: KeyCandidates = KeyCandidates(&["id", "key", "code", "name"]);
pub(crate) const OUTPUT_LABEL: KeyCandidates = KeyCandidates(&["label", "title", "name"]);
pub(crate) const OUTPUT_VALUE: KeyCandidates = KeyCandidates(&["value", "result", "amount"]);
pub(crate) const OUTPUT_UNIT: KeyCandidates = KeyCandidates(&["unit"]);

impl KeyCandidates {
    /// Returns the first candidate whose value is present and not `null`.
    pub(crate) fn first_present(self, object: &Map<String, Value>) -> Option<&Value> {
        self.0
            .iter()
            .filter_map(|key| object.get(*key))
            .find(|value| !value.is_null())
    }

    /// Returns the first candidate that renders to non-blank text.
    ///
    /// Strings, numbers and booleans qualify; objects and arrays are skipped
    /// so a nested structure never becomes an identifier.
    pub(crate) fn first_text(self, object: &Map<String, Value>) -> Option<String> {
        self.0
            .iter()
            .filter_map(|key| object.get(*key))
            .filter(|value| matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)))
            .map(value_text)
            .find(|text| !text.trim().is_empty())
    }

    /// Returns the first candidate that parses as a finite number.
    pub(crate) fn first_number(self, object: &Map<String, Value>) -> Option<f64> {
        self.0
            .iter()
            .filter_map(|key| object.get(*key))
            .find_map(number_from_value)
    }

    /// Returns the first candidate that is an array.
    pub(crate) fn first_array(self, object: &Map<String, Value>) -> Option<&Vec<Value>> {
        self.0
            .iter()
            .filter_map(|key| object.get(*key))
            .find_map(Value::as_array)
    }
}

/// Reads a number from a JSON number or a numeric string.
pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}
