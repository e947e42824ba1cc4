use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::is_visible_prompt;
use crate::field::PromptField;
use crate::value::PromptValues;

/// One `{id, value}` pair submitted to the pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSelection {
    /// Prompt id.
    pub id: String,
    /// Current or default value.
    pub value: Value,
}

/// Resolves the value submitted for one field: the current value, else the
/// field default.
#[must_use]
pub fn effective_value(field: &PromptField, values: &PromptValues) -> Option<Value> {
    values
        .get(field.id())
        .map(|value| value.to_json())
        .or_else(|| field.default_value().cloned())
}

/// Builds the pricing payload from visible fields in definition order.
///
/// Hidden fields and fields with neither a value nor a default are skipped.
#[must_use]
pub fn pricing_inputs(fields: &[PromptField], values: &PromptValues) -> Vec<PromptSelection> {
    fields
        .iter()
        .filter(|field| is_visible_prompt(field, values))
        .filter_map(|field| {
            effective_value(field, values).map(|value| PromptSelection {
                id: field.id().to_owned(),
                value,
            })
        })
        .collect()
}

/// Returns ids of visible required fields that have no effective value.
#[must_use]
pub fn missing_required(fields: &[PromptField], values: &PromptValues) -> Vec<String> {
    fields
        .iter()
        .filter(|field| field.is_required() && is_visible_prompt(field, values))
        .filter(|field| {
            effective_value(field, values).is_none_or(|value| match value {
                Value::String(text) => text.trim().is_empty(),
                _ => false,
            })
        })
        .map(|field| field.id().to_owned())
        .collect()
}
