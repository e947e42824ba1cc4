use serde_json::Value;

use crate::field::PromptField;

/// Candidate locations of the raw prompt list, highest priority first.
///
/// The order follows successive pricing API response shapes. The first
/// non-empty array wins and later candidates are ignored, never merged.
pub const PROMPT_SOURCE_PATHS: &[&[&str]] = &[
    &["prompts"],
    &["inputs"],
    &["fields"],
    &["parameters"],
    &["pricing", "prompts"],
    &["pricing", "inputs"],
    &["form", "fields"],
    &["schema", "fields"],
    &["product", "prompts"],
    &["data", "prompts"],
];

/// Resolves a key path inside nested JSON objects.
#[must_use]
pub fn lookup_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, segment| current.as_object()?.get(*segment))
}

/// Returns the first non-empty array found at one of `paths`.
#[must_use]
pub fn first_non_empty_array<'a>(root: &'a Value, paths: &[&[&str]]) -> Option<&'a [Value]> {
    paths.iter().find_map(|path| {
        lookup_path(root, path)
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
            .map(Vec::as_slice)
    })
}

/// Extracts canonical prompt definitions from a raw product object.
///
/// An empty result means the product defines no configurable prompts.
#[must_use]
pub fn extract_prompts(product: &Value) -> Vec<PromptField> {
    first_non_empty_array(product, PROMPT_SOURCE_PATHS)
        .map(|raw_fields| {
            raw_fields
                .iter()
                .enumerate()
                .map(|(index, raw)| PromptField::from_raw(index, raw))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{extract_prompts, lookup_path};
    use crate::field::PromptFieldType;

    #[test]
    fn inputs_are_used_when_prompts_are_absent() {
        let product = json!({
            "prompts": [],
            "inputs": [{"id": "qty", "type": "integer"}, {"id": "paper", "options": ["a", "b"]}],
        });

        let fields = extract_prompts(&product);
        let ids: Vec<&str> = fields.iter().map(|field| field.id()).collect();
        assert_eq!(ids, vec!["qty", "paper"]);
        assert_eq!(fields[0].field_type(), PromptFieldType::Integer);
    }

    #[test]
    fn first_populated_source_wins_without_merging() {
        let product = json!({
            "prompts": [{"id": "from_prompts"}],
            "inputs": [{"id": "from_inputs"}],
            "fields": [{"id": "from_fields"}],
        });

        let fields = extract_prompts(&product);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id(), "from_prompts");
    }

    #[test]
    fn nested_sources_are_searched() {
        let product = json!({
            "pricing": {"prompts": "not-an-array"},
            "form": {"fields": [{"key": "finish", "choices": ["#fff", "#000"]}]},
        });

        let fields = extract_prompts(&product);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id(), "finish");
        assert_eq!(fields[0].field_type(), PromptFieldType::Color);
    }

    #[test]
    fn products_without_prompts_yield_empty_list() {
        assert!(extract_prompts(&json!({"name": "Poster"})).is_empty());
        assert!(extract_prompts(&json!("poster")).is_empty());
        assert!(extract_prompts(&json!(null)).is_empty());
    }

    #[test]
    fn malformed_entries_do_not_abort_extraction() {
        let product = json!({"fields": [null, {"title": "Width", "type": "decimal"}, 7]});

        let fields = extract_prompts(&product);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].id(), "field_0");
        assert_eq!(fields[1].id(), "field_1");
        assert_eq!(fields[1].label(), "Width");
        assert_eq!(fields[1].step(), Some(0.01));
        assert_eq!(fields[2].field_type(), PromptFieldType::Text);
    }

    #[test]
    fn extraction_is_idempotent() {
        let product = json!({
            "parameters": [
                {
                    "slug": "size",
                    "options": [{"value": "a4", "image": "https://cdn.example/a4.png"}],
                },
                {"name": "copies", "kind": "int", "visibleWhen": {"size": "a4"}},
            ],
        });

        assert_eq!(extract_prompts(&product), extract_prompts(&product));
    }

    #[test]
    fn lookup_path_stops_at_non_objects() {
        let root = json!({"a": {"b": [1]}});

        assert_eq!(lookup_path(&root, &["a", "b"]), Some(&json!([1])));
        assert_eq!(lookup_path(&root, &["a", "b", "c"]), None);
    }
}
