use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::raw_keys::{OPTION_COLOR, OPTION_IMAGE, OPTION_LABEL, OPTION_VALUE};
use crate::value::value_text;

/// One selectable choice of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOption {
    value: String,
    label: String,
    color: Option<String>,
    image_url: Option<String>,
}

impl PromptOption {
    /// Creates an option whose label defaults to its value.
    #[must_use]
    pub fn new(value: impl Into<String>, label: Option<String>) -> Self {
        let value = value.into();
        let label = label.unwrap_or_else(|| value.clone());

        Self {
            value,
            label,
            color: None,
            image_url: None,
        }
    }

    /// Attaches a color swatch.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Attaches a preview image.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Returns the submitted value.
    #[must_use]
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the color swatch, when any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the preview image URL, when any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns whether this option renders as a color swatch.
    #[must_use]
    pub fn resolves_to_color(&self) -> bool {
        self.color.is_some() || is_color_literal(self.value.as_str())
    }

    fn from_raw(raw: &Value) -> Self {
        match raw {
            Value::String(text) if is_color_literal(text) => {
                Self::new(text.clone(), None).with_color(text.clone())
            }
            Value::Object(object) => {
                let label = OPTION_LABEL.first_text(object);
                let value = OPTION_VALUE
                    .first_text(object)
                    .or_else(|| label.clone())
                    .unwrap_or_else(|| value_text(raw));

                let mut option = Self::new(value, label);
                if let Some(color) = OPTION_COLOR.first_text(object) {
                    option = option.with_color(color);
                }
                if let Some(image_url) = OPTION_IMAGE.first_text(object) {
                    option = option.with_image_url(image_url);
                }
                option
            }
            other => Self::new(value_text(other), None),
        }
    }
}

/// Converts heterogeneous raw options into the uniform option shape.
///
/// Input order is preserved, nothing is dropped and duplicates are kept.
#[must_use]
pub fn normalize_options(raw: &[Value]) -> Vec<PromptOption> {
    raw.iter().map(PromptOption::from_raw).collect()
}

/// Returns whether text is a hex, `rgb()`/`rgba()` or `hsl()`/`hsla()` color.
#[must_use]
pub fn is_color_literal(text: &str) -> bool {
    let text = text.trim();

    if let Some(hex) = text.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    let lowered = text.to_ascii_lowercase();
    ["rgb(", "rgba(", "hsl(", "hsla("].iter().any(|prefix| {
        lowered
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(')'))
            .is_some_and(|arguments| {
                arguments.chars().any(|c| c.is_ascii_digit())
                    && arguments
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || " .,%/+-".contains(c))
            })
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Value, json};

    use super::{PromptOption, is_color_literal, normalize_options};

    #[test]
    fn bare_color_strings_become_swatches() {
        let options = normalize_options(&[json!("#ff0000"), json!("rgb(0, 0, 255)"), json!("A4")]);

        assert_eq!(options[0].color(), Some("#ff0000"));
        assert_eq!(options[0].value(), "#ff0000");
        assert_eq!(options[1].color(), Some("rgb(0, 0, 255)"));
        assert_eq!(options[2].color(), None);
        assert_eq!(options[2].label(), "A4");
    }

    #[test]
    fn object_options_resolve_alternative_keys() {
        let options = normalize_options(&[
            json!({"id": "gloss", "title": "Gloss 170g", "thumbnail": "https://cdn.example/g.png"}),
            json!({"name": "matte"}),
            json!({"key": 3, "color": "#222"}),
        ]);

        assert_eq!(options[0].value(), "gloss");
        assert_eq!(options[0].label(), "Gloss 170g");
        assert_eq!(options[0].image_url(), Some("https://cdn.example/g.png"));
        assert_eq!(options[1].value(), "matte");
        assert_eq!(options[1].label(), "matte");
        assert_eq!(options[2].value(), "3");
        assert_eq!(options[2].color(), Some("#222"));
    }

    #[test]
    fn label_only_objects_use_label_as_value() {
        let options = normalize_options(&[json!({"label": "Express"})]);
        assert_eq!(options[0].value(), "Express");
    }

    #[test]
    fn unparseable_entries_degrade_to_text() {
        let options = normalize_options(&[json!(12), json!(null), json!({"unknown": true})]);

        assert_eq!(options[0], PromptOption::new("12", None));
        assert_eq!(options[1].value(), "");
        assert_eq!(options[2].value(), r#"{"unknown":true}"#);
    }

    #[test]
    fn duplicates_are_passed_through() {
        let options = normalize_options(&[json!("a"), json!("a")]);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn color_literal_detection() {
        assert!(is_color_literal("#abc"));
        assert!(is_color_literal("#A1B2C3D4"));
        assert!(is_color_literal("hsl(120deg, 50%, 40%)"));
        assert!(is_color_literal("RGBA(1,2,3,0.5)"));
        assert!(!is_color_literal("#abcd1"));
        assert!(!is_color_literal("red"));
        assert!(!is_color_literal("rgb()"));
    }

    fn raw_option() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<String>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            Just(Value::Null),
            ("[a-z]{0,8}", "[a-z]{0,8}")
                .prop_map(|(value, label)| json!({"value": value, "label": label})),
        ]
    }

    proptest! {
        #[test]
        fn normalize_options_preserves_length(raw in prop::collection::vec(raw_option(), 0..32)) {
            prop_assert_eq!(normalize_options(&raw).len(), raw.len());
        }
    }
}
