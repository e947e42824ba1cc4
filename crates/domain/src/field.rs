use std::fmt::{Display, Formatter};
use std::str::FromStr;

use printquote_core::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::condition::VisibilityCondition;
use crate::option::{PromptOption, normalize_options};
use crate::raw_keys::{
    FIELD_DEFAULT, FIELD_DEFAULT_INDEX, FIELD_HIDDEN_WHEN, FIELD_ID, FIELD_LABEL, FIELD_MAX,
    FIELD_MIN, FIELD_OPTIONS, FIELD_REQUIRED, FIELD_STEP, FIELD_TYPE, FIELD_VISIBILITY,
    number_from_value,
};
use crate::value::value_text;

/// Canonical prompt input types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptFieldType {
    /// Decimal numeric input.
    Number,
    /// Whole-number input.
    Integer,
    /// Free text input.
    Text,
    /// Plain choice list.
    Select,
    /// Choice list with preview images.
    Image,
    /// Choice list of color swatches.
    Color,
}

impl PromptFieldType {
    /// Returns the stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Select => "select",
            Self::Image => "image",
            Self::Color => "color",
        }
    }

    /// Returns whether the type takes numeric input.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }

    /// Returns whether the type picks from an option list.
    #[must_use]
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Image | Self::Color)
    }
}

impl Display for PromptFieldType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PromptFieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "text" => Ok(Self::Text),
            "select" => Ok(Self::Select),
            "image" => Ok(Self::Image),
            "color" => Ok(Self::Color),
            _ => Err(AppError::Validation(format!(
                "unknown prompt field type '{value}'"
            ))),
        }
    }
}

/// Infers the canonical type from a raw type hint and normalized options.
///
/// First match wins: `int` in the hint, then `number`/`decimal`/`float`, then
/// the option list (image before color before select), then text.
#[must_use]
pub fn infer_field_type(raw_type: Option<&str>, options: &[PromptOption]) -> PromptFieldType {
    let raw_type = raw_type.unwrap_or_default().to_ascii_lowercase();

    if raw_type.contains("int") {
        return PromptFieldType::Integer;
    }
    if ["number", "decimal", "float"]
        .iter()
        .any(|hint| raw_type.contains(hint))
    {
        return PromptFieldType::Number;
    }
    if !options.is_empty() {
        if options.iter().any(|option| option.image_url().is_some()) {
            return PromptFieldType::Image;
        }
        if options.iter().all(PromptOption::resolves_to_color) {
            return PromptFieldType::Color;
        }
        return PromptFieldType::Select;
    }

    PromptFieldType::Text
}

/// Infers the numeric step: explicit wins, then `0.01` for decimal hints,
/// then `1` for integers.
#[must_use]
pub fn infer_step(
    explicit: Option<f64>,
    raw_type: Option<&str>,
    field_type: PromptFieldType,
) -> Option<f64> {
    if explicit.is_some() {
        return explicit;
    }

    let raw_type = raw_type.unwrap_or_default().to_ascii_lowercase();
    if raw_type.contains("decimal") || raw_type.contains("float") {
        return Some(0.01);
    }

    (field_type == PromptFieldType::Integer).then_some(1.0)
}

/// Normalized prompt definition consumed by form renderers and pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptField {
    id: String,
    label: String,
    field_type: PromptFieldType,
    options: Vec<PromptOption>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    required: bool,
    default_value: Option<Value>,
    visibility: Option<VisibilityCondition>,
    hidden_when: Option<VisibilityCondition>,
}

impl PromptField {
    /// Maps one raw descriptor at `index` into a canonical definition.
    ///
    /// Never fails: a bare string becomes id and label, anything unusable
    /// falls back to `field_<index>` typed as text.
    #[must_use]
    pub fn from_raw(index: usize, raw: &Value) -> Self {
        match raw {
            Value::Object(object) => Self::from_object(index, object),
            Value::String(name) if !name.trim().is_empty() => {
                Self::text(name.clone(), name.clone())
            }
            _ => {
                let id = format!("field_{index}");
                Self::text(id.clone(), id)
            }
        }
    }

    fn text(id: String, label: String) -> Self {
        Self {
            id,
            label,
            field_type: PromptFieldType::Text,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
            required: false,
            default_value: None,
            visibility: None,
            hidden_when: None,
        }
    }

    fn from_object(index: usize, object: &Map<String, Value>) -> Self {
        let id = FIELD_ID
            .first_text(object)
            .unwrap_or_else(|| format!("field_{index}"));
        let label = FIELD_LABEL.first_text(object).unwrap_or_else(|| id.clone());
        let raw_type = FIELD_TYPE.first_text(object);
        let options = FIELD_OPTIONS
            .first_array(object)
            .map(|raw_options| normalize_options(raw_options.as_slice()))
            .unwrap_or_default();

        let field_type = infer_field_type(raw_type.as_deref(), &options);
        let (min, max, step) = if field_type.is_numeric() {
            (
                FIELD_MIN.first_number(object),
                FIELD_MAX.first_number(object),
                infer_step(FIELD_STEP.first_number(object), raw_type.as_deref(), field_type),
            )
        } else {
            (None, None, None)
        };

        let default_value = FIELD_DEFAULT
            .first_present(object)
            .cloned()
            .or_else(|| {
                let default_index = FIELD_DEFAULT_INDEX.first_number(object)?;
                if default_index < 0.0 || default_index.fract() != 0.0 {
                    return None;
                }
                options
                    .get(default_index as usize)
                    .map(|option| Value::String(option.value().to_owned()))
            })
            .and_then(|value| coerce_default(field_type, &value));

        Self {
            id,
            label,
            field_type,
            options: if field_type.has_options() {
                options
            } else {
                Vec::new()
            },
            min,
            max,
            step,
            required: FIELD_REQUIRED
                .first_present(object)
                .is_some_and(flag_from_value),
            default_value,
            visibility: FIELD_VISIBILITY
                .first_present(object)
                .map(VisibilityCondition::parse),
            hidden_when: FIELD_HIDDEN_WHEN
                .first_present(object)
                .map(VisibilityCondition::parse),
        }
    }

    /// Returns the value-map key.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the canonical input type.
    #[must_use]
    pub fn field_type(&self) -> PromptFieldType {
        self.field_type
    }

    /// Returns the choice list (empty for numeric and text fields).
    #[must_use]
    pub fn options(&self) -> &[PromptOption] {
        &self.options
    }

    /// Returns the numeric lower bound.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Returns the numeric upper bound.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Returns the numeric step.
    #[must_use]
    pub fn step(&self) -> Option<f64> {
        self.step
    }

    /// Returns whether a value is required while the field is visible.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the default value, already coerced to the field type.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns the show condition.
    #[must_use]
    pub fn visibility(&self) -> Option<&VisibilityCondition> {
        self.visibility.as_ref()
    }

    /// Returns the hide condition.
    #[must_use]
    pub fn hidden_when(&self) -> Option<&VisibilityCondition> {
        self.hidden_when.as_ref()
    }
}

fn coerce_default(field_type: PromptFieldType, value: &Value) -> Option<Value> {
    match field_type {
        PromptFieldType::Integer => {
            let number = number_from_value(value)?;
            (number.fract() == 0.0).then(|| Value::from(number as i64))
        }
        PromptFieldType::Number => number_from_value(value).map(Value::from),
        PromptFieldType::Text
        | PromptFieldType::Select
        | PromptFieldType::Image
        | PromptFieldType::Color => match value {
            Value::Array(_) | Value::Object(_) => None,
            other => Some(Value::String(value_text(other))),
        },
    }
}

fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}
