use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::PromptField;
use crate::raw_keys::{CONDITION_EXPECTED, CONDITION_FIELD};
use crate::value::{PromptValue, PromptValues, value_text};

/// Nesting depth past which condition nodes are treated as permissive.
pub const MAX_CONDITION_DEPTH: usize = 20;

/// Declarative show/hide rule over the current value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisibilityCondition {
    /// Compares one field value against an expected value.
    Equals {
        /// Field id looked up in the value map.
        field: String,
        /// Expected value, array for membership or boolean for truthiness.
        expected: Value,
    },
    /// Every nested condition must hold.
    AllOf {
        /// Nested conditions.
        conditions: Vec<VisibilityCondition>,
    },
    /// At least one nested condition must hold.
    AnyOf {
        /// Nested conditions.
        conditions: Vec<VisibilityCondition>,
    },
    /// Literal boolean condition.
    Constant {
        /// Fixed evaluation result.
        value: bool,
    },
    /// Unrecognized or too deeply nested input; always holds.
    Permissive,
}

impl VisibilityCondition {
    /// Parses any JSON shape into a condition. Never fails.
    ///
    /// Accepted shapes: `"a=1 && b=2"` shorthand, `{field, equals}` objects,
    /// `{allOf: [...]}` / `{anyOf: [...]}` composites, plain `{field: value}`
    /// maps, arrays (implicit AND) and boolean literals.
    #[must_use]
    pub fn parse(raw: &Value) -> Self {
        Self::parse_at_depth(raw, 0)
    }

    fn parse_at_depth(raw: &Value, depth: usize) -> Self {
        if depth > MAX_CONDITION_DEPTH {
            return Self::Permissive;
        }

        match raw {
            Value::String(shorthand) => Self::parse_shorthand(shorthand),
            Value::Bool(value) => Self::Constant { value: *value },
            Value::Array(items) => Self::AllOf {
                conditions: items
                    .iter()
                    .map(|item| Self::parse_at_depth(item, depth + 1))
                    .collect(),
            },
            Value::Object(object) => Self::parse_object(object, depth),
            Value::Null | Value::Number(_) => Self::Permissive,
        }
    }

    fn parse_shorthand(shorthand: &str) -> Self {
        let mut clauses: Vec<Self> = shorthand
            .split("&&")
            .filter(|clause| !clause.trim().is_empty())
            .map(|clause| {
                let Some((field, expected)) = clause.split_once('=') else {
                    return Self::Permissive;
                };
                let field = field.trim();
                if field.is_empty() {
                    return Self::Permissive;
                }

                // `a==1` is accepted as an alias of `a=1`.
                let expected = expected.strip_prefix('=').unwrap_or(expected).trim();
                Self::Equals {
                    field: field.to_owned(),
                    expected: Value::String(expected.to_owned()),
                }
            })
            .collect();

        match clauses.len() {
            0 => Self::Permissive,
            1 => clauses.remove(0),
            _ => Self::AllOf {
                conditions: clauses,
            },
        }
    }

    fn parse_object(object: &Map<String, Value>, depth: usize) -> Self {
        let nested = |items: &Vec<Value>| -> Vec<Self> {
            items
                .iter()
                .map(|item| Self::parse_at_depth(item, depth + 1))
                .collect()
        };

        let mut composite = Vec::new();
        if let Some(items) = object.get("allOf").and_then(Value::as_array) {
            composite.push(Self::AllOf {
                conditions: nested(items),
            });
        }
        if let Some(items) = object.get("anyOf").and_then(Value::as_array) {
            composite.push(Self::AnyOf {
                conditions: nested(items),
            });
        }
        match composite.len() {
            0 => {}
            1 => return composite.remove(0),
            _ => {
                return Self::AllOf {
                    conditions: composite,
                };
            }
        }

        if let Some(field) = CONDITION_FIELD.first_text(object) {
            return match CONDITION_EXPECTED.first_present(object) {
                Some(expected) => Self::Equals {
                    field,
                    expected: expected.clone(),
                },
                None => Self::Permissive,
            };
        }

        if object.is_empty() {
            return Self::Permissive;
        }

        Self::AllOf {
            conditions: object
                .iter()
                .map(|(field, expected)| Self::Equals {
                    field: field.clone(),
                    expected: expected.clone(),
                })
                .collect(),
        }
    }

    /// Evaluates the condition against the current values.
    #[must_use]
    pub fn evaluate(&self, values: &PromptValues) -> bool {
        match self {
            Self::Equals { field, expected } => match_value(values.get(field), expected),
            Self::AllOf { conditions } => conditions
                .iter()
                .all(|condition| condition.evaluate(values)),
            Self::AnyOf { conditions } => {
                conditions.is_empty()
                    || conditions
                        .iter()
                        .any(|condition| condition.evaluate(values))
            }
            Self::Constant { value } => *value,
            Self::Permissive => true,
        }
    }

    /// Evaluates only the usable comparisons of the condition.
    ///
    /// Permissive nodes abstain (`None`) instead of holding, and composites
    /// abstain when every child abstains. Used for hide rules, which must
    /// never hide a field on a malformed or over-deep rule.
    #[must_use]
    pub fn decide(&self, values: &PromptValues) -> Option<bool> {
        match self {
            Self::Equals { field, expected } => Some(match_value(values.get(field), expected)),
            Self::AllOf { conditions } => {
                let decided = Self::decided_children(conditions, values);
                (!decided.is_empty()).then(|| decided.iter().all(|held| *held))
            }
            Self::AnyOf { conditions } => {
                let decided = Self::decided_children(conditions, values);
                (!decided.is_empty()).then(|| decided.iter().any(|held| *held))
            }
            Self::Constant { value } => Some(*value),
            Self::Permissive => None,
        }
    }

    fn decided_children(conditions: &[Self], values: &PromptValues) -> Vec<bool> {
        conditions
            .iter()
            .filter_map(|condition| condition.decide(values))
            .collect()
    }
}

/// Compares the current value of a field against an expected value.
///
/// Arrays test membership by string form, booleans test truthiness and
/// everything else compares string forms. A missing value renders empty.
#[must_use]
pub fn match_value(current: Option<&PromptValue>, expected: &Value) -> bool {
    let current_text = || current.map(PromptValue::as_text).unwrap_or_default();

    match expected {
        Value::Array(candidates) => {
            let current_text = current_text();
            candidates
                .iter()
                .any(|candidate| value_text(candidate) == current_text)
        }
        Value::Bool(expected) => current.is_some_and(PromptValue::is_truthy) == *expected,
        other => value_text(other) == current_text(),
    }
}

/// Evaluates a raw JSON condition. Malformed input evaluates to `true`.
#[must_use]
pub fn eval_condition(condition: &Value, values: &PromptValues) -> bool {
    VisibilityCondition::parse(condition).evaluate(values)
}

/// Returns whether a prompt is currently shown.
///
/// `hidden_when` hides the field when it holds; `visibility` hides it when it
/// does not. A `hidden_when` hides only when one of its real comparisons
/// holds, so malformed or over-deep hide rules never hide.
#[must_use]
pub fn is_visible_prompt(field: &PromptField, values: &PromptValues) -> bool {
    let hidden = field
        .hidden_when()
        .is_some_and(|condition| condition.decide(values) == Some(true));
    if hidden {
        return false;
    }

    field
        .visibility()
        .is_none_or(|condition| condition.evaluate(values))
}
