//! Product prompt definitions, visibility rules and pricing payloads.

#![forbid(unsafe_code)]

mod condition;
mod configuration;
mod extractor;
mod field;
mod option;
mod output;
mod pricing;
mod raw_keys;
mod value;

pub use condition::{
    MAX_CONDITION_DEPTH, VisibilityCondition, eval_condition, is_visible_prompt, match_value,
};
pub use configuration::{ConfiguredItem, ProductConfiguration};
pub use extractor::{PROMPT_SOURCE_PATHS, extract_prompts, first_non_empty_array, lookup_path};
pub use field::{PromptField, PromptFieldType, infer_field_type, infer_step};
pub use option::{PromptOption, is_color_literal, normalize_options};
pub use output::{OUTPUT_SOURCE_PATHS, PricingOutput, extract_outputs};
pub use pricing::{PromptSelection, effective_value, missing_required, pricing_inputs};
pub use value::{PromptValue, PromptValues, value_text};
