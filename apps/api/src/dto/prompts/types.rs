use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Incoming payload for prompt extraction from a raw product definition.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/extract-prompts-request.ts"
)]
pub struct ExtractPromptsRequest {
    #[ts(type = "unknown")]
    pub product: Value,
}

/// Incoming payload for prompt visibility evaluation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/evaluate-prompts-request.ts"
)]
pub struct EvaluatePromptsRequest {
    #[ts(type = "unknown")]
    pub product: Value,
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub values: Value,
}

/// Incoming payload for a product price quote.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/quote-request.ts"
)]
pub struct QuoteRequest {
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub values: Value,
}

/// API representation of one prompt option.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/prompt-option-response.ts"
)]
pub struct PromptOptionResponse {
    pub value: String,
    pub label: String,
    pub color: Option<String>,
    pub image_url: Option<String>,
}

/// API representation of one canonical prompt field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/prompt-field-response.ts"
)]
pub struct PromptFieldResponse {
    pub id: String,
    pub label: String,
    pub field_type: String,
    pub options: Vec<PromptOptionResponse>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub required: bool,
    #[ts(type = "unknown | null")]
    pub default_value: Option<Value>,
    /// Parsed visibility condition tree.
    #[ts(type = "unknown | null")]
    pub visibility: Option<Value>,
    #[ts(type = "unknown | null")]
    pub hidden_when: Option<Value>,
}

/// Prompt extraction result.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/extract-prompts-response.ts"
)]
pub struct ExtractPromptsResponse {
    pub fields: Vec<PromptFieldResponse>,
}

/// Canonical prompts of a product fetched from the pricing engine.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/product-prompts-response.ts"
)]
pub struct ProductPromptsResponse {
    pub product_id: String,
    pub name: Option<String>,
    pub fields: Vec<PromptFieldResponse>,
}

/// One `{id, value}` pair submitted for pricing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/prompt-selection-response.ts"
)]
pub struct PromptSelectionResponse {
    pub id: String,
    #[ts(type = "unknown")]
    pub value: Value,
}

/// Visibility and completeness of prompts for one value map.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/prompt-evaluation-response.ts"
)]
pub struct PromptEvaluationResponse {
    pub visible: Vec<String>,
    pub hidden: Vec<String>,
    pub missing_required: Vec<String>,
    pub inputs: Vec<PromptSelectionResponse>,
}

/// One computed pricing output.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/pricing-output-response.ts"
)]
pub struct PricingOutputResponse {
    pub id: String,
    pub label: String,
    #[ts(type = "unknown")]
    pub value: Value,
    pub unit: Option<String>,
}

/// Price quote for a configured product.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/price-quote-response.ts"
)]
pub struct PriceQuoteResponse {
    pub product_id: String,
    pub inputs: Vec<PromptSelectionResponse>,
    pub outputs: Vec<PricingOutputResponse>,
    pub quoted_at: String,
}
