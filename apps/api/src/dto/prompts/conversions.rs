use printquote_application::{PriceQuote, ProductPrompts, PromptEvaluation};
use printquote_core::{AppError, AppResult};
use printquote_domain::{PricingOutput, PromptField, PromptOption, PromptSelection, PromptValues};
use serde_json::Value;

use super::types::{
    ExtractPromptsResponse, PriceQuoteResponse, PricingOutputResponse, ProductPromptsResponse,
    PromptEvaluationResponse, PromptFieldResponse, PromptOptionResponse, PromptSelectionResponse,
};

/// Reads the `values` member of a request body into a prompt value map.
///
/// A missing or `null` member is an empty map. Entries holding arrays,
/// objects or `null` are dropped.
pub fn prompt_values_from_request(values: &Value) -> AppResult<PromptValues> {
    match values {
        Value::Null => Ok(PromptValues::new()),
        Value::Object(_) => Ok(PromptValues::from_json(values)),
        _ => Err(AppError::Validation(
            "values must be an object keyed by prompt id".to_owned(),
        )),
    }
}

impl From<&PromptOption> for PromptOptionResponse {
    fn from(value: &PromptOption) -> Self {
        Self {
            value: value.value().to_owned(),
            label: value.label().to_owned(),
            color: value.color().map(str::to_owned),
            image_url: value.image_url().map(str::to_owned),
        }
    }
}

impl From<&PromptField> for PromptFieldResponse {
    fn from(value: &PromptField) -> Self {
        Self {
            id: value.id().to_owned(),
            label: value.label().to_owned(),
            field_type: value.field_type().as_str().to_owned(),
            options: value
                .options()
                .iter()
                .map(PromptOptionResponse::from)
                .collect(),
            min: value.min(),
            max: value.max(),
            step: value.step(),
            required: value.is_required(),
            default_value: value.default_value().cloned(),
            visibility: value
                .visibility()
                .and_then(|condition| serde_json::to_value(condition).ok()),
            hidden_when: value
                .hidden_when()
                .and_then(|condition| serde_json::to_value(condition).ok()),
        }
    }
}

impl From<Vec<PromptField>> for ExtractPromptsResponse {
    fn from(value: Vec<PromptField>) -> Self {
        Self {
            fields: value.iter().map(PromptFieldResponse::from).collect(),
        }
    }
}

impl From<ProductPrompts> for ProductPromptsResponse {
    fn from(value: ProductPrompts) -> Self {
        Self {
            product_id: value.product_id,
            name: value.name,
            fields: value.fields.iter().map(PromptFieldResponse::from).collect(),
        }
    }
}

impl From<PromptSelection> for PromptSelectionResponse {
    fn from(value: PromptSelection) -> Self {
        Self {
            id: value.id,
            value: value.value,
        }
    }
}

impl From<PromptEvaluation> for PromptEvaluationResponse {
    fn from(value: PromptEvaluation) -> Self {
        Self {
            visible: value.visible,
            hidden: value.hidden,
            missing_required: value.missing_required,
            inputs: value
                .inputs
                .into_iter()
                .map(PromptSelectionResponse::from)
                .collect(),
        }
    }
}

impl From<PricingOutput> for PricingOutputResponse {
    fn from(value: PricingOutput) -> Self {
        Self {
            id: value.id().to_owned(),
            label: value.label().to_owned(),
            value: value.value().clone(),
            unit: value.unit().map(str::to_owned),
        }
    }
}

impl From<PriceQuote> for PriceQuoteResponse {
    fn from(value: PriceQuote) -> Self {
        Self {
            product_id: value.product_id,
            inputs: value
                .inputs
                .into_iter()
                .map(PromptSelectionResponse::from)
                .collect(),
            outputs: value
                .outputs
                .into_iter()
                .map(PricingOutputResponse::from)
                .collect(),
            quoted_at: value.quoted_at.to_rfc3339(),
        }
    }
}
