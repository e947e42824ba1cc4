use std::sync::Arc;

use chrono::{DateTime, Utc};
use printquote_core::{AppError, AppResult, NonEmptyString};
use printquote_domain::{
    PricingOutput, PromptField, PromptSelection, PromptValues, extract_outputs, extract_prompts,
    is_visible_prompt, missing_required, pricing_inputs,
};
use serde::Serialize;
use serde_json::Value;

use crate::pricing_ports::{PriceRequest, PricingEngine};

mod quote;

#[cfg(test)]
mod tests;

const PRODUCT_NAME_KEYS: [&str; 3] = ["name", "title", "label"];

/// Application service for product prompt configuration and pricing.
#[derive(Clone)]
pub struct ProductConfigurationService {
    pricing_engine: Arc<dyn PricingEngine>,
}

/// Canonical prompts of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPrompts {
    /// Product identifier.
    pub product_id: String,
    /// Display name reported by the pricing engine, when any.
    pub name: Option<String>,
    /// Extracted prompt definitions.
    pub fields: Vec<PromptField>,
}

/// Visibility and completeness of a product's prompts for one value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptEvaluation {
    /// Ids of visible prompts, in definition order.
    pub visible: Vec<String>,
    /// Ids of hidden prompts, in definition order.
    pub hidden: Vec<String>,
    /// Ids of visible required prompts without a value.
    pub missing_required: Vec<String>,
    /// Payload that would be submitted for pricing.
    pub inputs: Vec<PromptSelection>,
}

/// Price calculation result for one configured product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Product identifier.
    pub product_id: String,
    /// Submitted selections.
    pub inputs: Vec<PromptSelection>,
    /// Computed outputs returned by the pricing engine.
    pub outputs: Vec<PricingOutput>,
    /// Time the quote was computed.
    pub quoted_at: DateTime<Utc>,
}

impl ProductConfigurationService {
    /// Creates a new configuration service from a pricing engine implementation.
    #[must_use]
    pub fn new(pricing_engine: Arc<dyn PricingEngine>) -> Self {
        Self { pricing_engine }
    }

    /// Fetches a product and extracts its canonical prompts.
    pub async fn product_prompts(&self, product_id: &str) -> AppResult<ProductPrompts> {
        let product_id = NonEmptyString::new(product_id)?;
        let product = self
            .pricing_engine
            .fetch_product(product_id.as_str())
            .await?;
        Self::ensure_product_object(product_id.as_str(), &product)?;

        Ok(Self::product_prompts_from_definition(product_id, &product))
    }

    /// Evaluates visibility, completeness and pricing payload for a product.
    #[must_use]
    pub fn evaluate_prompts(product: &Value, values: &PromptValues) -> PromptEvaluation {
        let fields = extract_prompts(product);
        let (visible, hidden): (Vec<&PromptField>, Vec<&PromptField>) = fields
            .iter()
            .partition(|field| is_visible_prompt(field, values));

        PromptEvaluation {
            visible: visible.iter().map(|field| field.id().to_owned()).collect(),
            hidden: hidden.iter().map(|field| field.id().to_owned()).collect(),
            missing_required: missing_required(&fields, values),
            inputs: pricing_inputs(&fields, values),
        }
    }

    fn product_prompts_from_definition(
        product_id: NonEmptyString,
        product: &Value,
    ) -> ProductPrompts {
        let name = product.as_object().and_then(|object| {
            PRODUCT_NAME_KEYS
                .iter()
                .filter_map(|key| object.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .find(|name| !name.is_empty())
                .map(str::to_owned)
        });

        ProductPrompts {
            product_id: product_id.into(),
            name,
            fields: extract_prompts(product),
        }
    }

    fn ensure_product_object(product_id: &str, product: &Value) -> AppResult<()> {
        if product.is_object() {
            return Ok(());
        }

        Err(AppError::Internal(format!(
            "pricing engine returned a non-object definition for product '{product_id}'"
        )))
    }
}
