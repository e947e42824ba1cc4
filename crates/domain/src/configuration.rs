use printquote_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::is_visible_prompt;
use crate::extractor::extract_prompts;
use crate::field::PromptField;
use crate::pricing::{PromptSelection, missing_required, pricing_inputs};
use crate::value::{PromptValue, PromptValues};

/// Prompt configuration of one selected product.
///
/// The value map starts empty, changes with each input and is discarded
/// when another product is selected or the item is finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductConfiguration {
    product_id: NonEmptyString,
    fields: Vec<PromptField>,
    values: PromptValues,
}

impl ProductConfiguration {
    /// Starts a configuration for a raw product definition.
    pub fn new(product_id: impl Into<String>, product: &Value) -> AppResult<Self> {
        Ok(Self::from_fields(
            NonEmptyString::new(product_id)?,
            extract_prompts(product),
        ))
    }

    /// Starts a configuration from already extracted fields.
    #[must_use]
    pub fn from_fields(product_id: NonEmptyString, fields: Vec<PromptField>) -> Self {
        Self {
            product_id,
            fields,
            values: PromptValues::new(),
        }
    }

    /// Switches to another product, discarding every entered value.
    pub fn select_product(
        &mut self,
        product_id: impl Into<String>,
        product: &Value,
    ) -> AppResult<()> {
        *self = Self::new(product_id, product)?;
        Ok(())
    }

    /// Returns the selected product id.
    #[must_use]
    pub fn product_id(&self) -> &NonEmptyString {
        &self.product_id
    }

    /// Returns every extracted field.
    #[must_use]
    pub fn fields(&self) -> &[PromptField] {
        &self.fields
    }

    /// Returns the current value map.
    #[must_use]
    pub fn values(&self) -> &PromptValues {
        &self.values
    }

    /// Records one user input. Unknown field ids are rejected.
    pub fn set_value(
        &mut self,
        field_id: &str,
        value: impl Into<PromptValue>,
    ) -> AppResult<Option<PromptValue>> {
        if !self.fields.iter().any(|field| field.id() == field_id) {
            return Err(AppError::Validation(format!(
                "unknown prompt '{}' for product '{}'",
                field_id,
                self.product_id.as_str()
            )));
        }

        Ok(self.values.insert(field_id, value))
    }

    /// Clears one user input.
    pub fn clear_value(&mut self, field_id: &str) -> Option<PromptValue> {
        self.values.remove(field_id)
    }

    /// Returns the fields visible for the current values.
    pub fn visible_fields(&self) -> impl Iterator<Item = &PromptField> {
        self.fields
            .iter()
            .filter(|field| is_visible_prompt(field, &self.values))
    }

    /// Returns the current pricing payload.
    #[must_use]
    pub fn pricing_inputs(&self) -> Vec<PromptSelection> {
        pricing_inputs(&self.fields, &self.values)
    }

    /// Finalizes the configuration into the snapshot stored on a quote item.
    pub fn into_selection(self) -> AppResult<ConfiguredItem> {
        let missing = missing_required(&self.fields, &self.values);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required prompts: {}",
                missing.join(", ")
            )));
        }

        let selections = self.pricing_inputs();
        Ok(ConfiguredItem {
            product_id: self.product_id.into(),
            selections,
        })
    }
}

/// Final prompt selections persisted with a quote or order item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredItem {
    /// Configured product id.
    pub product_id: String,
    /// Submitted `{id, value}` pairs.
    pub selections: Vec<PromptSelection>,
}
