use super::*;

impl ProductConfigurationService {
    /// Prices a product for the given prompt values.
    ///
    /// Visible required prompts must have a value or a default. Hidden prompts
    /// are never submitted.
    pub async fn quote(&self, product_id: &str, values: &PromptValues) -> AppResult<PriceQuote> {
        let product_id = NonEmptyString::new(product_id)?;
        let product = self
            .pricing_engine
            .fetch_product(product_id.as_str())
            .await?;
        Self::ensure_product_object(product_id.as_str(), &product)?;

        let fields = extract_prompts(&product);
        let missing = missing_required(&fields, values);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "product '{}' is missing required prompts: {}",
                product_id.as_str(),
                missing.join(", ")
            )));
        }

        let inputs = pricing_inputs(&fields, values);
        let response = self
            .pricing_engine
            .request_price(PriceRequest {
                product_id: product_id.as_str().to_owned(),
                inputs: inputs.clone(),
            })
            .await?;

        Ok(PriceQuote {
            product_id: product_id.into(),
            inputs,
            outputs: extract_outputs(&response),
            quoted_at: Utc::now(),
        })
    }
}
