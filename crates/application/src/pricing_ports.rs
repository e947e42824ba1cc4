use async_trait::async_trait;
use printquote_core::AppResult;
use printquote_domain::PromptSelection;
use serde::Serialize;
use serde_json::Value;

/// Price calculation request submitted to the pricing engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRequest {
    /// Product identifier in the pricing engine catalog.
    pub product_id: String,
    /// Visible prompt selections in definition order.
    pub inputs: Vec<PromptSelection>,
}

/// Port for the external pricing engine.
///
/// Responses are returned as raw JSON: their shape is owned by the engine
/// and interpreted by the prompt and output extractors.
#[async_trait]
pub trait PricingEngine: Send + Sync {
    /// Fetches one raw product definition.
    async fn fetch_product(&self, product_id: &str) -> AppResult<Value>;

    /// Requests a price calculation for a set of prompt selections.
    async fn request_price(&self, request: PriceRequest) -> AppResult<Value>;
}
