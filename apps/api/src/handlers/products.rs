use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{
    PriceQuoteResponse, ProductPromptsResponse, QuoteRequest, prompt_values_from_request,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn product_prompts_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Json<ProductPromptsResponse>> {
    let prompts = state
        .configuration_service
        .product_prompts(product_id.as_str())
        .await?;

    Ok(Json(ProductPromptsResponse::from(prompts)))
}

pub async fn quote_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(payload): Json<QuoteRequest>,
) -> ApiResult<Json<PriceQuoteResponse>> {
    let values = prompt_values_from_request(&payload.values)?;
    let quote = state
        .configuration_service
        .quote(product_id.as_str(), &values)
        .await?;

    Ok(Json(PriceQuoteResponse::from(quote)))
}
