use axum::Router;
use axum::routing::{get, post};
use printquote_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let prompt_routes = Router::new()
        .route(
            "/api/prompts/extract",
            post(handlers::prompts::extract_prompts_handler),
        )
        .route(
            "/api/prompts/evaluate",
            post(handlers::prompts::evaluate_prompts_handler),
        );

    let product_routes = Router::new()
        .route(
            "/api/products/{product_id}/prompts",
            get(handlers::products::product_prompts_handler),
        )
        .route(
            "/api/products/{product_id}/quote",
            post(handlers::products::quote_product_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(prompt_routes)
        .merge(product_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
