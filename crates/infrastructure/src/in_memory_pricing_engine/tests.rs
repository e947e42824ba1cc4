use printquote_application::{PriceRequest, PricingEngine};
use printquote_core::AppError;
use printquote_domain::PromptSelection;
use serde_json::json;

use super::InMemoryPricingEngine;

fn catalog() -> serde_json::Value {
    json!({
        "products": [
            {
                "id": "flyer",
                "definition": {"name": "Flyer", "prompts": [{"id": "qty", "type": "int"}]},
                "price_response": {"outputs": [{"id": "price", "value": 19.9}]},
            },
            {
                "id": "poster",
                "definition": {"name": "Poster", "inputs": []},
            },
        ],
    })
}

fn price_request(product_id: &str) -> PriceRequest {
    PriceRequest {
        product_id: product_id.to_owned(),
        inputs: vec![PromptSelection {
            id: "qty".to_owned(),
            value: json!(100),
        }],
    }
}

#[tokio::test]
async fn catalog_products_can_be_fetched() {
    let engine = InMemoryPricingEngine::from_catalog(catalog()).unwrap_or_else(|_| unreachable!());

    let product = engine.fetch_product("flyer").await;
    assert_eq!(
        product.ok().and_then(|product| product.get("name").cloned()),
        Some(json!("Flyer"))
    );
    assert!(matches!(
        engine.fetch_product("banner").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn canned_price_responses_are_returned() {
    let engine = InMemoryPricingEngine::from_catalog(catalog()).unwrap_or_else(|_| unreachable!());

    let response = engine.request_price(price_request("flyer")).await;
    assert_eq!(
        response.ok(),
        Some(json!({"outputs": [{"id": "price", "value": 19.9}]}))
    );
}

#[tokio::test]
async fn pricing_without_canned_response_is_not_found() {
    let engine = InMemoryPricingEngine::from_catalog(catalog()).unwrap_or_else(|_| unreachable!());

    assert!(matches!(
        engine.request_price(price_request("poster")).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        engine.request_price(price_request("banner")).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn insert_product_replaces_definition_and_response() {
    let engine = InMemoryPricingEngine::new();
    engine
        .insert_product("flyer", json!({"prompts": []}), Some(json!({"outputs": {}})))
        .await;
    engine
        .insert_product("flyer", json!({"prompts": [{"id": "qty"}]}), None)
        .await;

    let product = engine.fetch_product("flyer").await;
    assert_eq!(product.ok(), Some(json!({"prompts": [{"id": "qty"}]})));
    assert!(engine.request_price(price_request("flyer")).await.is_err());
}

#[test]
fn catalog_rejects_duplicates_and_bad_shapes() {
    let duplicated = json!({
        "products": [
            {"id": "flyer", "definition": {}},
            {"id": "flyer", "definition": {}},
        ],
    });
    assert!(matches!(
        InMemoryPricingEngine::from_catalog(duplicated),
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        InMemoryPricingEngine::from_catalog(json!({"items": []})),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        InMemoryPricingEngine::from_catalog(json!({"products": [{"id": " ", "definition": {}}]})),
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn missing_catalog_file_is_reported() {
    let result =
        InMemoryPricingEngine::load_catalog_file(std::path::Path::new("/nonexistent/catalog.json"))
            .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}
