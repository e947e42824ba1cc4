use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use printquote_application::{PriceRequest, PricingEngine};
use printquote_core::{AppError, AppResult};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory pricing engine backed by canned product definitions.
#[derive(Debug, Default)]
pub struct InMemoryPricingEngine {
    products: RwLock<HashMap<String, Value>>,
    price_responses: RwLock<HashMap<String, Value>>,
}

/// Catalog file layout accepted by [`InMemoryPricingEngine::from_catalog`].
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
struct CatalogProduct {
    id: String,
    definition: Value,
    #[serde(default)]
    price_response: Option<Value>,
}

impl InMemoryPricingEngine {
    /// Creates an empty in-memory pricing engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(HashMap::new()),
            price_responses: RwLock::new(HashMap::new()),
        }
    }

    /// Builds an engine from a catalog document.
    ///
    /// Expected shape: `{"products": [{"id", "definition", "price_response"?}]}`.
    pub fn from_catalog(catalog: Value) -> AppResult<Self> {
        let catalog: CatalogFile = serde_json::from_value(catalog)
            .map_err(|error| AppError::Validation(format!("invalid pricing catalog: {error}")))?;

        let mut products = HashMap::new();
        let mut price_responses = HashMap::new();
        for product in catalog.products {
            if product.id.trim().is_empty() {
                return Err(AppError::Validation(
                    "pricing catalog product id must not be empty".to_owned(),
                ));
            }
            if products.contains_key(&product.id) {
                return Err(AppError::Conflict(format!(
                    "pricing catalog lists product '{}' more than once",
                    product.id
                )));
            }

            if let Some(price_response) = product.price_response {
                price_responses.insert(product.id.clone(), price_response);
            }
            products.insert(product.id, product.definition);
        }

        Ok(Self {
            products: RwLock::new(products),
            price_responses: RwLock::new(price_responses),
        })
    }

    /// Loads a catalog document from a JSON file.
    pub async fn load_catalog_file(path: &Path) -> AppResult<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read pricing catalog '{}': {error}",
                path.display()
            ))
        })?;
        let catalog: Value = serde_json::from_str(contents.as_str()).map_err(|error| {
            AppError::Validation(format!(
                "pricing catalog '{}' is not valid JSON: {error}",
                path.display()
            ))
        })?;

        let engine = Self::from_catalog(catalog)?;
        info!(
            path = %path.display(),
            products = engine.products.read().await.len(),
            "loaded in-memory pricing catalog"
        );

        Ok(engine)
    }

    /// Stores or replaces one product definition and its canned price response.
    pub async fn insert_product(
        &self,
        product_id: impl Into<String>,
        definition: Value,
        price_response: Option<Value>,
    ) {
        let product_id = product_id.into();
        let mut price_responses = self.price_responses.write().await;
        match price_response {
            Some(price_response) => {
                price_responses.insert(product_id.clone(), price_response);
            }
            None => {
                price_responses.remove(&product_id);
            }
        }

        self.products.write().await.insert(product_id, definition);
    }
}

#[async_trait]
impl PricingEngine for InMemoryPricingEngine {
    async fn fetch_product(&self, product_id: &str) -> AppResult<Value> {
        self.products
            .read()
            .await
            .get(product_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product '{product_id}' does not exist")))
    }

    async fn request_price(&self, request: PriceRequest) -> AppResult<Value> {
        if !self
            .products
            .read()
            .await
            .contains_key(request.product_id.as_str())
        {
            return Err(AppError::NotFound(format!(
                "product '{}' does not exist",
                request.product_id
            )));
        }

        self.price_responses
            .read()
            .await
            .get(request.product_id.as_str())
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no price response configured for product '{}'",
                    request.product_id
                ))
            })
    }
}

#[cfg(test)]
mod tests;
