use std::sync::Arc;

use printquote_application::{PricingEngine, ProductConfigurationService};
use printquote_core::AppError;
use printquote_infrastructure::{EasyQuoteConfig, HttpEasyQuoteClient, InMemoryPricingEngine};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, EasyQuoteRuntimeConfig, PricingEngineConfig};
use crate::state::AppState;

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let pricing_engine = build_pricing_engine(&config.pricing_engine).await?;

    Ok(AppState {
        configuration_service: ProductConfigurationService::new(pricing_engine),
    })
}

async fn build_pricing_engine(
    config: &PricingEngineConfig,
) -> Result<Arc<dyn PricingEngine>, AppError> {
    match config {
        PricingEngineConfig::Http(easyquote) => {
            let client = build_easyquote_client(easyquote)?;
            info!(base_url = %easyquote.base_url, "using EasyQuote pricing engine");
            Ok(Arc::new(client))
        }
        PricingEngineConfig::Memory {
            catalog_file: Some(path),
        } => Ok(Arc::new(
            InMemoryPricingEngine::load_catalog_file(path.as_path()).await?,
        )),
        PricingEngineConfig::Memory { catalog_file: None } => {
            warn!(
                "using empty in-memory pricing engine; set PRICING_CATALOG_FILE to seed products"
            );
            Ok(Arc::new(InMemoryPricingEngine::new()))
        }
    }
}

fn build_easyquote_client(
    config: &EasyQuoteRuntimeConfig,
) -> Result<HttpEasyQuoteClient, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    Ok(HttpEasyQuoteClient::new(
        http_client,
        EasyQuoteConfig {
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
        },
    ))
}
