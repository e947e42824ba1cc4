use async_trait::async_trait;
use printquote_application::{PriceRequest, PricingEngine};
use printquote_core::{AppError, AppResult};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

/// Connection settings for the EasyQuote pricing API.
#[derive(Debug, Clone)]
pub struct EasyQuoteConfig {
    /// API root, for example `https://api.easyquote.example/v1/`.
    pub base_url: Url,
    /// Optional bearer token sent with every request.
    pub api_token: Option<String>,
}

/// HTTP implementation of the pricing engine port backed by EasyQuote.
///
/// Every call is a single round trip; failures surface immediately.
pub struct HttpEasyQuoteClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpEasyQuoteClient {
    /// Creates a new EasyQuote client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: EasyQuoteConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url,
            api_token: config.api_token.filter(|token| !token.trim().is_empty()),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Internal(format!(
                    "EasyQuote base URL '{}' cannot carry path segments",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn send(&self, builder: reqwest::RequestBuilder, context: &str) -> AppResult<Value> {
        let builder = match self.api_token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(|error| {
            warn!(%error, context, "easyquote request failed");
            AppError::Internal(format!("{context}: transport error: {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            warn!(%status, context, "easyquote returned an error status");
            return Err(error_for_status(status, body.as_str(), context));
        }

        debug!(%status, context, "easyquote request succeeded");
        response.json::<Value>().await.map_err(|error| {
            AppError::Internal(format!("{context}: invalid JSON response: {error}"))
        })
    }
}

/// Maps a non-success EasyQuote status to an application error.
fn error_for_status(status: StatusCode, body: &str, context: &str) -> AppError {
    let message = format!("{context}: EasyQuote responded with status {status}: {body}");

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(message),
        StatusCode::FORBIDDEN => AppError::Forbidden(message),
        status if status.is_client_error() => AppError::Validation(message),
        _ => AppError::Internal(message),
    }
}

#[async_trait]
impl PricingEngine for HttpEasyQuoteClient {
    async fn fetch_product(&self, product_id: &str) -> AppResult<Value> {
        let url = self.endpoint(&["products", product_id])?;
        let context = format!("fetch product '{product_id}'");

        self.send(self.http_client.get(url), context.as_str()).await
    }

    async fn request_price(&self, request: PriceRequest) -> AppResult<Value> {
        let url = self.endpoint(&["products", request.product_id.as_str(), "price"])?;
        let context = format!("price product '{}'", request.product_id);

        self.send(
            self.http_client
                .post(url)
                .json(&json!({ "inputs": request.inputs })),
            context.as_str(),
        )
        .await
    }
}
