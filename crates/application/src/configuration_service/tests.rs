use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use printquote_core::{AppError, AppResult};
use printquote_domain::{PromptFieldType, PromptSelection, PromptValue, PromptValues};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::{PriceRequest, PricingEngine};

use super::ProductConfigurationService;

struct FakePricingEngine {
    products: HashMap<String, Value>,
    price_response: Value,
    price_requests: Mutex<Vec<PriceRequest>>,
}

impl FakePricingEngine {
    fn new() -> Self {
        Self {
            products: HashMap::from([
                (
                    "flyer".to_owned(),
                    json!({
                        "name": "Flyer",
                        "prompts": [
                            {"id": "qty", "type": "integer", "required": true, "default": 250},
                            {"id": "paper", "options": ["matte", "gloss"], "required": true},
                            {
                                "id": "varnish",
                                "options": ["none", "spot"],
                                "visibility": "paper=gloss",
                            },
                            {
                                "id": "fold",
                                "options": ["half", "z"],
                                "hiddenWhen": {"paper": "matte"},
                                "default": "half",
                            },
                        ],
                    }),
                ),
                ("broken".to_owned(), json!("not a product")),
            ]),
            price_response: json!({
                "outputs": [
                    {"id": "price", "label": "Price", "value": 42.5, "unit": "EUR"},
                    {"id": "sheets", "value": 13},
                ],
            }),
            price_requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PricingEngine for FakePricingEngine {
    async fn fetch_product(&self, product_id: &str) -> AppResult<Value> {
        self.products
            .get(product_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("product '{product_id}' does not exist")))
    }

    async fn request_price(&self, request: PriceRequest) -> AppResult<Value> {
        self.price_requests.lock().await.push(request);
        Ok(self.price_response.clone())
    }
}

fn service() -> (ProductConfigurationService, Arc<FakePricingEngine>) {
    let engine = Arc::new(FakePricingEngine::new());
    (ProductConfigurationService::new(engine.clone()), engine)
}

#[tokio::test]
async fn product_prompts_extracts_fields_and_name() {
    let (service, _) = service();

    let prompts = service
        .product_prompts("flyer")
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(prompts.product_id, "flyer");
    assert_eq!(prompts.name.as_deref(), Some("Flyer"));
    assert_eq!(prompts.fields.len(), 4);
    assert_eq!(prompts.fields[0].field_type(), PromptFieldType::Integer);
    assert_eq!(prompts.fields[1].field_type(), PromptFieldType::Select);
}

#[tokio::test]
async fn product_prompts_propagates_not_found() {
    let (service, _) = service();

    let result = service.product_prompts("poster").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn product_prompts_rejects_blank_ids_and_non_object_definitions() {
    let (service, _) = service();

    assert!(matches!(
        service.product_prompts("  ").await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.product_prompts("broken").await,
        Err(AppError::Internal(_))
    ));
}

#[tokio::test]
async fn quote_submits_visible_values_and_defaults() {
    let (service, engine) = service();
    let values: PromptValues = [
        ("paper", PromptValue::from("gloss")),
        ("varnish", "spot".into()),
    ]
    .into_iter()
    .collect();

    let quote = service
        .quote("flyer", &values)
        .await
        .unwrap_or_else(|_| unreachable!());

    let expected_inputs = vec![
        PromptSelection {
            id: "qty".to_owned(),
            value: json!(250),
        },
        PromptSelection {
            id: "paper".to_owned(),
            value: json!("gloss"),
        },
        PromptSelection {
            id: "varnish".to_owned(),
            value: json!("spot"),
        },
        PromptSelection {
            id: "fold".to_owned(),
            value: json!("half"),
        },
    ];
    assert_eq!(quote.inputs, expected_inputs);
    assert_eq!(quote.outputs.len(), 2);
    assert_eq!(quote.outputs[0].unit(), Some("EUR"));

    let requests = engine.price_requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].product_id, "flyer");
    assert_eq!(requests[0].inputs, expected_inputs);
}

#[tokio::test]
async fn quote_skips_hidden_prompts() {
    let (service, engine) = service();
    let values: PromptValues = [("paper", "matte"), ("varnish", "spot"), ("fold", "z")]
        .into_iter()
        .collect();

    let quote = service
        .quote("flyer", &values)
        .await
        .unwrap_or_else(|_| unreachable!());

    let ids: Vec<&str> = quote.inputs.iter().map(|input| input.id.as_str()).collect();
    assert_eq!(ids, vec!["qty", "paper"]);
    assert_eq!(engine.price_requests.lock().await.len(), 1);
}

#[tokio::test]
async fn quote_rejects_missing_required_prompts_before_pricing() {
    let (service, engine) = service();

    let result = service.quote("flyer", &PromptValues::new()).await;

    match result {
        Err(AppError::Validation(message)) => assert!(message.contains("paper")),
        _ => unreachable!(),
    }
    assert!(engine.price_requests.lock().await.is_empty());
}

#[test]
fn evaluate_prompts_partitions_fields() {
    let product = json!({
        "fields": [
            {"id": "format", "options": ["A5", "A4"], "required": true},
            {
                "id": "fold",
                "options": ["half"],
                "visibility": {"field": "format", "equals": ["A4", "A3"]},
            },
            {"id": "notes", "hiddenWhen": true},
        ],
    });
    let values: PromptValues = [("format", "A5")].into_iter().collect();

    let evaluation = ProductConfigurationService::evaluate_prompts(&product, &values);

    assert_eq!(evaluation.visible, vec!["format".to_owned()]);
    assert_eq!(evaluation.hidden, vec!["fold".to_owned(), "notes".to_owned()]);
    assert!(evaluation.missing_required.is_empty());
    assert_eq!(evaluation.inputs.len(), 1);
}
