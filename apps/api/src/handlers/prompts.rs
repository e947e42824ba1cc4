use axum::Json;
use printquote_application::ProductConfigurationService;
use printquote_domain::extract_prompts;

use crate::dto::{
    EvaluatePromptsRequest, ExtractPromptsRequest, ExtractPromptsResponse,
    PromptEvaluationResponse, prompt_values_from_request,
};
use crate::error::ApiResult;

pub async fn extract_prompts_handler(
    Json(payload): Json<ExtractPromptsRequest>,
) -> Json<ExtractPromptsResponse> {
    Json(ExtractPromptsResponse::from(extract_prompts(&payload.product)))
}

pub async fn evaluate_prompts_handler(
    Json(payload): Json<EvaluatePromptsRequest>,
) -> ApiResult<Json<PromptEvaluationResponse>> {
    let values = prompt_values_from_request(&payload.values)?;
    let evaluation = ProductConfigurationService::evaluate_prompts(&payload.product, &values);

    Ok(Json(PromptEvaluationResponse::from(evaluation)))
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    use super::{evaluate_prompts_handler, extract_prompts_handler};
    use crate::dto::{EvaluatePromptsRequest, ExtractPromptsRequest};

    fn product() -> serde_json::Value {
        json!({
            "prompts": [
                {"id": "qty", "label": "Quantity", "type": "int", "required": true},
                {"id": "paper", "choices": [{"value": "matte"}, {"value": "gloss"}]},
                {"id": "varnish", "options": ["none", "spot"], "visibleWhen": "paper=gloss"},
            ],
            "inputs": [{"id": "ignored"}],
        })
    }

    #[tokio::test]
    async fn extract_returns_canonical_fields() {
        let Json(payload) = extract_prompts_handler(Json(ExtractPromptsRequest {
            product: product(),
        }))
        .await;

        let ids: Vec<&str> = payload.fields.iter().map(|field| field.id.as_str()).collect();
        assert_eq!(ids, vec!["qty", "paper", "varnish"]);
        assert_eq!(payload.fields[0].field_type, "integer");
        assert_eq!(payload.fields[0].step, Some(1.0));
        assert_eq!(payload.fields[1].options[1].label, "gloss");
    }

    #[tokio::test]
    async fn extract_tolerates_non_object_products() {
        let Json(payload) = extract_prompts_handler(Json(ExtractPromptsRequest {
            product: json!("flyer"),
        }))
        .await;

        assert!(payload.fields.is_empty());
    }

    #[tokio::test]
    async fn evaluate_partitions_prompts_by_visibility() {
        let response = evaluate_prompts_handler(Json(EvaluatePromptsRequest {
            product: product(),
            values: json!({"paper": "matte"}),
        }))
        .await;

        let Json(payload) = response.unwrap_or_else(|_| unreachable!());
        assert_eq!(payload.visible, vec!["qty".to_owned(), "paper".to_owned()]);
        assert_eq!(payload.hidden, vec!["varnish".to_owned()]);
        assert_eq!(payload.missing_required, vec!["qty".to_owned()]);
        assert_eq!(payload.inputs.len(), 1);
        assert_eq!(payload.inputs[0].id, "paper");
    }

    #[tokio::test]
    async fn evaluate_rejects_non_object_values() {
        let response = evaluate_prompts_handler(Json(EvaluatePromptsRequest {
            product: product(),
            values: json!("paper=gloss"),
        }))
        .await;

        match response {
            Err(error) => assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST),
            Ok(_) => unreachable!(),
        }
    }
}
