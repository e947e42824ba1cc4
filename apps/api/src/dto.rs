mod common;
mod prompts;

pub use common::HealthResponse;
pub use prompts::{
    EvaluatePromptsRequest, ExtractPromptsRequest, ExtractPromptsResponse, PriceQuoteResponse,
    PricingOutputResponse, ProductPromptsResponse, PromptEvaluationResponse, PromptFieldResponse,
    PromptOptionResponse, PromptSelectionResponse, QuoteRequest, prompt_values_from_request,
};
