mod conversions;
mod types;

pub use conversions::prompt_values_from_request;
pub use types::{
    EvaluatePromptsRequest, ExtractPromptsRequest, ExtractPromptsResponse, PriceQuoteResponse,
    PricingOutputResponse, ProductPromptsResponse, PromptEvaluationResponse, PromptFieldResponse,
    PromptOptionResponse, PromptSelectionResponse, QuoteRequest,
};
