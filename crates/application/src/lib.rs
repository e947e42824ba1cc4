//! Application services and ports.

#![forbid(unsafe_code)]

mod configuration_service;
mod pricing_ports;

pub use configuration_service::{
    PriceQuote, ProductConfigurationService, ProductPrompts, PromptEvaluation,
};
pub use pricing_ports::{PriceRequest, PricingEngine};
