//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_easyquote_client;
mod in_memory_pricing_engine;

pub use http_easyquote_client::{EasyQuoteConfig, HttpEasyQuoteClient};
pub use in_memory_pricing_engine::InMemoryPricingEngine;
