mod pricing_engine;

pub use pricing_engine::build_app_state;
