use printquote_application::ProductConfigurationService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub configuration_service: ProductConfigurationService,
}
