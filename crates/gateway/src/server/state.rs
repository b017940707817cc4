//! Shared application state injected into every Axum handler.

use validation::Validator;

use crate::downstream::CipherClient;

/// Application state shared across all request handlers.
///
/// Both fields are cheap to clone: the validator is `Copy` and the client is
/// `Arc`-backed, so Axum can clone the state per request.
#[derive(Clone)]
pub struct AppState {
    /// Rule engine bound to the configured policy.
    pub validator: Validator,
    /// Client for the external cipher service.
    pub client: CipherClient,
}

impl AppState {
    pub fn new(validator: Validator, client: CipherClient) -> Self {
        Self { validator, client }
    }
}
