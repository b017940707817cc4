//! Axum router construction.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/validate", post(handlers::validate))
        .route("/encrypt", post(handlers::encrypt))
        .route("/decrypt", post(handlers::decrypt))
        .route(
            "/presets/:name",
            get(handlers::preset).post(handlers::apply_preset),
        )
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    middleware::REQUEST_ID_HEADER,
                    MakeRequestUuid,
                ))
                .layer(TraceLayer::new_for_http().make_span_with(middleware::make_span))
                .layer(PropagateRequestIdLayer::new(middleware::REQUEST_ID_HEADER))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downstream::CipherClient;
    use axum_test::TestServer;
    use validation::Validator;

    fn server() -> TestServer {
        let state = AppState::new(
            Validator::default(),
            CipherClient::new("http://127.0.0.1:9", Duration::from_secs(1)),
        );
        TestServer::new(build(state, Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let resp = server().get("/unknown").await;
        assert_eq!(resp.status_code(), 404);
    }

    #[tokio::test]
    async fn health_route_exists() {
        let resp = server().get("/health").await;
        assert_eq!(resp.status_code(), 200);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let resp = server().get("/health").await;
        let id = resp.header(middleware::REQUEST_ID_HEADER);
        assert_eq!(id.to_str().unwrap().len(), 36);
    }
}
