//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Keep the rule engine pure: handlers normalise and validate, and only an
//!   admissible request ever reaches the cipher service.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
