//! Structured logging, with OpenTelemetry span export when a collector is configured.
//!
//! # Telemetry invariants
//!
//! - **No key material, IVs, or payload data** in any span attribute or log
//!   field. Algorithm, mode, status, and issue counts are fine.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_telemetry;
