//! Relay to the external cipher service.
//!
//! The gateway never transforms data itself. Once a request passes
//! validation it is posted as JSON to the cipher service, and the service's
//! `cipherText` or `error` string is handed back to the caller unmodified.

pub mod client;

pub use client::{CipherClient, Operation};
