//! Common types, protocol definitions, and errors shared across `cipher-gate` crates.

pub mod error;
pub mod protocol;
pub mod types;

pub use error::ServiceError;
pub use types::{Algorithm, InputType, Mode, Padding, ParseEnumError};
