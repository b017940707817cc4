//! Cipher request preparation and parameter validation.
//!
//! The pipeline runs leaves first:
//!
//! ```text
//! FormFields ──key::assemble──► normalize ──► CipherRequest ──validate──► Report
//! ```
//!
//! Everything here is pure and synchronous. The same input always yields the
//! same [`Report`], so re-validating on every edit is safe.
//!
//! # Module invariants
//!
//! - **No I/O.** Submitting an admissible request is the gateway's job.
//! - **No key material in logs.** Trace events carry algorithm, mode, and
//!   issue counts only.

pub mod engine;
pub mod key;
pub mod normalize;
pub mod policy;
pub mod presets;
pub mod report;
pub mod request;
pub mod rules;

pub use engine::{validate, validate_with, Validator};
pub use normalize::normalize;
pub use policy::{DesxIvPolicy, Policy};
pub use presets::Preset;
pub use report::{Field, Issue, IssueKind, Report, ValidationError};
pub use request::CipherRequest;
pub use rules::{ModeRule, RuleTable};
