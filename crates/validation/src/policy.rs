//! Switches for the parts of the rule table where reasonable deployments differ.

use std::str::FromStr;

use common::ParseEnumError;
use serde::Deserialize;

/// How DESX chaining modes treat the IV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum DesxIvPolicy {
    /// Same as DES and 3DES: CBC/CFB/OFB need an 8-byte IV.
    #[default]
    Standard,
    /// DESX is treated as ECB-like and the IV is neither required nor measured.
    Exempt,
}

impl FromStr for DesxIvPolicy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(DesxIvPolicy::Standard),
            "exempt" => Ok(DesxIvPolicy::Exempt),
            _ => Err(ParseEnumError {
                kind: "DESX IV policy",
                value: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for DesxIvPolicy {
    type Error = ParseEnumError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Validation policy. [`Policy::default`] gives the baseline rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub desx_iv: DesxIvPolicy,
    /// Reject AES-ECB with `NoPadding`.
    pub aes_ecb_requires_padding: bool,
    /// Require a 16-byte IV for AES CBC/CFB/OFB/CTR.
    pub strict_aes_iv_length: bool,
}
