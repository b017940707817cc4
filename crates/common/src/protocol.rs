//! Request and response types exchanged between components.
//!
//! These types are serialised as JSON, both on the gateway's public API and
//! on the channel to the downstream cipher service.

use serde::{Deserialize, Serialize};

use crate::types::{Algorithm, InputType, Mode, Padding};

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// Raw field values of the cipher form, exactly as a caller submits them.
///
/// Nothing here is trimmed or checked. The validation crate turns it into a
/// canonical request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub algorithm: Algorithm,
    pub mode: Mode,
    pub padding: Padding,

    /// First key fragment (the whole key for DES and AES).
    #[serde(default)]
    pub key1: String,
    /// Second key fragment (3DES, DESX).
    #[serde(default)]
    pub key2: String,
    /// Optional third key fragment (3-key 3DES, DESX post-whitening key).
    #[serde(default)]
    pub key3: String,

    /// IV or nonce, hex.
    #[serde(default)]
    pub iv: Option<String>,
    /// Authentication tag length in bits (GCM/CCM only).
    #[serde(default)]
    pub tag_length: Option<u32>,

    /// Payload to transform.
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub input_type: InputType,
}

// ---------------------------------------------------------------------------
// Downstream cipher service
// ---------------------------------------------------------------------------

/// Successful response body of the cipher service, relayed as-is by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherResult {
    pub cipher_text: String,
}

/// Failure body reported by the cipher service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFailure {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// One field-scoped problem, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueBody {
    /// Field name in form spelling (`"key"`, `"iv"`, `"tagLength"`, ...).
    pub field: String,
    /// `"syntax"`, `"constraint"` or `"unsupported"`.
    pub kind: String,
    pub message: String,
}

/// Response body for `POST /validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// `true` when there are no issues and the request may be submitted.
    pub admissible: bool,
    /// All issue messages joined for display; empty when admissible.
    pub message: String,
    pub issues: Vec<IssueBody>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"invalid_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
    /// Structured validation issues; empty for every other kind of failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<IssueBody>,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            issues: Vec::new(),
        }
    }

    /// Attach structured validation issues.
    pub fn with_issues(mut self, issues: Vec<IssueBody>) -> Self {
        self.issues = issues;
        self
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Base URL of the cipher service requests are forwarded to.
    pub downstream: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_fields_accept_camel_case_and_defaults() {
        let form: FormFields = serde_json::from_value(json!({
            "algorithm": "AES",
            "mode": "GCM",
            "padding": "NoPadding",
            "key1": "00112233445566778899AABBCCDDEEFF",
            "iv": "000102030405060708090A0B",
            "tagLength": 128,
            "data": "CAFE",
            "inputType": "hex"
        }))
        .unwrap();
        assert_eq!(form.algorithm, Algorithm::Aes);
        assert_eq!(form.tag_length, Some(128));
        assert!(form.key2.is_empty());
        assert!(form.key3.is_empty());
    }

    #[test]
    fn form_fields_reject_unknown_mode() {
        let res = serde_json::from_value::<FormFields>(json!({
            "algorithm": "DES",
            "mode": "XTS",
            "padding": "PKCS5"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn cipher_result_uses_cipher_text_key() {
        let r: CipherResult = serde_json::from_str(r#"{"cipherText":"ABCD"}"#).unwrap();
        assert_eq!(r.cipher_text, "ABCD");
    }

    #[test]
    fn error_response_omits_empty_issues() {
        let e = ErrorResponse::new("bad_request", "malformed JSON body");
        let v = serde_json::to_value(&e).unwrap();
        assert!(v.get("issues").is_none());
        assert_eq!(v["code"], "bad_request");
    }

    #[test]
    fn error_response_with_issues() {
        let e = ErrorResponse::new("invalid_request", "Key must be HEX").with_issues(vec![
            IssueBody {
                field: "key".into(),
                kind: "syntax".into(),
                message: "Key must be HEX".into(),
            },
        ]);
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["issues"][0]["field"], "key");
    }
}
