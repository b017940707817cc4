//! The canonical cipher request: what gets validated and, if admissible, submitted.

use common::{Algorithm, InputType, Mode, Padding};
use serde::Serialize;

/// A normalised cipher request.
///
/// Serialises in the shape the downstream cipher service expects. `iv` and
/// `tagLength` are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CipherRequest {
    pub algorithm: Algorithm,
    /// Assembled key, hex.
    pub key: String,
    pub mode: Mode,
    pub padding: Padding,
    pub data: String,
    /// IV or nonce, hex. `None` when the field was blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    pub input_type: InputType,
    /// Tag length in bits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_length: Option<u32>,
}
