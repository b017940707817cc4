//! Cipher parameter enums shared by the form, the validator, and the gateway.
//!
//! Every enum serialises, parses, and displays using the exact spelling the
//! form and the downstream cipher service exchange (`"DESede"`, `"PKCS5"`,
//! `"hex"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum was being parsed (e.g. `"algorithm"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Generates `as_str`, `Display`, and `FromStr` from a single spelling table.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// The wire spelling of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($ty::$variant),)+
                    other => Err(ParseEnumError {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Symmetric cipher family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Single DES, 8-byte key.
    #[serde(rename = "DES")]
    Des,
    /// Triple DES with a 2-key (16 bytes) or 3-key (24 bytes) bundle.
    #[serde(rename = "DESede")]
    DesEde,
    /// DES with pre- and post-whitening keys, 24 bytes in total.
    #[serde(rename = "DESX")]
    Desx,
    /// AES-128/192/256.
    #[serde(rename = "AES")]
    Aes,
}

wire_enum!(Algorithm, "algorithm", {
    Des => "DES",
    DesEde => "DESede",
    Desx => "DESX",
    Aes => "AES",
});

impl Algorithm {
    /// `true` for the DES, 3DES and DESX family.
    pub fn is_des_family(&self) -> bool {
        !matches!(self, Algorithm::Aes)
    }
}

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "ECB")]
    Ecb,
    #[serde(rename = "CBC")]
    Cbc,
    #[serde(rename = "CFB")]
    Cfb,
    #[serde(rename = "OFB")]
    Ofb,
    #[serde(rename = "CTR")]
    Ctr,
    #[serde(rename = "GCM")]
    Gcm,
    #[serde(rename = "CCM")]
    Ccm,
}

wire_enum!(Mode, "mode", {
    Ecb => "ECB",
    Cbc => "CBC",
    Cfb => "CFB",
    Ofb => "OFB",
    Ctr => "CTR",
    Gcm => "GCM",
    Ccm => "CCM",
});

impl Mode {
    /// Authenticated modes that carry a nonce and a tag.
    pub fn is_aead(&self) -> bool {
        matches!(self, Mode::Gcm | Mode::Ccm)
    }
}

/// Block padding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Padding {
    NoPadding,
    #[serde(rename = "PKCS5")]
    Pkcs5,
    #[serde(rename = "ISO9797_M1")]
    Iso9797M1,
    #[serde(rename = "ISO9797_M2")]
    Iso9797M2,
}

wire_enum!(Padding, "padding", {
    NoPadding => "NoPadding",
    Pkcs5 => "PKCS5",
    Iso9797M1 => "ISO9797_M1",
    Iso9797M2 => "ISO9797_M2",
});

/// How the payload string is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Hex,
    Text,
}

wire_enum!(InputType, "input type", {
    Hex => "hex",
    Text => "text",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_wire_spelling() {
        assert_eq!(serde_json::to_string(&Algorithm::DesEde).unwrap(), "\"DESede\"");
        assert_eq!("DESX".parse::<Algorithm>().unwrap(), Algorithm::Desx);
        assert_eq!(Algorithm::Aes.to_string(), "AES");
    }

    #[test]
    fn display_matches_serde_for_every_variant() {
        for m in Mode::ALL {
            let json = serde_json::to_string(m).unwrap();
            assert_eq!(json, format!("\"{m}\""));
        }
        for p in Padding::ALL {
            let json = serde_json::to_string(p).unwrap();
            assert_eq!(json, format!("\"{p}\""));
        }
        for i in InputType::ALL {
            let json = serde_json::to_string(i).unwrap();
            assert_eq!(json, format!("\"{i}\""));
        }
    }

    #[test]
    fn parse_rejects_unknown_spelling() {
        let err = "des".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.kind, "algorithm");
        assert!(err.to_string().contains("des"));
        assert!("XTS".parse::<Mode>().is_err());
        assert!(serde_json::from_str::<Padding>("\"PKCS7\"").is_err());
    }

    #[test]
    fn aead_modes() {
        let aead: Vec<_> = Mode::ALL.iter().filter(|m| m.is_aead()).collect();
        assert_eq!(aead, vec![&Mode::Gcm, &Mode::Ccm]);
    }

    #[test]
    fn des_family() {
        assert!(Algorithm::Des.is_des_family());
        assert!(Algorithm::Desx.is_des_family());
        assert!(!Algorithm::Aes.is_des_family());
    }
}
