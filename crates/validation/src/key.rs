//! Key assembly: folds the form's one to three hex fragments into one key string.
//!
//! No checking happens here. A mis-sized or non-hex result is reported by the
//! rule engine, which knows what the algorithm expects.

use common::Algorithm;

/// Combine key fragments according to `algorithm`.
///
/// - DES and AES use `key1` alone.
/// - 3DES uses `key1 + key2`, plus `key3` when it is non-blank (2-key vs 3-key).
/// - DESX always uses all three (pre-whitening, core, post-whitening).
pub fn assemble(algorithm: Algorithm, key1: &str, key2: &str, key3: &str) -> String {
    match algorithm {
        Algorithm::Des | Algorithm::Aes => key1.to_owned(),
        Algorithm::DesEde => {
            let mut key = String::with_capacity(key1.len() + key2.len() + key3.len());
            key.push_str(key1);
            key.push_str(key2);
            if !key3.trim().is_empty() {
                key.push_str(key3);
            }
            key
        }
        Algorithm::Desx => [key1, key2, key3].concat(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K1: &str = "0123456789ABCDEF";
    const K2: &str = "FEDCBA9876543210";
    const K3: &str = "89ABCDEF01234567";

    #[test]
    fn des_ignores_extra_fragments() {
        assert_eq!(assemble(Algorithm::Des, K1, K2, K3), K1);
    }

    #[test]
    fn aes_uses_first_fragment_only() {
        assert_eq!(assemble(Algorithm::Aes, K1, K2, K3), K1);
    }

    #[test]
    fn triple_des_three_key() {
        let key = assemble(Algorithm::DesEde, K1, K2, K3);
        assert_eq!(key.len(), 48);
        assert_eq!(key, format!("{K1}{K2}{K3}"));
    }

    #[test]
    fn triple_des_two_key_when_third_blank() {
        assert_eq!(assemble(Algorithm::DesEde, K1, K2, ""), format!("{K1}{K2}"));
        assert_eq!(assemble(Algorithm::DesEde, K1, K2, "   "), format!("{K1}{K2}"));
    }

    #[test]
    fn desx_concatenates_unconditionally() {
        assert_eq!(assemble(Algorithm::Desx, K1, K2, K3).len(), 48);
        // A blank third fragment is kept, leaving the key short for the engine to flag.
        assert_eq!(assemble(Algorithm::Desx, K1, K2, ""), format!("{K1}{K2}"));
    }
}
