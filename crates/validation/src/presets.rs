//! Canned form inputs.

use std::str::FromStr;

use common::protocol::FormFields;
use common::{Algorithm, InputType, Mode, Padding, ParseEnumError};

const SAMPLE_KEY: &str = "0123456789ABCDEF";
const SAMPLE_IV: &str = "0001020304050607";
const SAMPLE_BLOCK: &str = "1122334455667788";

/// A named starting point for the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// What a fresh form shows: 2-key 3DES in CBC over one sample block.
    Default,
    /// 3-key 3DES in CBC with PKCS5 padding.
    TripleDesCbc,
    /// Resets the payload to one hex DES block and leaves the rest of the form alone.
    SampleBlock,
}

impl Preset {
    pub const ALL: &'static [Preset] = &[Preset::Default, Preset::TripleDesCbc, Preset::SampleBlock];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::TripleDesCbc => "3des-cbc",
            Preset::SampleBlock => "sample-block",
        }
    }

    /// The preset applied to a fresh form.
    pub fn fields(&self) -> FormFields {
        self.apply(base_form())
    }

    /// Apply the preset to `form`. `SampleBlock` touches only the payload;
    /// the others replace every field.
    pub fn apply(&self, form: FormFields) -> FormFields {
        match self {
            Preset::Default => base_form(),
            Preset::TripleDesCbc => FormFields {
                key2: "FEDCBA9876543210".into(),
                key3: "89ABCDEF01234567".into(),
                ..base_form()
            },
            Preset::SampleBlock => FormFields {
                data: SAMPLE_BLOCK.into(),
                input_type: InputType::Hex,
                ..form
            },
        }
    }
}

fn base_form() -> FormFields {
    FormFields {
        algorithm: Algorithm::DesEde,
        mode: Mode::Cbc,
        padding: Padding::Pkcs5,
        key1: SAMPLE_KEY.into(),
        key2: SAMPLE_KEY.into(),
        key3: String::new(),
        iv: Some(SAMPLE_IV.into()),
        tag_length: Some(128),
        data: SAMPLE_BLOCK.into(),
        input_type: InputType::Hex,
    }
}

impl FromStr for Preset {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "preset",
                value: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize, validate};

    #[test]
    fn every_preset_is_admissible() {
        for preset in Preset::ALL {
            let report = validate(&normalize(&preset.fields()));
            assert!(report.is_admissible(), "{}: {}", preset.name(), report.joined());
        }
    }

    #[test]
    fn names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), *preset);
        }
        assert!("aes-gcm".parse::<Preset>().is_err());
    }

    #[test]
    fn three_key_preset_assembles_48_chars() {
        let req = normalize(&Preset::TripleDesCbc.fields());
        assert_eq!(req.key.len(), 48);
    }

    #[test]
    fn sample_block_keeps_the_rest_of_the_form() {
        let form = FormFields {
            algorithm: Algorithm::Aes,
            mode: Mode::Gcm,
            key1: "00112233445566778899AABBCCDDEEFF".into(),
            data: "hello".into(),
            input_type: InputType::Text,
            ..base_form()
        };
        let out = Preset::SampleBlock.apply(form);
        assert_eq!(out.algorithm, Algorithm::Aes);
        assert_eq!(out.mode, Mode::Gcm);
        assert_eq!(out.key1, "00112233445566778899AABBCCDDEEFF");
        assert_eq!(out.data, SAMPLE_BLOCK);
        assert_eq!(out.input_type, InputType::Hex);
    }

    #[test]
    fn full_presets_ignore_the_current_form() {
        let form = FormFields {
            algorithm: Algorithm::Aes,
            ..base_form()
        };
        assert_eq!(Preset::TripleDesCbc.apply(form).algorithm, Algorithm::DesEde);
    }
}
