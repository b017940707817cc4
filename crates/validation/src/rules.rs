//! The (algorithm, mode) decision table.
//!
//! Every supported pairing maps to a [`ModeRule`] describing its IV, padding,
//! and tag requirements. A pairing with no entry is unsupported.
//!
//! | algorithm    | ECB            | CBC          | CFB / OFB     | CTR           | GCM               | CCM              |
//! |--------------|----------------|--------------|---------------|---------------|-------------------|------------------|
//! | DES family   | IV ignored     | IV 8 bytes   | IV 8 bytes    | unsupported   | unsupported       | unsupported      |
//! | AES          | IV forbidden   | IV required  | IV, NoPadding | IV, NoPadding | IV 12/16, tag     | IV 7..=13, tag   |

use common::{Algorithm, Mode};

use crate::policy::{DesxIvPolicy, Policy};

/// DES block size, the required IV length for DES-family chaining modes.
pub const DES_BLOCK_LEN: usize = 8;

/// AES block size.
pub const AES_BLOCK_LEN: usize = 16;

/// GCM nonce lengths in bytes.
pub const GCM_NONCE_LENS: &[usize] = &[12, 16];

/// CCM nonce length bounds in bytes, inclusive.
pub const CCM_NONCE_MIN: usize = 7;
pub const CCM_NONCE_MAX: usize = 13;

/// GCM tag lengths in bits (NIST SP 800-38D).
pub const GCM_TAG_BITS: &[u32] = &[32, 64, 96, 104, 112, 120, 128];

/// CCM tag lengths in bits (NIST SP 800-38C).
pub const CCM_TAG_BITS: &[u32] = &[32, 48, 64, 80, 96, 112, 128];

/// Acceptable IV length, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IvLength {
    Any,
    Exact(usize),
    OneOf(&'static [usize]),
    /// Inclusive byte range.
    Between(usize, usize),
}

impl IvLength {
    /// Whether an IV of `hex_len` hex characters fits.
    ///
    /// Range bounds are compared in hex characters, so an odd length inside
    /// the range passes here and only fails the hex-syntax check.
    pub fn accepts(&self, hex_len: usize) -> bool {
        match *self {
            IvLength::Any => true,
            IvLength::Exact(n) => hex_len == n * 2,
            IvLength::OneOf(lens) => lens.iter().any(|n| hex_len == n * 2),
            IvLength::Between(min, max) => (min * 2..=max * 2).contains(&hex_len),
        }
    }
}

/// What the rule demands of the `iv` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IvRule {
    /// Not looked at.
    Ignored,
    /// Must be absent.
    Forbidden,
    /// Must be present, and when present must satisfy the length.
    Required(IvLength),
}

/// What the rule demands of the `padding` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingRule {
    Any,
    /// Stream-like and AEAD modes: only `NoPadding`.
    NoPaddingOnly,
    /// Anything but `NoPadding`.
    Required,
}

/// What the rule demands of the `tagLength` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    None,
    /// Must be present (non-zero) and one of the listed bit lengths.
    Required(&'static [u32]),
}

/// Requirements of one (algorithm, mode) pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRule {
    pub iv: IvRule,
    pub padding: PaddingRule,
    pub tag: TagRule,
}

impl ModeRule {
    fn new(iv: IvRule, padding: PaddingRule) -> Self {
        Self {
            iv,
            padding,
            tag: TagRule::None,
        }
    }

    fn with_tag(mut self, lens: &'static [u32]) -> Self {
        self.tag = TagRule::Required(lens);
        self
    }
}

/// Look up the rule for a pairing. `None` means the pairing is unsupported.
pub fn rule_for(algorithm: Algorithm, mode: Mode, policy: &Policy) -> Option<ModeRule> {
    if algorithm.is_des_family() {
        des_rule(algorithm, mode, policy)
    } else {
        Some(aes_rule(mode, policy))
    }
}

fn des_rule(algorithm: Algorithm, mode: Mode, policy: &Policy) -> Option<ModeRule> {
    let chaining_iv = if algorithm == Algorithm::Desx && policy.desx_iv == DesxIvPolicy::Exempt {
        IvRule::Ignored
    } else {
        IvRule::Required(IvLength::Exact(DES_BLOCK_LEN))
    };

    match mode {
        Mode::Ecb => Some(ModeRule::new(IvRule::Ignored, PaddingRule::Any)),
        Mode::Cbc | Mode::Cfb | Mode::Ofb => Some(ModeRule::new(chaining_iv, PaddingRule::Any)),
        Mode::Ctr | Mode::Gcm | Mode::Ccm => None,
    }
}

fn aes_rule(mode: Mode, policy: &Policy) -> ModeRule {
    let block_iv = if policy.strict_aes_iv_length {
        IvRule::Required(IvLength::Exact(AES_BLOCK_LEN))
    } else {
        IvRule::Required(IvLength::Any)
    };

    match mode {
        Mode::Ecb => {
            let padding = if policy.aes_ecb_requires_padding {
                PaddingRule::Required
            } else {
                PaddingRule::Any
            };
            ModeRule::new(IvRule::Forbidden, padding)
        }
        Mode::Cbc => ModeRule::new(block_iv, PaddingRule::Any),
        Mode::Cfb | Mode::Ofb | Mode::Ctr => ModeRule::new(block_iv, PaddingRule::NoPaddingOnly),
        Mode::Gcm => ModeRule::new(
            IvRule::Required(IvLength::OneOf(GCM_NONCE_LENS)),
            PaddingRule::NoPaddingOnly,
        )
        .with_tag(GCM_TAG_BITS),
        Mode::Ccm => ModeRule::new(
            IvRule::Required(IvLength::Between(CCM_NONCE_MIN, CCM_NONCE_MAX)),
            PaddingRule::NoPaddingOnly,
        )
        .with_tag(CCM_TAG_BITS),
    }
}

/// The full decision table under one policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTable {
    policy: Policy,
}

impl RuleTable {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn get(&self, algorithm: Algorithm, mode: Mode) -> Option<ModeRule> {
        rule_for(algorithm, mode, &self.policy)
    }

    /// Every (algorithm, mode) pairing with its rule, algorithms outermost.
    pub fn entries(&self) -> impl Iterator<Item = (Algorithm, Mode, Option<ModeRule>)> + '_ {
        Algorithm::ALL.iter().flat_map(move |&algorithm| {
            Mode::ALL
                .iter()
                .map(move |&mode| (algorithm, mode, self.get(algorithm, mode)))
        })
    }

    /// The modes with a rule for `algorithm`, in declaration order.
    pub fn supported_modes(&self, algorithm: Algorithm) -> Vec<Mode> {
        self.entries()
            .filter(|(alg, _, rule)| *alg == algorithm && rule.is_some())
            .map(|(_, mode, _)| mode)
            .collect()
    }
}
