//! The rule engine.
//!
//! Rule groups run in a fixed order and never short-circuit:
//!
//! 1. key syntax
//! 2. key length for the algorithm
//! 3. IV / nonce and tag length for the (algorithm, mode) rule, or one
//!    `unsupported` issue when the pairing has no rule
//! 4. padding compatibility with the mode
//! 5. payload encoding
//!
//! Every violated rule adds one issue, so the caller sees all problems at once.

use common::{Algorithm, InputType, Padding};
use tracing::debug;

use crate::policy::Policy;
use crate::report::{Field, Issue, Report};
use crate::request::CipherRequest;
use crate::rules::{IvLength, IvRule, ModeRule, PaddingRule, RuleTable, TagRule};

/// Validate `request` under the default policy.
pub fn validate(request: &CipherRequest) -> Report {
    Validator::default().validate(request)
}

/// Validate `request` under `policy`.
pub fn validate_with(request: &CipherRequest, policy: &Policy) -> Report {
    Validator::new(*policy).validate(request)
}

/// A rule engine bound to one policy. Cheap to copy and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    table: RuleTable,
}

impl Validator {
    pub fn new(policy: Policy) -> Self {
        Self {
            table: RuleTable::new(policy),
        }
    }

    /// Run every rule group against `request`.
    pub fn validate(&self, request: &CipherRequest) -> Report {
        let mut report = Report::new();

        check_key_syntax(request, &mut report);
        check_key_length(request, &mut report);
        match self.table.get(request.algorithm, request.mode) {
            Some(rule) => {
                check_iv(request, &rule, &mut report);
                check_tag_length(request, &rule, &mut report);
                check_padding(request, &rule, &mut report);
            }
            None => report.push(Issue::unsupported(
                Field::Mode,
                format!(
                    "{} mode is not supported for {} (supported: {})",
                    request.mode,
                    request.algorithm,
                    join(&self.table.supported_modes(request.algorithm)),
                ),
            )),
        }
        check_data(request, &mut report);

        debug!(
            algorithm = %request.algorithm,
            mode = %request.mode,
            issues = report.len(),
            "cipher request validated"
        );
        report
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Length in characters, which is what the form counts. Non-ASCII input must
/// not inflate it.
fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Groups 1 and 2: key
// ---------------------------------------------------------------------------

fn check_key_syntax(request: &CipherRequest, report: &mut Report) {
    if !is_hex(&request.key) {
        report.push(Issue::syntax(Field::Key, "Key must be HEX"));
    }
}

/// Accepted key lengths in hex characters.
pub fn key_hex_lengths(algorithm: Algorithm) -> &'static [usize] {
    match algorithm {
        Algorithm::Des => &[16],
        Algorithm::DesEde => &[32, 48],
        Algorithm::Desx => &[48],
        Algorithm::Aes => &[32, 48, 64],
    }
}

fn check_key_length(request: &CipherRequest, report: &mut Report) {
    if key_hex_lengths(request.algorithm).contains(&char_len(&request.key)) {
        return;
    }
    let message = match request.algorithm {
        Algorithm::Des => "DES key must be 16 hex chars",
        Algorithm::DesEde => "DESede key must be 32 or 48 hex chars",
        Algorithm::Desx => "DESX key must be 48 hex chars",
        Algorithm::Aes => "AES key must be 16/24/32 bytes",
    };
    report.push(Issue::constraint(Field::Key, message));
}

// ---------------------------------------------------------------------------
// Group 3: IV / nonce and tag length
// ---------------------------------------------------------------------------

fn check_iv(request: &CipherRequest, rule: &ModeRule, report: &mut Report) {
    let mode = request.mode;
    match (rule.iv, request.iv.as_deref()) {
        (IvRule::Ignored, _) | (IvRule::Forbidden, None) => {}
        (IvRule::Forbidden, Some(_)) => {
            report.push(Issue::constraint(
                Field::Iv,
                format!("IV not allowed in {mode} mode"),
            ));
        }
        (IvRule::Required(_), None) => {
            report.push(Issue::constraint(
                Field::Iv,
                format!("IV required for {mode} mode"),
            ));
        }
        (IvRule::Required(length), Some(iv)) => {
            if !is_hex(iv) {
                report.push(Issue::syntax(Field::Iv, "IV must be HEX"));
            }
            if !length.accepts(char_len(iv)) {
                let label = if mode.is_aead() { "nonce" } else { "IV" };
                report.push(Issue::constraint(
                    Field::Iv,
                    format!("{mode} {label} must be {}", describe_length(length)),
                ));
            }
        }
    }
}

fn describe_length(length: IvLength) -> String {
    match length {
        IvLength::Any => "non-empty".to_owned(),
        IvLength::Exact(n) => format!("{n} bytes ({} hex chars)", n * 2),
        IvLength::OneOf(lens) => {
            let lens: Vec<String> = lens.iter().map(usize::to_string).collect();
            format!("{} bytes", lens.join(" or "))
        }
        IvLength::Between(min, max) => format!("between {min} and {max} bytes"),
    }
}

fn check_tag_length(request: &CipherRequest, rule: &ModeRule, report: &mut Report) {
    let TagRule::Required(allowed) = rule.tag else {
        return;
    };
    let mode = request.mode;
    match request.tag_length {
        None | Some(0) => {
            report.push(Issue::constraint(
                Field::TagLength,
                format!("{mode} tagLength required"),
            ));
        }
        Some(bits) if !allowed.contains(&bits) => {
            report.push(Issue::constraint(
                Field::TagLength,
                format!("{mode} tagLength must be one of {} bits", join(allowed)),
            ));
        }
        Some(_) => {}
    }
}

// ---------------------------------------------------------------------------
// Group 4: padding
// ---------------------------------------------------------------------------

fn check_padding(request: &CipherRequest, rule: &ModeRule, report: &mut Report) {
    let mode = request.mode;
    match rule.padding {
        PaddingRule::Any => {}
        PaddingRule::NoPaddingOnly if request.padding != Padding::NoPadding => {
            report.push(Issue::constraint(
                Field::Padding,
                format!("{mode} mode must use NoPadding"),
            ));
        }
        PaddingRule::Required if request.padding == Padding::NoPadding => {
            report.push(Issue::constraint(
                Field::Padding,
                format!("{mode} mode requires padding"),
            ));
        }
        PaddingRule::NoPaddingOnly | PaddingRule::Required => {}
    }
}

// ---------------------------------------------------------------------------
// Group 5: payload
// ---------------------------------------------------------------------------

fn check_data(request: &CipherRequest, report: &mut Report) {
    if request.input_type != InputType::Hex {
        return;
    }
    if !is_hex(&request.data) {
        report.push(Issue::syntax(
            Field::Data,
            "Data declared HEX but contains non-hex chars",
        ));
    }
    if char_len(&request.data) % 2 != 0 {
        report.push(Issue::syntax(Field::Data, "Hex data must have even length"));
    }
}
