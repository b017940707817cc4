//! Validation issues and the report that collects them.

use std::fmt;

use common::protocol::IssueBody;
use serde::Serialize;
use thiserror::Error;

/// Separator placed between messages in [`Report::joined`].
pub const MESSAGE_SEPARATOR: &str = " | ";

/// The request field an issue is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Key,
    Mode,
    Padding,
    Iv,
    TagLength,
    Data,
}

impl Field {
    /// Field name in form spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Key => "key",
            Field::Mode => "mode",
            Field::Padding => "padding",
            Field::Iv => "iv",
            Field::TagLength => "tagLength",
            Field::Data => "data",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which class of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// The field's literal content is malformed (non-hex, odd length).
    Syntax,
    /// The content is well-formed but breaks a cross-field rule.
    Constraint,
    /// The algorithm/mode pairing has no rule set.
    Unsupported,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Syntax => "syntax",
            IssueKind::Constraint => "constraint",
            IssueKind::Unsupported => "unsupported",
        }
    }
}

/// A single field-scoped problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub field: Field,
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn syntax(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: IssueKind::Syntax,
            message: message.into(),
        }
    }

    pub fn constraint(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: IssueKind::Constraint,
            message: message.into(),
        }
    }

    pub fn unsupported(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: IssueKind::Unsupported,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<&Issue> for IssueBody {
    fn from(issue: &Issue) -> Self {
        IssueBody {
            field: issue.field.as_str().to_owned(),
            kind: issue.kind.as_str().to_owned(),
            message: issue.message.clone(),
        }
    }
}

/// Returned by [`Report::into_result`] when at least one issue was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.joined())]
pub struct ValidationError(pub Report);

impl ValidationError {
    pub fn report(&self) -> &Report {
        &self.0
    }
}

/// Ordered list of issues produced by one validation pass.
///
/// Order follows rule evaluation order, so two passes over the same request
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `true` when nothing blocks submission to the cipher service.
    pub fn is_admissible(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues scoped to `field`, in report order.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.field == field)
    }

    /// All messages joined for display. Empty when admissible.
    pub fn joined(&self) -> String {
        self.issues
            .iter()
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join(MESSAGE_SEPARATOR)
    }

    /// Wire form of the issue list.
    pub fn to_bodies(&self) -> Vec<IssueBody> {
        self.issues.iter().map(IssueBody::from).collect()
    }

    /// `Ok(())` when admissible, otherwise the whole report as an error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_admissible() {
            Ok(())
        } else {
            Err(ValidationError(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let mut r = Report::new();
        r.push(Issue::syntax(Field::Key, "Key must be HEX"));
        r.push(Issue::constraint(Field::Iv, "IV required for CBC mode"));
        r
    }

    #[test]
    fn empty_report_is_admissible() {
        let r = Report::new();
        assert!(r.is_admissible());
        assert_eq!(r.joined(), "");
        assert!(r.into_result().is_ok());
    }

    #[test]
    fn joined_keeps_order() {
        assert_eq!(sample().joined(), "Key must be HEX | IV required for CBC mode");
    }

    #[test]
    fn into_result_carries_report() {
        let err = sample().into_result().unwrap_err();
        assert_eq!(err.report().len(), 2);
        assert_eq!(err.to_string(), "Key must be HEX | IV required for CBC mode");
    }

    #[test]
    fn bodies_use_form_spelling() {
        let mut r = Report::new();
        r.push(Issue::constraint(Field::TagLength, "GCM tagLength required"));
        let bodies = r.to_bodies();
        assert_eq!(bodies[0].field, "tagLength");
        assert_eq!(bodies[0].kind, "constraint");
    }

    #[test]
    fn for_field_filters() {
        let r = sample();
        assert_eq!(r.for_field(Field::Iv).count(), 1);
        assert_eq!(r.for_field(Field::Data).count(), 0);
    }

    #[test]
    fn serialises_as_plain_list() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v[0]["field"], "key");
        assert_eq!(v[1]["kind"], "constraint");
    }
}
