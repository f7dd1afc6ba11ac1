//! # Ledger Errors
//!
//! Every operation on the herd returns [`LedgerError`]. Each variant maps to a
//! stable, machine-readable [`ErrorKind`] so that a transport layer can
//! translate failures without matching on message text.

use serde::Serialize;
use thiserror::Error;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    FormatError,
    ConflictError,
    RangeError,
    TypeMismatchError,
    OrderingError,
    StateConsistencyError,
    InsufficientStockError,
    InactiveResourceError,
    DuplicateWithinWindowError,
    NotFoundError,
    InvalidReasonError,
    RequiredError,
    ValidationError,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("{field}: `{value}` does not match the `{prefix}-<number>` format")]
    Format {
        field: &'static str,
        value: String,
        prefix: &'static str,
    },

    #[error("{field}: {message}")]
    Conflict {
        field: &'static str,
        message: String,
    },

    #[error("{field} must be {bound}, got {value}")]
    Range {
        field: &'static str,
        bound: String,
        value: String,
    },

    #[error("administration kind `{administration}` does not match inventory item kind `{item}`")]
    TypeMismatch {
        administration: String,
        item: String,
    },

    #[error("{later} must not be earlier than {earlier}")]
    Ordering {
        earlier: &'static str,
        later: &'static str,
    },

    #[error("{field}: {message}")]
    StateConsistency {
        field: &'static str,
        message: String,
    },

    #[error("{resource} has no units left")]
    InsufficientStock { resource: String },

    #[error("{resource} is inactive and cannot be consumed")]
    InactiveResource { resource: String },

    #[error("{item} was already given to {animal} on {previous}, within {window_days} days of {candidate}")]
    DuplicateWithinWindow {
        animal: String,
        item: String,
        previous: String,
        candidate: String,
        window_days: i64,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("`{given}` is not a valid deletion reason for {entity}; accepted: {accepted}")]
    InvalidReason {
        entity: &'static str,
        given: String,
        accepted: String,
    },

    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{} validation errors: {}", .0.len(), join_messages(.0))]
    Validation(Vec<LedgerError>),

    #[error("herd actor unavailable: {0}")]
    Unavailable(String),
}

fn join_messages(errors: &[LedgerError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Format { .. } => ErrorKind::FormatError,
            LedgerError::Conflict { .. } => ErrorKind::ConflictError,
            LedgerError::Range { .. } => ErrorKind::RangeError,
            LedgerError::TypeMismatch { .. } => ErrorKind::TypeMismatchError,
            LedgerError::Ordering { .. } => ErrorKind::OrderingError,
            LedgerError::StateConsistency { .. } => ErrorKind::StateConsistencyError,
            LedgerError::InsufficientStock { .. } => ErrorKind::InsufficientStockError,
            LedgerError::InactiveResource { .. } => ErrorKind::InactiveResourceError,
            LedgerError::DuplicateWithinWindow { .. } => ErrorKind::DuplicateWithinWindowError,
            LedgerError::NotFound { .. } => ErrorKind::NotFoundError,
            LedgerError::InvalidReason { .. } => ErrorKind::InvalidReasonError,
            LedgerError::Required { .. } => ErrorKind::RequiredError,
            LedgerError::Validation(_) => ErrorKind::ValidationError,
            LedgerError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    /// The offending field, when the error is about a single one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LedgerError::Format { field, .. }
            | LedgerError::Conflict { field, .. }
            | LedgerError::Range { field, .. }
            | LedgerError::StateConsistency { field, .. }
            | LedgerError::Required { field } => Some(*field),
            LedgerError::TypeMismatch { .. } => Some("kind"),
            LedgerError::Ordering { later, .. } => Some(*later),
            _ => None,
        }
    }

    /// Flattened list of kinds; a single error yields itself.
    pub fn kinds(&self) -> Vec<ErrorKind> {
        match self {
            LedgerError::Validation(errors) => errors.iter().map(LedgerError::kind).collect(),
            other => vec![other.kind()],
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        LedgerError::Conflict {
            field,
            message: message.into(),
        }
    }

    pub fn range(field: &'static str, bound: impl Into<String>, value: impl ToString) -> Self {
        LedgerError::Range {
            field,
            bound: bound.into(),
            value: value.to_string(),
        }
    }

    pub fn report(&self) -> ErrorReport {
        let violations = match self {
            LedgerError::Validation(errors) => errors.iter().map(Violation::from).collect(),
            other => vec![Violation::from(other)],
        };
        ErrorReport {
            kind: self.kind(),
            message: self.to_string(),
            violations,
        }
    }
}

/// One field-level entry of an [`ErrorReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub message: String,
}

impl From<&LedgerError> for Violation {
    fn from(error: &LedgerError) -> Self {
        Violation {
            kind: error.kind(),
            field: error.field(),
            message: error.to_string(),
        }
    }
}

/// Serializable error payload handed to the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub violations: Vec<Violation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_lists_each_violation() {
        let error = LedgerError::Validation(vec![
            LedgerError::range("fatPercent", "between 2.5 and 6", 7.1),
            LedgerError::Required { field: "enclosure" },
        ]);

        let report = error.report();
        assert_eq!(report.kind, ErrorKind::ValidationError);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].field, Some("fatPercent"));
        assert_eq!(report.violations[1].kind, ErrorKind::RequiredError);
        assert_eq!(
            error.kinds(),
            vec![ErrorKind::RangeError, ErrorKind::RequiredError]
        );
    }

    #[test]
    fn report_serializes_kind_as_string() {
        let report = LedgerError::InsufficientStock {
            resource: "INV-1".into(),
        }
        .report();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "InsufficientStockError");
        assert_eq!(json["violations"][0]["message"], "INV-1 has no units left");
        assert!(json["violations"][0].get("field").is_none());
    }
}
