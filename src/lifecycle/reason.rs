use crate::error::LedgerError;

/// Why a record is being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The record should never have existed; it is removed.
    ErroneousEntry,
    Dead,
    Sold,
    Deceased,
    Other,
    Inactive,
}

pub const ERRONEOUS_ENTRY: &str = "erroneous entry";
pub const DEAD: &str = "dead";
pub const SOLD: &str = "sold";
pub const DECEASED: &str = "deceased";
pub const OTHER: &str = "other";
pub const INACTIVE: &str = "inactive";

pub const ANIMAL_REASONS: &[(&str, Reason)] = &[
    (ERRONEOUS_ENTRY, Reason::ErroneousEntry),
    (DEAD, Reason::Dead),
    (SOLD, Reason::Sold),
];

pub const BULL_REASONS: &[(&str, Reason)] = &[
    (ERRONEOUS_ENTRY, Reason::ErroneousEntry),
    (DECEASED, Reason::Deceased),
    (OTHER, Reason::Other),
];

pub const INVENTORY_REASONS: &[(&str, Reason)] = &[
    (ERRONEOUS_ENTRY, Reason::ErroneousEntry),
    (INACTIVE, Reason::Inactive),
];

/// Matches `given` against the accepted labels, ignoring case and
/// surrounding whitespace. An absent or blank reason is a plain delete.
pub fn parse(
    entity: &'static str,
    given: Option<&str>,
    accepted: &[(&str, Reason)],
) -> Result<Reason, LedgerError> {
    let normalized = given.map(|reason| reason.trim().to_lowercase());
    let Some(normalized) = normalized.filter(|reason| !reason.is_empty()) else {
        return Ok(Reason::ErroneousEntry);
    };

    accepted
        .iter()
        .find(|(label, _)| *label == normalized)
        .map(|(_, reason)| *reason)
        .ok_or_else(|| LedgerError::InvalidReason {
            entity,
            given: given.unwrap_or_default().to_string(),
            accepted: accepted
                .iter()
                .map(|(label, _)| *label)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
