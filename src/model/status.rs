use serde::{Deserialize, Serialize};
use std::fmt;

/// Disposition tag shared by every record that can be retired.
///
/// `Removed` never appears on a stored record; it is only reported back in a
/// [`DeleteOutcome`] once the row is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordStatus {
    Active,
    Retired,
    Removed,
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordStatus::Active => "active",
            RecordStatus::Retired => "retired",
            RecordStatus::Removed => "removed",
        };
        f.write_str(label)
    }
}

/// Confirmation returned by every delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub code: String,
    pub status: RecordStatus,
    pub message: String,
}
