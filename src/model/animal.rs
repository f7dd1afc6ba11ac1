use super::ids::{AnimalId, BullId, EnclosureId};
use super::status::RecordStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Adult female, coded `V-<n>`.
    Adult,
    /// Calf, coded `C-<n>`.
    Juvenile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifeState {
    Empty,
    Inseminated,
    Pregnant,
    DoNotInseminate,
    Young,
    Dead,
    Sold,
}

impl LifeState {
    /// Outcome states that take the animal out of the active herd.
    pub fn is_terminal(self) -> bool {
        matches!(self, LifeState::Dead | LifeState::Sold)
    }

    pub fn default_for(category: Category) -> Self {
        match category {
            Category::Adult => LifeState::Empty,
            Category::Juvenile => LifeState::Young,
        }
    }
}

impl fmt::Display for LifeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifeState::Empty => "empty",
            LifeState::Inseminated => "inseminated",
            LifeState::Pregnant => "pregnant",
            LifeState::DoNotInseminate => "do not inseminate",
            LifeState::Young => "young",
            LifeState::Dead => "dead",
            LifeState::Sold => "sold",
        };
        f.write_str(label)
    }
}

/// Production and conformation measurements recorded per animal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biometrics {
    pub somatic_cell_count: u32,
    pub milk_yield: f64,
    pub leg_quality: f64,
    pub udder_quality: f64,
    pub fat_percent: f64,
    pub protein_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    pub code: String,
    pub category: Category,
    pub life_state: LifeState,
    pub status: RecordStatus,
    pub name: String,
    pub birth_date: NaiveDate,
    pub sire: Option<BullId>,
    pub dam: Option<AnimalId>,
    pub enclosure: Option<EnclosureId>,
    #[serde(flatten)]
    pub biometrics: Biometrics,
    pub removal_date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl Animal {
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalCreate {
    pub code: Option<String>,
    pub category: Category,
    pub life_state: Option<LifeState>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub sire: Option<BullId>,
    pub dam: Option<AnimalId>,
    pub enclosure: Option<EnclosureId>,
    #[serde(flatten)]
    pub biometrics: Biometrics,
    pub removal_date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Partial update. `None` leaves a field untouched; for the nullable
/// associations `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct AnimalUpdate {
    pub code: Option<String>,
    pub life_state: Option<LifeState>,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sire: Option<Option<BullId>>,
    pub dam: Option<Option<AnimalId>>,
    pub enclosure: Option<Option<EnclosureId>>,
    pub biometrics: Option<Biometrics>,
    pub removal_date: Option<Option<NaiveDate>>,
    pub note: Option<Option<String>>,
}

/// Parameters of `delete_animal`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDeletion {
    pub reason: Option<String>,
    pub removal_date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl AnimalDeletion {
    pub fn reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::default()
        }
    }
}
