use super::ids::BullId;
use super::status::RecordStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalState {
    Alive,
    Deceased,
    Other,
}

impl fmt::Display for VitalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VitalState::Alive => "alive",
            VitalState::Deceased => "deceased",
            VitalState::Other => "other",
        };
        f.write_str(label)
    }
}

/// Genetic transmission values published for a sire. Unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transmission {
    pub milk: f64,
    pub somatic_cells: f64,
    pub fat: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bull {
    pub id: BullId,
    pub code: String,
    pub name: String,
    pub vital_state: VitalState,
    pub status: RecordStatus,
    pub semen_units: u32,
    pub leg_quality: f64,
    pub udder_quality: f64,
    pub transmission: Transmission,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BullCreate {
    pub code: Option<String>,
    pub name: String,
    pub vital_state: Option<VitalState>,
    pub semen_units: u32,
    pub leg_quality: f64,
    pub udder_quality: f64,
    #[serde(default)]
    pub transmission: Transmission,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BullUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub vital_state: Option<VitalState>,
    pub semen_units: Option<u32>,
    pub leg_quality: Option<f64>,
    pub udder_quality: Option<f64>,
    pub transmission: Option<Transmission>,
    pub note: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BullDeletion {
    pub reason: Option<String>,
}

impl BullDeletion {
    pub fn reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}
