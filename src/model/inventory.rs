use super::ids::InventoryItemId;
use super::status::RecordStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the units held by a single inventory item.
pub const MAX_UNITS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InventoryKind {
    Treatment,
    Vaccine,
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryKind::Treatment => f.write_str("treatment"),
            InventoryKind::Vaccine => f.write_str("vaccine"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Packaging {
    #[default]
    Sachet,
    Bottle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub code: String,
    pub kind: InventoryKind,
    pub name: String,
    pub unit_count: u32,
    pub packaging: Packaging,
    pub availability: Availability,
    pub status: RecordStatus,
}

impl InventoryItem {
    pub fn is_active(&self) -> bool {
        self.availability == Availability::Active
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemCreate {
    pub code: Option<String>,
    pub kind: InventoryKind,
    pub name: String,
    pub unit_count: u32,
    #[serde(default)]
    pub packaging: Packaging,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, Default)]
pub struct InventoryItemUpdate {
    pub code: Option<String>,
    pub kind: Option<InventoryKind>,
    pub name: Option<String>,
    pub unit_count: Option<u32>,
    pub packaging: Option<Packaging>,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryDeletion {
    pub reason: Option<String>,
}

impl InventoryDeletion {
    pub fn reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}
