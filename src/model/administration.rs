use super::ids::{AdministrationId, AnimalId, InventoryItemId};
use super::inventory::InventoryKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Intravenous,
    Intramammary,
    Intramuscular,
    Intravaginal,
    Oral,
    Nasal,
    Subcutaneous,
}

/// One treatment or vaccine given to one animal.
///
/// `animal` is cleared when the animal is removed as an erroneous entry; the
/// administration itself stays as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Administration {
    pub id: AdministrationId,
    pub code: String,
    pub animal: Option<AnimalId>,
    pub inventory_item: InventoryItemId,
    pub kind: InventoryKind,
    pub route: Route,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub responsible: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrationCreate {
    pub code: Option<String>,
    pub animal: Option<AnimalId>,
    pub inventory_item: Option<InventoryItemId>,
    pub kind: InventoryKind,
    pub route: Route,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub responsible: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdministrationUpdate {
    pub code: Option<String>,
    pub animal: Option<AnimalId>,
    pub inventory_item: Option<InventoryItemId>,
    pub kind: Option<InventoryKind>,
    pub route: Option<Route>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub responsible: Option<String>,
}
