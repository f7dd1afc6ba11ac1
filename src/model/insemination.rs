use super::ids::{AnimalId, BullId, InseminationId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InseminationReason {
    Heat,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insemination {
    pub id: InseminationId,
    pub code: String,
    pub animal: Option<AnimalId>,
    pub bull: Option<BullId>,
    pub reason: InseminationReason,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub is_sexed: bool,
    pub responsible: String,
}

fn sexed_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InseminationCreate {
    pub code: Option<String>,
    pub animal: Option<AnimalId>,
    pub bull: Option<BullId>,
    pub reason: InseminationReason,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default = "sexed_by_default")]
    pub is_sexed: bool,
    pub responsible: String,
}

#[derive(Debug, Clone, Default)]
pub struct InseminationUpdate {
    pub code: Option<String>,
    pub animal: Option<AnimalId>,
    pub bull: Option<BullId>,
    pub reason: Option<InseminationReason>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub is_sexed: Option<bool>,
    pub responsible: Option<String>,
}
