#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use herd_ledger::clients::HerdClient;
use herd_ledger::model::{
    Administration, AdministrationCreate, Animal, AnimalCreate, AnimalId, Biometrics, Bull,
    BullCreate, BullId, Category, Enclosure, EnclosureId, InseminationCreate, InseminationReason,
    InventoryItem, InventoryItemCreate, InventoryItemId, InventoryKind, LifeState, Packaging,
    RecordStatus, Route,
};
use herd_ledger::runtime::{HerdConfig, HerdSystem};
use herd_ledger::store::HerdStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn biometrics() -> Biometrics {
    Biometrics {
        somatic_cell_count: 150_000,
        milk_yield: 28.0,
        leg_quality: 6.5,
        udder_quality: 7.25,
        fat_percent: 3.9,
        protein_percent: 3.3,
    }
}

/// A running system preloaded with one pen and one founder cow.
pub struct Herd {
    pub system: HerdSystem,
    pub pen: EnclosureId,
    pub founder: AnimalId,
}

impl Herd {
    pub fn client(&self) -> &HerdClient {
        &self.system.client
    }

    pub async fn bull(&self, name: &str, semen_units: u32) -> Bull {
        self.client()
            .bulls
            .create_bull(bull_params(name, semen_units))
            .await
            .expect("bull is created")
    }

    /// A calf of the founder by `sire`, living in the founder pen.
    pub async fn calf(&self, name: &str, sire: BullId) -> Animal {
        self.client()
            .animals
            .create_animal(animal_params(name, sire, self.founder, self.pen))
            .await
            .expect("calf is created")
    }

    pub async fn item(&self, name: &str, kind: InventoryKind, units: u32) -> InventoryItem {
        self.client()
            .inventory
            .create_inventory_item(item_params(name, kind, units))
            .await
            .expect("inventory item is created")
    }

    pub async fn administer(
        &self,
        animal: AnimalId,
        item: &InventoryItem,
        start: NaiveDate,
    ) -> Administration {
        self.client()
            .administrations
            .create_administration(administration_params(animal, item, start))
            .await
            .expect("administration is created")
    }

    pub async fn units(&self, item: InventoryItemId) -> u32 {
        self.client().inventory.check_stock(item).await.unwrap()
    }

    pub async fn semen(&self, bull: BullId) -> u32 {
        self.client().bulls.semen_units(bull).await.unwrap()
    }
}

pub fn start() -> Herd {
    let mut store = HerdStore::default();
    let pen = store.enclosures.import(|id| Enclosure {
        id,
        code: "ENC-1".into(),
        name: "Maternity".into(),
    });
    let founder = store.animals.import(|id| Animal {
        id,
        code: "V-1".into(),
        category: Category::Adult,
        life_state: LifeState::Empty,
        status: RecordStatus::Active,
        name: "Founder".into(),
        birth_date: date(2018, 6, 1),
        sire: None,
        dam: None,
        enclosure: Some(pen),
        biometrics: biometrics(),
        removal_date: None,
        note: None,
    });

    let system = HerdSystem::start_with_store(&HerdConfig::default(), store);
    Herd {
        system,
        pen,
        founder,
    }
}

pub fn bull_params(name: &str, semen_units: u32) -> BullCreate {
    BullCreate {
        code: None,
        name: name.into(),
        vital_state: None,
        semen_units,
        leg_quality: 7.0,
        udder_quality: 8.0,
        transmission: Default::default(),
        note: None,
    }
}

pub fn animal_params(name: &str, sire: BullId, dam: AnimalId, pen: EnclosureId) -> AnimalCreate {
    AnimalCreate {
        code: None,
        category: Category::Juvenile,
        life_state: None,
        name: name.into(),
        birth_date: date(2023, 3, 1),
        sire: Some(sire),
        dam: Some(dam),
        enclosure: Some(pen),
        biometrics: biometrics(),
        removal_date: None,
        note: None,
    }
}

pub fn item_params(name: &str, kind: InventoryKind, units: u32) -> InventoryItemCreate {
    InventoryItemCreate {
        code: None,
        kind,
        name: name.into(),
        unit_count: units,
        packaging: Packaging::Sachet,
        availability: None,
    }
}

pub fn administration_params(
    animal: AnimalId,
    item: &InventoryItem,
    start: NaiveDate,
) -> AdministrationCreate {
    AdministrationCreate {
        code: None,
        animal: Some(animal),
        inventory_item: Some(item.id),
        kind: item.kind,
        route: Route::Subcutaneous,
        start_date: start,
        end_date: start,
        responsible: "Marta".into(),
    }
}

pub fn insemination_params(animal: AnimalId, bull: BullId) -> InseminationCreate {
    InseminationCreate {
        code: None,
        animal: Some(animal),
        bull: Some(bull),
        reason: InseminationReason::Scheduled,
        date: date(2024, 5, 3),
        time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        is_sexed: true,
        responsible: "Marta".into(),
    }
}
