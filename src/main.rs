use chrono::{NaiveDate, NaiveTime};
use herd_ledger::model::{
    AdministrationCreate, Animal, AnimalCreate, AnimalId, Biometrics, BullCreate, Category,
    Enclosure, EnclosureCreate, InseminationCreate, InseminationReason, InventoryItemCreate,
    InventoryKind, LifeState, Packaging, RecordStatus, Route,
};
use herd_ledger::runtime::{setup_tracing, HerdConfig, HerdSystem};
use herd_ledger::store::HerdStore;
use tracing::{error, info, Instrument};

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, String> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| format!("invalid date {y}-{m}-{d}"))
}

fn biometrics() -> Biometrics {
    Biometrics {
        somatic_cell_count: 180_000,
        milk_yield: 32.5,
        leg_quality: 7.0,
        udder_quality: 7.5,
        fat_percent: 3.8,
        protein_percent: 3.2,
    }
}

/// Founder cow and her pen, loaded before the actor starts since she has no
/// recorded parents.
fn founder_store() -> Result<(HerdStore, AnimalId), String> {
    let mut store = HerdStore::default();
    let pen = store.enclosures.import(|id| Enclosure {
        id,
        code: "ENC-1".into(),
        name: "Founders".into(),
    });
    let birth_date = date(2019, 3, 14)?;
    let founder = store.animals.import(|id| Animal {
        id,
        code: "V-1".into(),
        category: Category::Adult,
        life_state: LifeState::Empty,
        status: RecordStatus::Active,
        name: "Paloma".into(),
        birth_date,
        sire: None,
        dam: None,
        enclosure: Some(pen),
        biometrics: biometrics(),
        removal_date: None,
        note: Some("founder stock".into()),
    });
    Ok((store, founder))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = HerdConfig::load()?;
    setup_tracing(&config);

    info!("Starting herd ledger demo");
    let (store, founder) = founder_store()?;
    let system = HerdSystem::start_with_store(&config, store);
    let herd = &system.client;

    let span = tracing::info_span!("herd_setup");
    let (bull, calf, founder) = async {
        let calf_barn = herd
            .enclosures
            .create_enclosure(EnclosureCreate {
                code: None,
                name: "Calf barn".into(),
            })
            .await?;
        info!(code = %calf_barn.code, "Enclosure created");

        let founder = herd
            .animals
            .get_animal(founder)
            .await?
            .ok_or("founder cow missing")?;

        let bull = herd
            .bulls
            .create_bull(BullCreate {
                code: None,
                name: "Atlas".into(),
                vital_state: None,
                semen_units: 3,
                leg_quality: 8.0,
                udder_quality: 7.5,
                transmission: Default::default(),
                note: None,
            })
            .await?;
        info!(code = %bull.code, "Bull created");

        let calf = herd
            .animals
            .create_animal(AnimalCreate {
                code: None,
                category: Category::Juvenile,
                life_state: None,
                name: "Lucera".into(),
                birth_date: date(2024, 2, 1)?,
                sire: Some(bull.id),
                dam: Some(founder.id),
                enclosure: Some(calf_barn.id),
                biometrics: biometrics(),
                removal_date: None,
                note: None,
            })
            .await?;
        info!(code = %calf.code, life_state = %calf.life_state, "Calf registered");

        Ok::<_, Box<dyn std::error::Error>>((bull, calf, founder))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("treatments");
    async {
        let vaccine = herd
            .inventory
            .create_inventory_item(InventoryItemCreate {
                code: None,
                kind: InventoryKind::Vaccine,
                name: "IBR marker vaccine".into(),
                unit_count: 1,
                packaging: Packaging::Bottle,
                availability: None,
            })
            .await?;

        let administration = herd
            .administrations
            .create_administration(AdministrationCreate {
                code: None,
                animal: Some(founder.id),
                inventory_item: Some(vaccine.id),
                kind: InventoryKind::Vaccine,
                route: Route::Intramuscular,
                start_date: date(2024, 4, 10)?,
                end_date: date(2024, 4, 10)?,
                responsible: "Marta".into(),
            })
            .await?;
        let units_left = herd.inventory.check_stock(vaccine.id).await?;
        info!(code = %administration.code, units_left, "Vaccine administered");

        // The last unit is gone, so the calf cannot get one.
        let second = herd
            .administrations
            .create_administration(AdministrationCreate {
                code: None,
                animal: Some(calf.id),
                inventory_item: Some(vaccine.id),
                kind: InventoryKind::Vaccine,
                route: Route::Intramuscular,
                start_date: date(2024, 4, 11)?,
                end_date: date(2024, 4, 11)?,
                responsible: "Marta".into(),
            })
            .await;
        if let Err(e) = second {
            error!(error = %e, kind = ?e.kind(), "Second administration rejected");
        }

        let insemination = herd
            .inseminations
            .create_insemination(InseminationCreate {
                code: None,
                animal: Some(founder.id),
                bull: Some(bull.id),
                reason: InseminationReason::Heat,
                date: date(2024, 5, 3)?,
                time: NaiveTime::from_hms_opt(7, 30, 0).ok_or("invalid time")?,
                is_sexed: true,
                responsible: "Marta".into(),
            })
            .await?;
        let semen_left = herd.bulls.semen_units(bull.id).await?;
        info!(code = %insemination.code, semen_left, "Insemination recorded");

        let outcome = herd.animals.sell(calf.id, date(2024, 9, 1)?).await?;
        info!(code = %outcome.code, status = %outcome.status, "{}", outcome.message);

        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let vaccines = herd.list_inventory_by_kind(InventoryKind::Vaccine).await?;
    info!(vaccines = vaccines.len(), "Inventory summary");

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
