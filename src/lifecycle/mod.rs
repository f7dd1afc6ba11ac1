//! # Lifecycle Controller
//!
//! The deletion state machine. Every record starts *active*; a delete
//! request moves it to one of two terminal states:
//!
//! | Reason | Result |
//! |--------|--------|
//! | erroneous entry (or none) | *removed*: the row is gone and dependents drop their reference to it |
//! | biological or operational outcome | *retired*: the row stays, flagged non-active and detached from active relations |
//!
//! Planning (`plan_*`) is read-only and may fail; [`apply`] performs the plan.

pub mod reason;

use crate::error::LedgerError;
use crate::framework::{entity_type, HerdEntity};
use crate::model::{
    Administration, AdministrationId, Animal, AnimalDeletion, AnimalId, Availability, Bull,
    BullDeletion, DeleteOutcome, Enclosure, Insemination, InseminationId, InventoryDeletion,
    InventoryItem, LifeState, RecordStatus, VitalState,
};
use crate::store::HerdStore;
use crate::validation;
use chrono::NaiveDate;
use reason::{Reason, ANIMAL_REASONS, BULL_REASONS, INVENTORY_REASONS};
use tracing::info;

pub use reason::ERRONEOUS_ENTRY;

/// Reference to clear on a dependent record when its target is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detach {
    AdministrationAnimal(AdministrationId),
    InseminationAnimal(InseminationId),
    InseminationBull(InseminationId),
    AnimalDam(AnimalId),
    AnimalSire(AnimalId),
}

impl Detach {
    fn apply(self, store: &mut HerdStore) {
        match self {
            Detach::AdministrationAnimal(id) => {
                if let Some(record) = store.administrations.get_mut(id) {
                    record.animal = None;
                }
            }
            Detach::InseminationAnimal(id) => {
                if let Some(record) = store.inseminations.get_mut(id) {
                    record.animal = None;
                }
            }
            Detach::InseminationBull(id) => {
                if let Some(record) = store.inseminations.get_mut(id) {
                    record.bull = None;
                }
            }
            Detach::AnimalDam(id) => {
                if let Some(record) = store.animals.get_mut(id) {
                    record.dam = None;
                }
            }
            Detach::AnimalSire(id) => {
                if let Some(record) = store.animals.get_mut(id) {
                    record.sire = None;
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum Disposition<T: HerdEntity> {
    Retire(T),
    Remove(T::Id),
}

/// A planned delete: the final disposition plus the dependents to detach.
#[derive(Debug)]
pub struct Disposal<T: HerdEntity> {
    pub code: String,
    pub disposition: Disposition<T>,
    pub detach: Vec<Detach>,
    pub message: String,
}

impl<T: HerdEntity> Disposal<T> {
    pub fn remove(record: &T, detach: Vec<Detach>) -> Self {
        let message = if detach.is_empty() {
            format!("{} {} removed", entity_type::<T>(), record.code())
        } else {
            format!(
                "{} {} removed; {} dependent records detached",
                entity_type::<T>(),
                record.code(),
                detach.len()
            )
        };
        Self {
            code: record.code().to_string(),
            disposition: Disposition::Remove(record.id()),
            detach,
            message,
        }
    }

    pub fn retire(record: T, outcome: impl std::fmt::Display) -> Self {
        Self {
            code: record.code().to_string(),
            message: format!(
                "{} {} retired as {outcome}",
                entity_type::<T>(),
                record.code()
            ),
            disposition: Disposition::Retire(record),
            detach: Vec::new(),
        }
    }
}

pub fn apply<T: HerdEntity>(store: &mut HerdStore, disposal: Disposal<T>) -> DeleteOutcome {
    for detach in &disposal.detach {
        detach.apply(store);
    }
    let status = match disposal.disposition {
        Disposition::Retire(record) => {
            T::table_mut(store).put(record);
            RecordStatus::Retired
        }
        Disposition::Remove(id) => {
            T::table_mut(store).remove(id);
            RecordStatus::Removed
        }
    };
    DeleteOutcome {
        code: disposal.code,
        status,
        message: disposal.message,
    }
}

fn already_retired(code: &str, state: impl std::fmt::Display) -> LedgerError {
    LedgerError::StateConsistency {
        field: "status",
        message: format!("{code} is already retired ({state})"),
    }
}

pub fn plan_animal(
    animal: &Animal,
    deletion: AnimalDeletion,
    store: &HerdStore,
    today: NaiveDate,
) -> Result<Disposal<Animal>, LedgerError> {
    let outcome = match reason::parse(
        Animal::ENTITY,
        deletion.reason.as_deref(),
        ANIMAL_REASONS,
    )? {
        Reason::ErroneousEntry => {
            let detach = store
                .administrations_of_animal(animal.id)
                .map(|record| Detach::AdministrationAnimal(record.id))
                .chain(
                    store
                        .inseminations_of_animal(animal.id)
                        .map(|record| Detach::InseminationAnimal(record.id)),
                )
                .chain(
                    store
                        .offspring_of_dam(animal.id)
                        .map(|record| Detach::AnimalDam(record.id)),
                )
                .collect();
            return Ok(Disposal::remove(animal, detach));
        }
        Reason::Dead => LifeState::Dead,
        _ => LifeState::Sold,
    };

    if !animal.is_active() {
        return Err(already_retired(&animal.code, animal.life_state));
    }
    let removal_date = deletion.removal_date.unwrap_or(today);
    validation::ordered("birthDate", animal.birth_date, "removalDate", removal_date)?;

    let mut retired = animal.clone();
    retired.life_state = outcome;
    retired.status = RecordStatus::Retired;
    retired.removal_date = Some(removal_date);
    retired.enclosure = None;
    // The deletion note replaces any earlier one, even when absent.
    retired.note = deletion.note;
    Ok(Disposal::retire(retired, outcome))
}

pub fn plan_bull(
    bull: &Bull,
    deletion: BullDeletion,
    store: &HerdStore,
) -> Result<Disposal<Bull>, LedgerError> {
    let outcome = match reason::parse(Bull::ENTITY, deletion.reason.as_deref(), BULL_REASONS)? {
        Reason::ErroneousEntry => {
            let detach = store
                .inseminations_by_bull(bull.id)
                .map(|record| Detach::InseminationBull(record.id))
                .chain(
                    store
                        .offspring_of_sire(bull.id)
                        .map(|record| Detach::AnimalSire(record.id)),
                )
                .collect();
            return Ok(Disposal::remove(bull, detach));
        }
        Reason::Deceased => VitalState::Deceased,
        _ => VitalState::Other,
    };

    if bull.status != RecordStatus::Active {
        return Err(already_retired(&bull.code, bull.vital_state));
    }
    let mut retired = bull.clone();
    retired.vital_state = outcome;
    retired.status = RecordStatus::Retired;
    Ok(Disposal::retire(retired, outcome))
}

pub fn plan_inventory_item(
    item: &InventoryItem,
    deletion: InventoryDeletion,
    store: &HerdStore,
) -> Result<Disposal<InventoryItem>, LedgerError> {
    match reason::parse(
        InventoryItem::ENTITY,
        deletion.reason.as_deref(),
        INVENTORY_REASONS,
    )? {
        Reason::ErroneousEntry => {
            let referencing: Vec<&str> = store
                .administrations_of_item(item.id)
                .map(|record| record.code.as_str())
                .collect();
            if !referencing.is_empty() {
                return Err(LedgerError::conflict(
                    "inventoryItem",
                    format!(
                        "{} is referenced by administrations {}",
                        item.code,
                        referencing.join(", ")
                    ),
                ));
            }
            Ok(Disposal::remove(item, Vec::new()))
        }
        _ => {
            if !item.is_active() {
                return Err(already_retired(&item.code, "inactive"));
            }
            let mut retired = item.clone();
            retired.availability = Availability::Inactive;
            retired.status = RecordStatus::Retired;
            Ok(Disposal::retire(retired, "inactive"))
        }
    }
}

pub fn plan_enclosure(
    enclosure: &Enclosure,
    store: &HerdStore,
) -> Result<Disposal<Enclosure>, LedgerError> {
    let occupants: Vec<&str> = store
        .animals_in(enclosure.id)
        .map(|animal| animal.code.as_str())
        .collect();
    if !occupants.is_empty() {
        return Err(LedgerError::conflict(
            "enclosure",
            format!("{} still holds animals {}", enclosure.code, occupants.join(", ")),
        ));
    }
    Ok(Disposal::remove(enclosure, Vec::new()))
}

/// The consumed unit is not returned to stock.
pub fn plan_administration(record: &Administration) -> Disposal<Administration> {
    info!(
        code = %record.code,
        inventory_item = %record.inventory_item,
        "Administration removed; consumed unit stays consumed"
    );
    Disposal::remove(record, Vec::new())
}

/// The consumed straw is not returned to the bull's reserve.
pub fn plan_insemination(record: &Insemination) -> Disposal<Insemination> {
    info!(
        code = %record.code,
        bull = ?record.bull,
        "Insemination removed; consumed semen unit stays consumed"
    );
    Disposal::remove(record, Vec::new())
}
