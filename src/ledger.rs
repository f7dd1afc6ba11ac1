//! # Inventory Ledger
//!
//! Keeps inventory `unitCount` and bull `semenUnits` consistent with the
//! administrations and inseminations that consume them.
//!
//! Planning functions are read-only and return the [`StockMovement`]s a
//! commit must apply; [`apply`] performs them. Every guard is checked during
//! planning, so applying a plan cannot fail.
//!
//! Deleting an administration or insemination never restores a unit: the
//! dose or straw has been used.

use crate::error::LedgerError;
use crate::model::{
    AdministrationId, AnimalId, Bull, BullId, InventoryItem, InventoryItemId, MAX_UNITS,
};
use crate::store::HerdStore;
use chrono::NaiveDate;
use tracing::debug;

/// Inclusive window, in days, in which an animal cannot receive the same
/// inventory item twice.
pub const REPEAT_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stock {
    Inventory(InventoryItemId),
    Semen(BullId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMovement {
    Consume(Stock),
    Restore(Stock),
}

pub fn ensure_consumable(item: &InventoryItem) -> Result<(), LedgerError> {
    if !item.is_active() {
        return Err(LedgerError::InactiveResource {
            resource: item.code.clone(),
        });
    }
    if item.unit_count == 0 {
        return Err(LedgerError::InsufficientStock {
            resource: item.code.clone(),
        });
    }
    Ok(())
}

pub fn ensure_semen(bull: &Bull) -> Result<(), LedgerError> {
    if bull.semen_units == 0 {
        return Err(LedgerError::InsufficientStock {
            resource: format!("semen of {}", bull.code),
        });
    }
    Ok(())
}

pub fn plan_administration(item: &InventoryItem) -> Result<Vec<StockMovement>, LedgerError> {
    ensure_consumable(item)?;
    Ok(vec![StockMovement::Consume(Stock::Inventory(item.id))])
}

/// Moves one unit back to `previous` and takes one from `next`.
pub fn plan_administration_reassignment(
    store: &HerdStore,
    previous: InventoryItemId,
    next: &InventoryItem,
) -> Result<Vec<StockMovement>, LedgerError> {
    if previous == next.id {
        return Ok(Vec::new());
    }
    ensure_consumable(next)?;

    let mut movements = Vec::with_capacity(2);
    if let Some(old) = store.inventory.get(previous) {
        if old.unit_count >= MAX_UNITS {
            return Err(LedgerError::range(
                "unitCount",
                format!("at most {MAX_UNITS} after returning a unit to {}", old.code),
                old.unit_count + 1,
            ));
        }
        movements.push(StockMovement::Restore(Stock::Inventory(previous)));
    }
    movements.push(StockMovement::Consume(Stock::Inventory(next.id)));
    Ok(movements)
}

pub fn plan_insemination(bull: &Bull) -> Result<Vec<StockMovement>, LedgerError> {
    ensure_semen(bull)?;
    Ok(vec![StockMovement::Consume(Stock::Semen(bull.id))])
}

/// Symmetric to [`plan_administration_reassignment`]. A `previous` bull that
/// no longer exists has nothing to restore.
pub fn plan_insemination_reassignment(
    store: &HerdStore,
    previous: Option<BullId>,
    next: &Bull,
) -> Result<Vec<StockMovement>, LedgerError> {
    if previous == Some(next.id) {
        return Ok(Vec::new());
    }
    ensure_semen(next)?;

    let mut movements = Vec::with_capacity(2);
    if let Some(old) = previous.filter(|id| store.bulls.contains(*id)) {
        movements.push(StockMovement::Restore(Stock::Semen(old)));
    }
    movements.push(StockMovement::Consume(Stock::Semen(next.id)));
    Ok(movements)
}

/// Fails if `animal` already received `item` within [`REPEAT_WINDOW_DAYS`]
/// of `start_date`. `except` excludes the administration being updated.
pub fn check_repeat_window(
    store: &HerdStore,
    animal: AnimalId,
    item: InventoryItemId,
    start_date: NaiveDate,
    except: Option<AdministrationId>,
) -> Result<(), LedgerError> {
    let clash = store.administrations_of_animal(animal).find(|existing| {
        Some(existing.id) != except
            && existing.inventory_item == item
            && (existing.start_date - start_date).num_days().abs() <= REPEAT_WINDOW_DAYS
    });

    match clash {
        Some(existing) => Err(LedgerError::DuplicateWithinWindow {
            animal: store
                .animals
                .get(animal)
                .map_or_else(|| animal.to_string(), |a| a.code.clone()),
            item: store
                .inventory
                .get(item)
                .map_or_else(|| item.to_string(), |i| i.code.clone()),
            previous: existing.start_date.to_string(),
            candidate: start_date.to_string(),
            window_days: REPEAT_WINDOW_DAYS,
        }),
        None => Ok(()),
    }
}

pub fn apply(store: &mut HerdStore, movements: &[StockMovement]) {
    for movement in movements {
        debug!(?movement, "Stock movement");
        match *movement {
            StockMovement::Consume(Stock::Inventory(id)) => {
                if let Some(item) = store.inventory.get_mut(id) {
                    item.unit_count = item.unit_count.saturating_sub(1);
                }
            }
            StockMovement::Restore(Stock::Inventory(id)) => {
                if let Some(item) = store.inventory.get_mut(id) {
                    item.unit_count += 1;
                }
            }
            StockMovement::Consume(Stock::Semen(id)) => {
                if let Some(bull) = store.bulls.get_mut(id) {
                    bull.semen_units = bull.semen_units.saturating_sub(1);
                }
            }
            StockMovement::Restore(Stock::Semen(id)) => {
                if let Some(bull) = store.bulls.get_mut(id) {
                    bull.semen_units += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{
        Administration, Animal, AnimalId, Availability, Biometrics, Category, InventoryKind,
        LifeState, Packaging, RecordStatus, Route, Transmission, VitalState,
    };

    fn item(id: u32, units: u32) -> InventoryItem {
        InventoryItem {
            id: InventoryItemId(id),
            code: format!("INV-{id}"),
            kind: InventoryKind::Vaccine,
            name: format!("Vaccine {id}"),
            unit_count: units,
            packaging: Packaging::Bottle,
            availability: Availability::Active,
            status: RecordStatus::Active,
        }
    }

    fn bull(id: u32, units: u32) -> Bull {
        Bull {
            id: BullId(id),
            code: format!("B-{id}"),
            name: format!("Bull {id}"),
            vital_state: VitalState::Alive,
            status: RecordStatus::Active,
            semen_units: units,
            leg_quality: 7.0,
            udder_quality: 7.0,
            transmission: Transmission::default(),
            note: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_administration(start: NaiveDate) -> HerdStore {
        let mut store = HerdStore::default();
        store.inventory.put(item(1, 5));
        store.animals.put(Animal {
            id: AnimalId(1),
            code: "V-1".into(),
            category: Category::Adult,
            life_state: LifeState::Empty,
            status: RecordStatus::Active,
            name: "Paloma".into(),
            birth_date: date(2019, 3, 2),
            sire: None,
            dam: None,
            enclosure: None,
            biometrics: Biometrics {
                somatic_cell_count: 100_000,
                milk_yield: 25.0,
                leg_quality: 6.0,
                udder_quality: 6.0,
                fat_percent: 3.5,
                protein_percent: 3.1,
            },
            removal_date: None,
            note: None,
        });
        store.administrations.put(Administration {
            id: AdministrationId(1),
            code: "ADM-1".into(),
            animal: Some(AnimalId(1)),
            inventory_item: InventoryItemId(1),
            kind: InventoryKind::Vaccine,
            route: Route::Subcutaneous,
            start_date: start,
            end_date: start,
            responsible: "Vet".into(),
        });
        store
    }

    #[test]
    fn inactive_item_is_rejected_before_stock() {
        let mut retired = item(1, 0);
        retired.availability = Availability::Inactive;
        let err = plan_administration(&retired).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InactiveResourceError);
    }

    #[test]
    fn empty_item_is_insufficient() {
        let err = plan_administration(&item(1, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStockError);
    }

    #[test]
    fn reassignment_to_same_item_moves_nothing() {
        let store = HerdStore::default();
        let moves = plan_administration_reassignment(&store, InventoryItemId(1), &item(1, 0));
        assert!(moves.unwrap().is_empty());
    }

    #[test]
    fn reassignment_refuses_to_overfill_previous_item() {
        let mut store = HerdStore::default();
        store.inventory.put(item(1, MAX_UNITS));
        let err = plan_administration_reassignment(&store, InventoryItemId(1), &item(2, 3))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeError);
    }

    #[test]
    fn apply_moves_units_between_items() {
        let mut store = HerdStore::default();
        store.inventory.put(item(1, 2));
        store.inventory.put(item(2, 4));
        let moves = plan_administration_reassignment(
            &store,
            InventoryItemId(1),
            store.inventory.get(InventoryItemId(2)).unwrap(),
        )
        .unwrap();

        apply(&mut store, &moves);
        assert_eq!(store.inventory.get(InventoryItemId(1)).unwrap().unit_count, 3);
        assert_eq!(store.inventory.get(InventoryItemId(2)).unwrap().unit_count, 3);
    }

    #[test]
    fn semen_reassignment_skips_cleared_bull() {
        let mut store = HerdStore::default();
        store.bulls.put(bull(2, 1));
        let moves = plan_insemination_reassignment(&store, None, &bull(2, 1)).unwrap();
        assert_eq!(moves, vec![StockMovement::Consume(Stock::Semen(BullId(2)))]);

        let err = plan_insemination(&bull(3, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStockError);
    }

    #[test]
    fn repeat_window_is_inclusive() {
        let start = date(2024, 1, 1);
        let store = store_with_administration(start);
        let animal = AnimalId(1);
        let vaccine = InventoryItemId(1);

        let edge = start + chrono::Duration::days(365);
        let err = check_repeat_window(&store, animal, vaccine, edge, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateWithinWindowError);

        let before = start - chrono::Duration::days(200);
        assert!(check_repeat_window(&store, animal, vaccine, before, None).is_err());

        let after = start + chrono::Duration::days(366);
        assert!(check_repeat_window(&store, animal, vaccine, after, None).is_ok());
    }

    #[test]
    fn repeat_window_ignores_the_record_under_update() {
        let start = date(2024, 1, 1);
        let store = store_with_administration(start);
        let result = check_repeat_window(
            &store,
            AnimalId(1),
            InventoryItemId(1),
            start + chrono::Duration::days(10),
            Some(AdministrationId(1)),
        );
        assert!(result.is_ok());
    }
}
