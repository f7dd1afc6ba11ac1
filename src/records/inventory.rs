use crate::codes::{self, Prefix};
use crate::error::LedgerError;
use crate::framework::{herd_routing, HerdEntity, Staged, Table};
use crate::lifecycle::{self, Disposal};
use crate::model::{
    Availability, InventoryDeletion, InventoryItem, InventoryItemCreate, InventoryItemId,
    InventoryItemUpdate, RecordStatus,
};
use crate::store::HerdStore;
use crate::validation::{self, Checks};
use chrono::NaiveDate;

fn status_for(availability: Availability) -> RecordStatus {
    match availability {
        Availability::Active => RecordStatus::Active,
        Availability::Inactive => RecordStatus::Retired,
    }
}

impl HerdEntity for InventoryItem {
    type Id = InventoryItemId;
    type Create = InventoryItemCreate;
    type Update = InventoryItemUpdate;
    type Deletion = InventoryDeletion;

    const ENTITY: &'static str = "InventoryItem";

    fn id(&self) -> InventoryItemId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn table(store: &HerdStore) -> &Table<Self> {
        &store.inventory
    }

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self> {
        &mut store.inventory
    }

    herd_routing!(InventoryItem);

    fn stage_create(
        id: InventoryItemId,
        params: InventoryItemCreate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.inventory;
        let mut checks = Checks::new();
        checks.check(validation::not_blank("name", &params.name));
        checks.check(validation::unique_name(table, &params.name, None));
        checks.check(validation::unit_count(params.unit_count));
        let code = checks
            .take(codes::resolve(
                Prefix::Inventory,
                params.code.as_deref(),
                table.codes(),
                |code| table.code_owner(code).is_some(),
            ))
            .unwrap_or_default();
        checks.finish()?;

        let availability = params.availability.unwrap_or_default();
        Ok(Staged::new(InventoryItem {
            id,
            code,
            kind: params.kind,
            name: params.name.trim().to_string(),
            unit_count: params.unit_count,
            packaging: params.packaging,
            availability,
            status: status_for(availability),
        }))
    }

    fn stage_update(
        &self,
        update: InventoryItemUpdate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.inventory;
        let mut next = self.clone();
        let mut checks = Checks::new();

        if let Some(code) = update.code {
            if let Some(code) = checks.take(codes::resolve(
                Prefix::Inventory,
                Some(&code),
                table.codes(),
                |c| table.code_owner(c).is_some_and(|owner| owner != self.id),
            )) {
                next.code = code;
            }
        }
        if let Some(name) = update.name {
            checks.check(validation::not_blank("name", &name));
            checks.check(validation::unique_name(table, &name, Some(self.id)));
            next.name = name.trim().to_string();
        }
        if let Some(kind) = update.kind.filter(|kind| *kind != self.kind) {
            let referencing = store.administrations_of_item(self.id).count();
            if referencing > 0 {
                checks.push(LedgerError::conflict(
                    "kind",
                    format!(
                        "{} is referenced by {referencing} administrations of kind {}",
                        self.code, self.kind
                    ),
                ));
            }
            next.kind = kind;
        }
        if let Some(units) = update.unit_count {
            checks.check(validation::unit_count(units));
            next.unit_count = units;
        }
        if let Some(packaging) = update.packaging {
            next.packaging = packaging;
        }
        if let Some(availability) = update.availability {
            next.availability = availability;
            next.status = status_for(availability);
        }
        checks.finish()?;

        Ok(Staged::new(next))
    }

    fn plan_delete(
        &self,
        deletion: InventoryDeletion,
        store: &HerdStore,
        _today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError> {
        lifecycle::plan_inventory_item(self, deletion, store)
    }
}
