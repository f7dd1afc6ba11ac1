use crate::codes::{self, Prefix};
use crate::error::LedgerError;
use crate::framework::{herd_routing, HerdEntity, Staged, Table};
use crate::ledger;
use crate::lifecycle::{self, Disposal};
use crate::model::{
    Administration, AdministrationCreate, AdministrationId, AdministrationUpdate, InventoryItem,
    InventoryKind,
};
use crate::store::HerdStore;
use crate::validation::{self, Checks};
use chrono::NaiveDate;

fn check_kind(kind: InventoryKind, item: &InventoryItem) -> Result<(), LedgerError> {
    if kind != item.kind {
        return Err(LedgerError::TypeMismatch {
            administration: kind.to_string(),
            item: format!("{} is a {}", item.code, item.kind),
        });
    }
    Ok(())
}

fn check_record(record: &Administration, checks: &mut Checks) {
    checks.check(validation::not_blank("responsible", &record.responsible));
    checks.check(validation::ordered(
        "startDate",
        record.start_date,
        "endDate",
        record.end_date,
    ));
}

impl HerdEntity for Administration {
    type Id = AdministrationId;
    type Create = AdministrationCreate;
    type Update = AdministrationUpdate;
    type Deletion = ();

    const ENTITY: &'static str = "Administration";

    fn id(&self) -> AdministrationId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn table(store: &HerdStore) -> &Table<Self> {
        &store.administrations
    }

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self> {
        &mut store.administrations
    }

    herd_routing!(Administration);

    fn stage_create(
        id: AdministrationId,
        params: AdministrationCreate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.administrations;
        let mut checks = Checks::new();
        let code = checks
            .take(codes::resolve(
                Prefix::Administration,
                params.code.as_deref(),
                table.codes(),
                |code| table.code_owner(code).is_some(),
            ))
            .unwrap_or_default();

        let animal = checks
            .take(validation::require("animal", params.animal))
            .and_then(|animal| checks.take(validation::exists(&store.animals, animal)));
        let item = checks
            .take(validation::require("inventoryItem", params.inventory_item))
            .and_then(|item| checks.take(validation::exists(&store.inventory, item)));
        if let Some(item) = item {
            checks.check(check_kind(params.kind, item));
        }

        checks.check(validation::not_blank("responsible", &params.responsible));
        checks.check(validation::ordered(
            "startDate",
            params.start_date,
            "endDate",
            params.end_date,
        ));
        checks.finish()?;

        // Both lookups succeeded, otherwise `finish` has already failed.
        let (Some(animal), Some(item)) = (animal, item) else {
            return Err(LedgerError::Required { field: "animal" });
        };
        let record = Administration {
            id,
            code,
            animal: Some(animal.id),
            inventory_item: item.id,
            kind: params.kind,
            route: params.route,
            start_date: params.start_date,
            end_date: params.end_date,
            responsible: params.responsible.trim().to_string(),
        };

        ledger::check_repeat_window(store, animal.id, item.id, record.start_date, None)?;
        let movements = ledger::plan_administration(item)?;
        Ok(Staged::with_movements(record, movements))
    }

    fn stage_update(
        &self,
        update: AdministrationUpdate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.administrations;
        let mut next = self.clone();
        let mut checks = Checks::new();

        if let Some(code) = update.code {
            if let Some(code) = checks.take(codes::resolve(
                Prefix::Administration,
                Some(&code),
                table.codes(),
                |c| table.code_owner(c).is_some_and(|owner| owner != self.id),
            )) {
                next.code = code;
            }
        }
        if let Some(animal) = update.animal {
            checks.check(validation::exists(&store.animals, animal).map(drop));
            next.animal = Some(animal);
        }
        if let Some(kind) = update.kind {
            next.kind = kind;
        }
        if let Some(route) = update.route {
            next.route = route;
        }
        if let Some(start_date) = update.start_date {
            next.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            next.end_date = end_date;
        }
        if let Some(responsible) = update.responsible {
            next.responsible = responsible.trim().to_string();
        }

        let item_id = update.inventory_item.unwrap_or(self.inventory_item);
        let item = checks.take(validation::exists(&store.inventory, item_id));
        if let Some(item) = item {
            checks.check(check_kind(next.kind, item));
            next.inventory_item = item.id;
        }
        check_record(&next, &mut checks);
        checks.finish()?;

        let Some(item) = item else {
            return Err(LedgerError::not_found("InventoryItem", item_id));
        };
        if let Some(animal) = next.animal {
            ledger::check_repeat_window(store, animal, item.id, next.start_date, Some(self.id))?;
        }
        let movements =
            ledger::plan_administration_reassignment(store, self.inventory_item, item)?;
        Ok(Staged::with_movements(next, movements))
    }

    fn plan_delete(
        &self,
        _deletion: (),
        _store: &HerdStore,
        _today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError> {
        Ok(lifecycle::plan_administration(self))
    }
}
