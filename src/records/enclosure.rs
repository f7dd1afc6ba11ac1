use crate::codes::{self, Prefix};
use crate::error::LedgerError;
use crate::framework::{herd_routing, HerdEntity, Staged, Table};
use crate::lifecycle::{self, Disposal};
use crate::model::{Enclosure, EnclosureCreate, EnclosureId, EnclosureUpdate};
use crate::store::HerdStore;
use crate::validation::{self, Checks};
use chrono::NaiveDate;

impl HerdEntity for Enclosure {
    type Id = EnclosureId;
    type Create = EnclosureCreate;
    type Update = EnclosureUpdate;
    type Deletion = ();

    const ENTITY: &'static str = "Enclosure";

    fn id(&self) -> EnclosureId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn table(store: &HerdStore) -> &Table<Self> {
        &store.enclosures
    }

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self> {
        &mut store.enclosures
    }

    herd_routing!(Enclosure);

    fn stage_create(
        id: EnclosureId,
        params: EnclosureCreate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.enclosures;
        let mut checks = Checks::new();
        checks.check(validation::not_blank("name", &params.name));
        checks.check(validation::unique_name(table, &params.name, None));
        let code = checks
            .take(codes::resolve(
                Prefix::Enclosure,
                params.code.as_deref(),
                table.codes(),
                |code| table.code_owner(code).is_some(),
            ))
            .unwrap_or_default();
        checks.finish()?;

        Ok(Staged::new(Enclosure {
            id,
            code,
            name: params.name.trim().to_string(),
        }))
    }

    fn stage_update(
        &self,
        update: EnclosureUpdate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.enclosures;
        let mut next = self.clone();
        let mut checks = Checks::new();

        if let Some(name) = update.name {
            checks.check(validation::not_blank("name", &name));
            checks.check(validation::unique_name(table, &name, Some(self.id)));
            next.name = name.trim().to_string();
        }
        if let Some(code) = update.code {
            if let Some(code) = checks.take(codes::resolve(
                Prefix::Enclosure,
                Some(&code),
                table.codes(),
                |c| table.code_owner(c).is_some_and(|owner| owner != self.id),
            )) {
                next.code = code;
            }
        }
        checks.finish()?;
        Ok(Staged::new(next))
    }

    fn plan_delete(
        &self,
        _deletion: (),
        store: &HerdStore,
        _today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError> {
        lifecycle::plan_enclosure(self, store)
    }
}
