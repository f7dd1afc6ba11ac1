use crate::codes::{self, Prefix};
use crate::error::LedgerError;
use crate::framework::{herd_routing, HerdEntity, Staged, Table};
use crate::ledger;
use crate::lifecycle::{self, Disposal};
use crate::model::{Insemination, InseminationCreate, InseminationId, InseminationUpdate};
use crate::store::HerdStore;
use crate::validation::{self, Checks};
use chrono::NaiveDate;

impl HerdEntity for Insemination {
    type Id = InseminationId;
    type Create = InseminationCreate;
    type Update = InseminationUpdate;
    type Deletion = ();

    const ENTITY: &'static str = "Insemination";

    fn id(&self) -> InseminationId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn table(store: &HerdStore) -> &Table<Self> {
        &store.inseminations
    }

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self> {
        &mut store.inseminations
    }

    herd_routing!(Insemination);

    fn stage_create(
        id: InseminationId,
        params: InseminationCreate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.inseminations;
        let mut checks = Checks::new();
        let code = checks
            .take(codes::resolve(
                Prefix::Insemination,
                params.code.as_deref(),
                table.codes(),
                |code| table.code_owner(code).is_some(),
            ))
            .unwrap_or_default();

        let animal = checks
            .take(validation::require("animal", params.animal))
            .and_then(|animal| checks.take(validation::exists(&store.animals, animal)));
        let bull = checks
            .take(validation::require("bull", params.bull))
            .and_then(|bull| checks.take(validation::exists(&store.bulls, bull)));
        checks.check(validation::not_blank("responsible", &params.responsible));
        checks.finish()?;

        // Both lookups succeeded, otherwise `finish` has already failed.
        let (Some(animal), Some(bull)) = (animal, bull) else {
            return Err(LedgerError::Required { field: "bull" });
        };
        let movements = ledger::plan_insemination(bull)?;
        Ok(Staged::with_movements(
            Insemination {
                id,
                code,
                animal: Some(animal.id),
                bull: Some(bull.id),
                reason: params.reason,
                date: params.date,
                time: params.time,
                is_sexed: params.is_sexed,
                responsible: params.responsible.trim().to_string(),
            },
            movements,
        ))
    }

    fn stage_update(
        &self,
        update: InseminationUpdate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.inseminations;
        let mut next = self.clone();
        let mut checks = Checks::new();

        if let Some(code) = update.code {
            if let Some(code) = checks.take(codes::resolve(
                Prefix::Insemination,
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
        let bull = update
            .bull
            .and_then(|bull| checks.take(validation::exists(&store.bulls, bull)));
        if let Some(reason) = update.reason {
            next.reason = reason;
        }
        if let Some(date) = update.date {
            next.date = date;
        }
        if let Some(time) = update.time {
            next.time = time;
        }
        if let Some(is_sexed) = update.is_sexed {
            next.is_sexed = is_sexed;
        }
        if let Some(responsible) = update.responsible {
            checks.check(validation::not_blank("responsible", &responsible));
            next.responsible = responsible.trim().to_string();
        }
        checks.finish()?;

        let movements = match bull {
            Some(bull) => {
                next.bull = Some(bull.id);
                ledger::plan_insemination_reassignment(store, self.bull, bull)?
            }
            None => Vec::new(),
        };
        Ok(Staged::with_movements(next, movements))
    }

    fn plan_delete(
        &self,
        _deletion: (),
        _store: &HerdStore,
        _today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError> {
        Ok(lifecycle::plan_insemination(self))
    }
}
