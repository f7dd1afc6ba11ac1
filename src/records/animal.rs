use crate::codes::{self, Prefix};
use crate::error::LedgerError;
use crate::framework::{herd_routing, HerdEntity, Staged, Table};
use crate::lifecycle::{self, Disposal};
use crate::model::{
    Animal, AnimalCreate, AnimalDeletion, AnimalId, AnimalUpdate, Category, LifeState,
    RecordStatus,
};
use crate::store::HerdStore;
use crate::validation::{self, Checks};
use chrono::NaiveDate;

fn prefix_for(category: Category) -> Prefix {
    match category {
        Category::Adult => Prefix::Adult,
        Category::Juvenile => Prefix::Juvenile,
    }
}

fn status_for(life_state: LifeState) -> RecordStatus {
    if life_state.is_terminal() {
        RecordStatus::Retired
    } else {
        RecordStatus::Active
    }
}

/// Derives `status` from the life state; a retired animal holds no pen.
fn settle_status(animal: &mut Animal) {
    animal.status = status_for(animal.life_state);
    if animal.status == RecordStatus::Retired {
        animal.enclosure = None;
    }
}

/// Rules shared by create and update, applied to the candidate record.
fn check_record(animal: &Animal, checks: &mut Checks) {
    checks.check(validation::not_blank("name", &animal.name));
    validation::biometrics(&animal.biometrics, checks);
    checks.check(validation::removal_matches_state(
        animal.life_state,
        animal.removal_date,
    ));
    if let Some(removal_date) = animal.removal_date {
        checks.check(validation::ordered(
            "birthDate",
            animal.birth_date,
            "removalDate",
            removal_date,
        ));
    }
}

impl HerdEntity for Animal {
    type Id = AnimalId;
    type Create = AnimalCreate;
    type Update = AnimalUpdate;
    type Deletion = AnimalDeletion;

    const ENTITY: &'static str = "Animal";

    fn id(&self) -> AnimalId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn table(store: &HerdStore) -> &Table<Self> {
        &store.animals
    }

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self> {
        &mut store.animals
    }

    herd_routing!(Animal);

    fn stage_create(
        id: AnimalId,
        params: AnimalCreate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.animals;
        let mut checks = Checks::new();

        checks.check(validation::unique_name(table, &params.name, None));
        let code = checks
            .take(codes::resolve(
                prefix_for(params.category),
                params.code.as_deref(),
                table.codes(),
                |code| table.code_owner(code).is_some(),
            ))
            .unwrap_or_default();

        if let Some(sire) = checks.take(validation::require("sire", params.sire)) {
            checks.check(validation::exists(&store.bulls, sire).map(drop));
        }
        if let Some(dam) = checks.take(validation::require("dam", params.dam)) {
            checks.check(validation::exists(&store.animals, dam).map(drop));
        }
        if let Some(enclosure) = checks.take(validation::require("enclosure", params.enclosure)) {
            checks.check(validation::exists(&store.enclosures, enclosure).map(drop));
        }

        let life_state = params
            .life_state
            .unwrap_or_else(|| LifeState::default_for(params.category));
        let mut animal = Animal {
            id,
            code,
            category: params.category,
            life_state,
            status: RecordStatus::Active,
            name: params.name.trim().to_string(),
            birth_date: params.birth_date,
            sire: params.sire,
            dam: params.dam,
            enclosure: params.enclosure,
            biometrics: params.biometrics,
            removal_date: params.removal_date,
            note: params.note,
        };
        settle_status(&mut animal);
        check_record(&animal, &mut checks);
        checks.finish()?;

        Ok(Staged::new(animal))
    }

    fn stage_update(
        &self,
        update: AnimalUpdate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.animals;
        let mut next = self.clone();
        let mut checks = Checks::new();

        if let Some(code) = update.code {
            if let Some(code) = checks.take(codes::resolve(
                prefix_for(self.category),
                Some(&code),
                table.codes(),
                |c| table.code_owner(c).is_some_and(|owner| owner != self.id),
            )) {
                next.code = code;
            }
        }
        if let Some(name) = update.name {
            checks.check(validation::unique_name(table, &name, Some(self.id)));
            next.name = name.trim().to_string();
        }
        if let Some(sire) = update.sire {
            if let Some(sire) = sire {
                checks.check(validation::exists(&store.bulls, sire).map(drop));
            }
            next.sire = sire;
        }
        if let Some(dam) = update.dam {
            if let Some(dam) = dam {
                match validation::exists(&store.animals, dam) {
                    Ok(_) => checks.check(validation::dam_acyclic(store, self.id, dam)),
                    Err(error) => checks.push(error),
                }
            }
            next.dam = dam;
        }
        if let Some(enclosure) = update.enclosure {
            if let Some(enclosure) = enclosure {
                checks.check(validation::exists(&store.enclosures, enclosure).map(drop));
            }
            next.enclosure = enclosure;
        }
        if let Some(life_state) = update.life_state {
            next.life_state = life_state;
        }
        if let Some(birth_date) = update.birth_date {
            next.birth_date = birth_date;
        }
        if let Some(biometrics) = update.biometrics {
            next.biometrics = biometrics;
        }
        if let Some(removal_date) = update.removal_date {
            next.removal_date = removal_date;
        }
        if let Some(note) = update.note {
            next.note = note;
        }

        settle_status(&mut next);
        if next.status == RecordStatus::Active && next.enclosure.is_none() {
            checks.push(LedgerError::Required { field: "enclosure" });
        }
        check_record(&next, &mut checks);
        checks.finish()?;

        Ok(Staged::new(next))
    }

    fn plan_delete(
        &self,
        deletion: AnimalDeletion,
        store: &HerdStore,
        today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError> {
        lifecycle::plan_animal(self, deletion, store, today)
    }
}
