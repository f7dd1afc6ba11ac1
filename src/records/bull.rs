use crate::codes::{self, Prefix};
use crate::error::LedgerError;
use crate::framework::{herd_routing, HerdEntity, Staged, Table};
use crate::lifecycle::{self, Disposal};
use crate::model::{Bull, BullCreate, BullDeletion, BullId, BullUpdate, RecordStatus, VitalState};
use crate::store::HerdStore;
use crate::validation::{self, Checks};
use chrono::NaiveDate;

fn check_record(bull: &Bull, checks: &mut Checks) {
    checks.check(validation::not_blank("name", &bull.name));
    checks.check(validation::score("legQuality", bull.leg_quality));
    checks.check(validation::score("udderQuality", bull.udder_quality));
    checks.check(validation::finite("milkTransmission", bull.transmission.milk));
    checks.check(validation::finite(
        "somaticCellTransmission",
        bull.transmission.somatic_cells,
    ));
    checks.check(validation::finite("fatTransmission", bull.transmission.fat));
    checks.check(validation::finite(
        "proteinTransmission",
        bull.transmission.protein,
    ));
}

fn status_for(vital_state: VitalState) -> RecordStatus {
    match vital_state {
        VitalState::Alive => RecordStatus::Active,
        VitalState::Deceased | VitalState::Other => RecordStatus::Retired,
    }
}

impl HerdEntity for Bull {
    type Id = BullId;
    type Create = BullCreate;
    type Update = BullUpdate;
    type Deletion = BullDeletion;

    const ENTITY: &'static str = "Bull";

    fn id(&self) -> BullId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn table(store: &HerdStore) -> &Table<Self> {
        &store.bulls
    }

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self> {
        &mut store.bulls
    }

    herd_routing!(Bull);

    fn stage_create(
        id: BullId,
        params: BullCreate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.bulls;
        let mut checks = Checks::new();
        checks.check(validation::unique_name(table, &params.name, None));
        let code = checks
            .take(codes::resolve(
                Prefix::Bull,
                params.code.as_deref(),
                table.codes(),
                |code| table.code_owner(code).is_some(),
            ))
            .unwrap_or_default();

        let vital_state = params.vital_state.unwrap_or(VitalState::Alive);
        let bull = Bull {
            id,
            code,
            name: params.name.trim().to_string(),
            vital_state,
            status: status_for(vital_state),
            semen_units: params.semen_units,
            leg_quality: params.leg_quality,
            udder_quality: params.udder_quality,
            transmission: params.transmission,
            note: params.note,
        };
        check_record(&bull, &mut checks);
        checks.finish()?;

        Ok(Staged::new(bull))
    }

    fn stage_update(
        &self,
        update: BullUpdate,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError> {
        let table = &store.bulls;
        let mut next = self.clone();
        let mut checks = Checks::new();

        if let Some(code) = update.code {
            if let Some(code) = checks.take(codes::resolve(
                Prefix::Bull,
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
        if let Some(vital_state) = update.vital_state {
            next.vital_state = vital_state;
            next.status = status_for(vital_state);
        }
        if let Some(units) = update.semen_units {
            next.semen_units = units;
        }
        if let Some(score) = update.leg_quality {
            next.leg_quality = score;
        }
        if let Some(score) = update.udder_quality {
            next.udder_quality = score;
        }
        if let Some(transmission) = update.transmission {
            next.transmission = transmission;
        }
        if let Some(note) = update.note {
            next.note = note;
        }
        check_record(&next, &mut checks);
        checks.finish()?;

        Ok(Staged::new(next))
    }

    fn plan_delete(
        &self,
        deletion: BullDeletion,
        store: &HerdStore,
        _today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError> {
        lifecycle::plan_bull(self, deletion, store)
    }
}
