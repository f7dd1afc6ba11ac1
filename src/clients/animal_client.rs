//! # Animal Client
//!
//! CRUD for [`Animal`] records plus shorthands for the two retirement
//! outcomes.

use super::entity_client;
use crate::error::LedgerError;
use crate::lifecycle::reason::{DEAD, SOLD};
use crate::model::{Animal, AnimalCreate, AnimalDeletion, AnimalId, AnimalUpdate, DeleteOutcome};
use chrono::NaiveDate;
use tracing::{debug, instrument};

entity_client!(AnimalClient, Animal, animal, animals, deletion = AnimalDeletion);

impl AnimalClient {
    /// Retires the animal as sold on `date`.
    #[instrument(skip(self))]
    pub async fn sell(&self, id: AnimalId, date: NaiveDate) -> Result<DeleteOutcome, LedgerError> {
        debug!("Selling animal");
        self.delete_animal(
            id,
            AnimalDeletion {
                reason: Some(SOLD.into()),
                removal_date: Some(date),
                note: None,
            },
        )
        .await
    }

    /// Retires the animal as dead on `date`; `note` replaces any earlier note.
    #[instrument(skip(self))]
    pub async fn record_death(
        &self,
        id: AnimalId,
        date: NaiveDate,
        note: Option<String>,
    ) -> Result<DeleteOutcome, LedgerError> {
        debug!("Recording death");
        self.delete_animal(
            id,
            AnimalDeletion {
                reason: Some(DEAD.into()),
                removal_date: Some(date),
                note,
            },
        )
        .await
    }
}
