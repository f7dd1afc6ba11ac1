use super::{entity_client, ActorClient};
use crate::error::LedgerError;
use crate::model::{Bull, BullCreate, BullDeletion, BullId, BullUpdate, DeleteOutcome};
use tracing::{debug, instrument};

entity_client!(BullClient, Bull, bull, bulls, deletion = BullDeletion);

impl BullClient {
    /// Straws left in the bull's reserve.
    #[instrument(skip(self))]
    pub async fn semen_units(&self, id: BullId) -> Result<u32, LedgerError> {
        debug!("Checking semen reserve");
        Ok(self.fetch(id).await?.semen_units)
    }
}
