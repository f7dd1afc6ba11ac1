//! # Inventory Client
//!
//! CRUD for treatment and vaccine stock, plus the read-only kind filter and
//! a stock check used before planning administrations.

use super::{entity_client, ActorClient};
use crate::error::LedgerError;
use crate::framework::HerdRequest;
use crate::model::{
    DeleteOutcome, InventoryDeletion, InventoryItem, InventoryItemCreate, InventoryItemId,
    InventoryItemUpdate, InventoryKind,
};
use tracing::{debug, instrument};

entity_client!(
    InventoryClient,
    InventoryItem,
    inventory_item,
    inventory_items,
    deletion = InventoryDeletion
);

impl InventoryClient {
    /// Units left for the item.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: InventoryItemId) -> Result<u32, LedgerError> {
        debug!("Checking stock");
        Ok(self.fetch(id).await?.unit_count)
    }

    #[instrument(skip(self))]
    pub async fn list_inventory_by_kind(
        &self,
        kind: InventoryKind,
    ) -> Result<Vec<InventoryItem>, LedgerError> {
        debug!("Sending request");
        self.inner
            .call(|respond_to| HerdRequest::InventoryByKind { kind, respond_to })
            .await
    }
}
