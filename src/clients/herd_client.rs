use super::{
    AdministrationClient, AnimalClient, BullClient, EnclosureClient, InseminationClient,
    InventoryClient,
};
use crate::error::LedgerError;
use crate::framework::{HerdRequest, ResourceClient};
use crate::model::{InventoryItem, InventoryKind};
use tokio::sync::mpsc;

/// One client per record type, all feeding the same actor mailbox.
#[derive(Clone)]
pub struct HerdClient {
    pub enclosures: EnclosureClient,
    pub animals: AnimalClient,
    pub bulls: BullClient,
    pub inventory: InventoryClient,
    pub administrations: AdministrationClient,
    pub inseminations: InseminationClient,
}

impl HerdClient {
    pub fn new(sender: mpsc::Sender<HerdRequest>) -> Self {
        Self {
            enclosures: EnclosureClient::new(ResourceClient::new(sender.clone())),
            animals: AnimalClient::new(ResourceClient::new(sender.clone())),
            bulls: BullClient::new(ResourceClient::new(sender.clone())),
            inventory: InventoryClient::new(ResourceClient::new(sender.clone())),
            administrations: AdministrationClient::new(ResourceClient::new(sender.clone())),
            inseminations: InseminationClient::new(ResourceClient::new(sender)),
        }
    }

    pub async fn list_inventory_by_kind(
        &self,
        kind: InventoryKind,
    ) -> Result<Vec<InventoryItem>, LedgerError> {
        self.inventory.list_inventory_by_kind(kind).await
    }
}
