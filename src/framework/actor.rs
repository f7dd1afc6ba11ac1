//! # Herd Actor
//!
//! The single task that owns the [`HerdStore`]. Requests are processed one at
//! a time, so code generation scans and stock read-modify-write sequences
//! never interleave, and the store needs no locks.
//!
//! ```text
//! client ──HerdRequest──▶ mailbox ──▶ HerdActor::run
//!                                         │ stage (validate, assign code, plan ledger)
//!                                         │ commit (write record, apply movements)
//! client ◀──────── oneshot reply ─────────┘
//! ```

use super::entity::{entity_type, HerdEntity, Staged};
use super::message::{HerdRequest, ResourceRequest};
use crate::error::LedgerError;
use crate::ledger;
use crate::lifecycle;
use crate::model::{DeleteOutcome, InventoryItem, InventoryKind};
use crate::store::HerdStore;
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct HerdActor {
    receiver: mpsc::Receiver<HerdRequest>,
    store: HerdStore,
}

impl HerdActor {
    /// Creates the actor and the sender half of its mailbox.
    ///
    /// `buffer_size` bounds the number of queued requests; senders wait when
    /// the mailbox is full.
    pub fn new(buffer_size: usize) -> (Self, mpsc::Sender<HerdRequest>) {
        Self::with_store(buffer_size, HerdStore::default())
    }

    pub fn with_store(buffer_size: usize, store: HerdStore) -> (Self, mpsc::Sender<HerdRequest>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver, store }, sender)
    }

    /// Processes requests until every sender has been dropped.
    pub async fn run(mut self) {
        info!("Herd actor started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                HerdRequest::Enclosure(request) => self.handle(request),
                HerdRequest::Animal(request) => self.handle(request),
                HerdRequest::Bull(request) => self.handle(request),
                HerdRequest::InventoryItem(request) => self.handle(request),
                HerdRequest::Administration(request) => self.handle(request),
                HerdRequest::Insemination(request) => self.handle(request),
                HerdRequest::InventoryByKind { kind, respond_to } => {
                    let items = self.inventory_by_kind(kind);
                    debug!(%kind, found = items.len(), "Inventory by kind");
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(
            animals = self.store.animals.len(),
            bulls = self.store.bulls.len(),
            inventory = self.store.inventory.len(),
            "Shutdown"
        );
    }

    fn handle<T: HerdEntity>(&mut self, request: ResourceRequest<T>) {
        let entity_type = entity_type::<T>();

        match request {
            ResourceRequest::Create { params, respond_to } => {
                debug!(entity_type, ?params, "Create");
                let result = self.create::<T>(params);
                match &result {
                    Ok(record) => info!(
                        entity_type,
                        id = %record.id(),
                        code = record.code(),
                        size = T::table(&self.store).len(),
                        "Created"
                    ),
                    Err(e) => warn!(entity_type, error = %e, "Create failed"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Get { id, respond_to } => {
                let record = T::table(&self.store).get(id).cloned();
                debug!(entity_type, %id, found = record.is_some(), "Get");
                let _ = respond_to.send(Ok(record));
            }
            ResourceRequest::List { respond_to } => {
                let records: Vec<T> = T::table(&self.store).iter().cloned().collect();
                debug!(entity_type, size = records.len(), "List");
                let _ = respond_to.send(Ok(records));
            }
            ResourceRequest::Update {
                id,
                update,
                respond_to,
            } => {
                debug!(entity_type, %id, ?update, "Update");
                let result = self.update::<T>(id, update);
                match &result {
                    Ok(_) => info!(entity_type, %id, "Updated"),
                    Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete {
                id,
                deletion,
                respond_to,
            } => {
                debug!(entity_type, %id, ?deletion, "Delete");
                let result = self.delete::<T>(id, deletion);
                match &result {
                    Ok(outcome) => info!(
                        entity_type,
                        %id,
                        status = %outcome.status,
                        size = T::table(&self.store).len(),
                        "Deleted"
                    ),
                    Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                }
                let _ = respond_to.send(result);
            }
        }
    }

    fn create<T: HerdEntity>(&mut self, params: T::Create) -> Result<T, LedgerError> {
        let id = T::table(&self.store).peek_id();
        let staged = T::stage_create(id, params, &self.store)?;
        Ok(self.commit(staged))
    }

    fn update<T: HerdEntity>(&mut self, id: T::Id, update: T::Update) -> Result<T, LedgerError> {
        let current = T::table(&self.store)
            .get(id)
            .ok_or_else(|| LedgerError::not_found(entity_type::<T>(), id))?;
        let staged = current.stage_update(update, &self.store)?;
        Ok(self.commit(staged))
    }

    fn delete<T: HerdEntity>(
        &mut self,
        id: T::Id,
        deletion: T::Deletion,
    ) -> Result<DeleteOutcome, LedgerError> {
        let current = T::table(&self.store)
            .get(id)
            .ok_or_else(|| LedgerError::not_found(entity_type::<T>(), id))?;
        let today = Local::now().date_naive();
        let disposal = current.plan_delete(deletion, &self.store, today)?;
        Ok(lifecycle::apply(&mut self.store, disposal))
    }

    fn commit<T: HerdEntity>(&mut self, staged: Staged<T>) -> T {
        let record = staged.record.clone();
        T::table_mut(&mut self.store).put(staged.record);
        ledger::apply(&mut self.store, &staged.movements);
        record
    }

    fn inventory_by_kind(&self, kind: InventoryKind) -> Vec<InventoryItem> {
        self.store
            .inventory
            .iter()
            .filter(|item| item.kind == kind)
            .cloned()
            .collect()
    }
}
