//! # HerdEntity Trait
//!
//! The contract every record type implements to be managed by the
//! [`HerdActor`](super::HerdActor). Associated types pin each record to its own
//! id and DTOs, so an `AnimalCreate` can never reach the bull table.
//!
//! Mutations are split into two phases:
//!
//! 1. **Stage** (`stage_create`, `stage_update`, `plan_delete`): read-only
//!    against the [`HerdStore`]. Validation, code assignment and ledger
//!    planning happen here and may fail.
//! 2. **Commit**: performed by the actor. Writes the staged record and applies
//!    the planned [`StockMovement`]s or disposal. Never fails.
//!
//! Because nothing is written until staging succeeds, a rejected request
//! leaves the store untouched.

use super::message::{HerdRequest, ResourceRequest};
use super::table::Table;
use crate::error::LedgerError;
use crate::ledger::StockMovement;
use crate::lifecycle::Disposal;
use crate::store::HerdStore;
use chrono::NaiveDate;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A fully validated record together with the stock movements its commit
/// must apply.
#[derive(Debug)]
pub struct Staged<T> {
    pub record: T,
    pub movements: Vec<StockMovement>,
}

impl<T> Staged<T> {
    pub fn new(record: T) -> Self {
        Self {
            record,
            movements: Vec::new(),
        }
    }

    pub fn with_movements(record: T, movements: Vec<StockMovement>) -> Self {
        Self { record, movements }
    }
}

pub trait HerdEntity: Clone + Debug + Send + Sync + 'static {
    /// Internal key, converted from the table's sequence counter.
    type Id: Copy + Eq + Ord + Hash + Display + Debug + From<u32> + Send + Sync + 'static;

    type Create: Debug + Send + 'static;

    type Update: Debug + Send + 'static;

    /// Parameters of a delete request (reason, removal date).
    type Deletion: Debug + Default + Send + 'static;

    /// Record label in logs and error messages.
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    /// Value of the unique name index, for records that have one.
    fn name(&self) -> Option<&str> {
        None
    }

    fn table(store: &HerdStore) -> &Table<Self>;

    fn table_mut(store: &mut HerdStore) -> &mut Table<Self>;

    /// Wraps a typed request into the actor's mailbox message.
    fn route(request: ResourceRequest<Self>) -> HerdRequest;

    /// Inverse of [`HerdEntity::route`]; hands back requests for other tables.
    fn unroute(request: HerdRequest) -> Result<ResourceRequest<Self>, HerdRequest>;

    fn stage_create(
        id: Self::Id,
        params: Self::Create,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError>;

    fn stage_update(
        &self,
        update: Self::Update,
        store: &HerdStore,
    ) -> Result<Staged<Self>, LedgerError>;

    fn plan_delete(
        &self,
        deletion: Self::Deletion,
        store: &HerdStore,
        today: NaiveDate,
    ) -> Result<Disposal<Self>, LedgerError>;
}

/// Label of `T` used in log fields and errors, e.g. `Animal`.
pub fn entity_type<T: HerdEntity>() -> &'static str {
    T::ENTITY
}
