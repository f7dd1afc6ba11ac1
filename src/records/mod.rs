//! [`HerdEntity`](crate::framework::HerdEntity) implementations, one per record type.
//!
//! Each `stage_create` / `stage_update` collects every validation violation
//! first, then asks the ledger for the stock movements the write implies.
//! Nothing here mutates the store.

mod administration;
mod animal;
mod bull;
mod enclosure;
mod insemination;
mod inventory;
