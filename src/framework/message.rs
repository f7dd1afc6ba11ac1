//! # Mailbox Messages
//!
//! Requests sent from clients to the [`HerdActor`](super::HerdActor). Each
//! record type speaks the same CRUD vocabulary through [`ResourceRequest`];
//! [`HerdRequest`] multiplexes them onto the single mailbox that owns the
//! whole store.

use super::entity::HerdEntity;
use crate::error::LedgerError;
use crate::model::{
    Administration, Animal, Bull, DeleteOutcome, Enclosure, Insemination, InventoryItem,
    InventoryKind,
};
use tokio::sync::oneshot;

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, LedgerError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: HerdEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        deletion: T::Deletion,
        respond_to: Response<DeleteOutcome>,
    },
}

#[derive(Debug)]
pub enum HerdRequest {
    Enclosure(ResourceRequest<Enclosure>),
    Animal(ResourceRequest<Animal>),
    Bull(ResourceRequest<Bull>),
    InventoryItem(ResourceRequest<InventoryItem>),
    Administration(ResourceRequest<Administration>),
    Insemination(ResourceRequest<Insemination>),
    InventoryByKind {
        kind: InventoryKind,
        respond_to: Response<Vec<InventoryItem>>,
    },
}

/// Expands to the `route`/`unroute` pair of a [`HerdEntity`] impl whose
/// [`HerdRequest`] variant has the same name as the record type.
macro_rules! herd_routing {
    ($variant:ident) => {
        fn route(
            request: $crate::framework::ResourceRequest<Self>,
        ) -> $crate::framework::HerdRequest {
            $crate::framework::HerdRequest::$variant(request)
        }

        fn unroute(
            request: $crate::framework::HerdRequest,
        ) -> Result<$crate::framework::ResourceRequest<Self>, $crate::framework::HerdRequest> {
            match request {
                $crate::framework::HerdRequest::$variant(request) => Ok(request),
                other => Err(other),
            }
        }
    };
}

pub(crate) use herd_routing;
