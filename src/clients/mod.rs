//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Every record type gets a client with `create_*`, `get_*`, `list_*`,
//! `update_*` and `delete_*` methods generated by `entity_client!`. Clients
//! with extra domain operations add them in their own module.

pub mod actor_client;
pub mod animal_client;
pub mod bull_client;
pub mod herd_client;
pub mod inventory_client;

pub use actor_client::ActorClient;
pub use animal_client::AnimalClient;
pub use bull_client::BullClient;
pub use herd_client::HerdClient;
pub use inventory_client::InventoryClient;

use crate::error::LedgerError;
use crate::model::{
    Administration, AdministrationCreate, AdministrationId, AdministrationUpdate, DeleteOutcome,
    Enclosure, EnclosureCreate, EnclosureId, EnclosureUpdate, Insemination, InseminationCreate,
    InseminationId, InseminationUpdate,
};

/// Generates a record client and its CRUD methods.
///
/// `entity_client!(AnimalClient, Animal, animal, animals, deletion = AnimalDeletion)`
/// expands to `create_animal`, `get_animal`, `list_animals`, `update_animal`
/// and `delete_animal(id, AnimalDeletion)`. Without `deletion`, the delete
/// method takes only the id.
macro_rules! entity_client {
    ($client:ident, $entity:ident, $one:ident, $many:ident) => {
        $crate::clients::entity_client!(@client $client, $entity, $one, $many);

        paste::paste! {
            impl $client {
                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $one>](
                    &self,
                    id: [<$entity Id>],
                ) -> Result<DeleteOutcome, LedgerError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id, Default::default()).await
                }
            }
        }
    };
    ($client:ident, $entity:ident, $one:ident, $many:ident, deletion = $deletion:ty) => {
        $crate::clients::entity_client!(@client $client, $entity, $one, $many);

        paste::paste! {
            impl $client {
                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $one>](
                    &self,
                    id: [<$entity Id>],
                    deletion: $deletion,
                ) -> Result<DeleteOutcome, LedgerError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id, deletion).await
                }
            }
        }
    };
    (@client $client:ident, $entity:ident, $one:ident, $many:ident) => {
        paste::paste! {
            #[doc = concat!("Client for [`", stringify!($entity), "`] records.")]
            #[derive(Clone)]
            pub struct $client {
                inner: $crate::framework::ResourceClient<$entity>,
            }

            impl $client {
                pub fn new(inner: $crate::framework::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<create_ $one>](
                    &self,
                    params: [<$entity Create>],
                ) -> Result<$entity, LedgerError> {
                    tracing::debug!("Sending request");
                    self.inner.create(params).await
                }

                pub async fn [<get_ $one>](
                    &self,
                    id: [<$entity Id>],
                ) -> Result<Option<$entity>, LedgerError> {
                    $crate::clients::ActorClient::get(self, id).await
                }

                pub async fn [<list_ $many>](&self) -> Result<Vec<$entity>, LedgerError> {
                    $crate::clients::ActorClient::list(self).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $one>](
                    &self,
                    id: [<$entity Id>],
                    update: [<$entity Update>],
                ) -> Result<$entity, LedgerError> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, update).await
                }
            }

            #[async_trait::async_trait]
            impl $crate::clients::ActorClient<$entity> for $client {
                fn inner(&self) -> &$crate::framework::ResourceClient<$entity> {
                    &self.inner
                }
            }
        }
    };
}

pub(crate) use entity_client;

entity_client!(EnclosureClient, Enclosure, enclosure, enclosures);
entity_client!(AdministrationClient, Administration, administration, administrations);
entity_client!(InseminationClient, Insemination, insemination, inseminations);
