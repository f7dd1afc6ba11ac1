use crate::error::LedgerError;
use crate::framework::{entity_type, HerdEntity, ResourceClient};
use async_trait::async_trait;

/// Read operations shared by every record client.
///
/// Implementors only hand out their inner [`ResourceClient`]; `get`, `fetch`
/// and `list` come for free.
#[async_trait]
pub trait ActorClient<T: HerdEntity>: Send + Sync {
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch a record by id, `None` if it does not exist.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, LedgerError> {
        tracing::debug!("Sending request");
        self.inner().get(id).await
    }

    /// Like [`ActorClient::get`], but a missing record is a `NotFoundError`.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<T, LedgerError> {
        self.get(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(entity_type::<T>(), id))
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, LedgerError> {
        tracing::debug!("Sending request");
        self.inner().list().await
    }
}
