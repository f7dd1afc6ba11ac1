use super::HerdConfig;
use crate::clients::HerdClient;
use crate::framework::HerdActor;
use crate::store::HerdStore;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// The running herd: one actor task owning the store, and the client used to
/// reach it.
///
/// ```ignore
/// let config = HerdConfig::load()?;
/// let system = HerdSystem::start(&config);
/// let pen = system.client.enclosures.create_enclosure(params).await?;
/// system.shutdown().await?;
/// ```
pub struct HerdSystem {
    pub client: HerdClient,
    handle: JoinHandle<()>,
}

impl HerdSystem {
    /// Spawns the actor on the current Tokio runtime with an empty store.
    pub fn start(config: &HerdConfig) -> Self {
        Self::start_with_store(config, HerdStore::default())
    }

    pub fn start_with_store(config: &HerdConfig, store: HerdStore) -> Self {
        let (actor, sender) = HerdActor::with_store(config.mailbox_capacity, store);
        let handle = tokio::spawn(actor.run());
        info!(mailbox_capacity = config.mailbox_capacity, "Herd system started");

        Self {
            client: HerdClient::new(sender),
            handle,
        }
    }

    /// Drops this system's client and waits for the actor to drain its
    /// mailbox.
    ///
    /// Clones of [`HerdSystem::client`] held elsewhere keep the actor alive,
    /// so they must be dropped first.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        info!("Shutting down herd system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Actor task failed");
            return Err(RuntimeError::ActorFailed(e.to_string()));
        }

        info!("Herd system shutdown complete.");
        Ok(())
    }
}
