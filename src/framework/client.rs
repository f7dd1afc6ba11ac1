//! # Resource Client
//!
//! Typed handle over the shared herd mailbox. One `ResourceClient<T>` per
//! record type; all of them feed the same actor.

use super::entity::HerdEntity;
use super::message::{HerdRequest, ResourceRequest, Response};
use crate::error::LedgerError;
use crate::model::DeleteOutcome;
use std::marker::PhantomData;
use tokio::sync::{mpsc, oneshot};

pub struct ResourceClient<T: HerdEntity> {
    sender: mpsc::Sender<HerdRequest>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: HerdEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self::new(self.sender.clone())
    }
}

impl<T: HerdEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<HerdRequest>) -> Self {
        Self {
            sender,
            _entity: PhantomData,
        }
    }

    /// Sends any mailbox message that carries a reply channel.
    pub async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> HerdRequest,
    ) -> Result<R, LedgerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| LedgerError::Unavailable("actor closed".into()))?;
        response
            .await
            .map_err(|_| LedgerError::Unavailable("actor dropped response channel".into()))?
    }

    async fn send<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, LedgerError> {
        self.call(|respond_to| T::route(build(respond_to))).await
    }

    pub async fn create(&self, params: T::Create) -> Result<T, LedgerError> {
        self.send(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, LedgerError> {
        self.send(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, LedgerError> {
        self.send(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, LedgerError> {
        self.send(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(
        &self,
        id: T::Id,
        deletion: T::Deletion,
    ) -> Result<DeleteOutcome, LedgerError> {
        self.send(|respond_to| ResourceRequest::Delete {
            id,
            deletion,
            respond_to,
        })
        .await
    }
}
