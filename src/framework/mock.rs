//! # Mock Mailbox
//!
//! Test support for client wrappers. Instead of spawning a [`HerdActor`](super::HerdActor),
//! a test owns the receiving end of the mailbox and answers requests itself,
//! which makes it easy to inject failures such as
//! [`LedgerError::Unavailable`](crate::error::LedgerError::Unavailable).
//!
//! Two styles are supported:
//!
//! - [`create_mock_client`] plus the `expect_*` helpers, when the test wants to
//!   inspect each request payload before replying.
//! - [`MockClient`], a fluent expectation queue answered by a background task.
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Bull>::new();
//! mock.expect_get(BullId(1)).return_ok(Some(bull));
//! let client = BullClient::new(mock.client());
//! assert_eq!(client.semen_units(BullId(1)).await?, 4);
//! mock.verify();
//! ```

use super::client::ResourceClient;
use super::entity::{entity_type, HerdEntity};
use super::message::{HerdRequest, ResourceRequest, Response};
use crate::error::LedgerError;
use crate::model::DeleteOutcome;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

enum Expectation<T: HerdEntity> {
    Create(Result<T, LedgerError>),
    Get(Result<Option<T>, LedgerError>),
    Update(Result<T, LedgerError>),
    Delete(Result<DeleteOutcome, LedgerError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: HerdEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock with an ordered queue of canned replies.
///
/// Panics inside its responder task if a request arrives that does not match
/// the next expectation, which surfaces as a dropped reply in the test.
pub struct MockClient<T: HerdEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: HerdEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HerdEntity> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<HerdRequest>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let Ok(request) = T::unroute(request) else {
                    panic!("Request for a table other than {}", entity_type::<T>());
                };
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> Reply<T, T> {
        Reply::new(self.expectations.clone(), Expectation::Create)
    }

    pub fn expect_get(&mut self, _id: T::Id) -> Reply<T, Option<T>> {
        Reply::new(self.expectations.clone(), Expectation::Get)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> Reply<T, T> {
        Reply::new(self.expectations.clone(), Expectation::Update)
    }

    pub fn expect_delete(&mut self, _id: T::Id) -> Reply<T, DeleteOutcome> {
        Reply::new(self.expectations.clone(), Expectation::Delete)
    }

    /// Panics if queued expectations were never consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by the `expect_*` methods of [`MockClient`].
pub struct Reply<T: HerdEntity, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, LedgerError>) -> Expectation<T>,
}

impl<T: HerdEntity, R> Reply<T, R> {
    fn new(expectations: Queue<T>, wrap: fn(Result<R, LedgerError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: LedgerError) {
        lock(&self.expectations).push_back((self.wrap)(Err(error)));
    }
}

/// Creates a client whose mailbox is read directly by the test.
pub fn create_mock_client<T: HerdEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<HerdRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

async fn next_request<T: HerdEntity>(
    receiver: &mut mpsc::Receiver<HerdRequest>,
) -> Option<ResourceRequest<T>> {
    T::unroute(receiver.recv().await?).ok()
}

/// Next message, if it is a Create for `T`.
pub async fn expect_create<T: HerdEntity>(
    receiver: &mut mpsc::Receiver<HerdRequest>,
) -> Option<(T::Create, Response<T>)> {
    match next_request::<T>(receiver).await? {
        ResourceRequest::Create { params, respond_to } => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get for `T`.
pub async fn expect_get<T: HerdEntity>(
    receiver: &mut mpsc::Receiver<HerdRequest>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match next_request::<T>(receiver).await? {
        ResourceRequest::Get { id, respond_to } => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Delete for `T`.
pub async fn expect_delete<T: HerdEntity>(
    receiver: &mut mpsc::Receiver<HerdRequest>,
) -> Option<(T::Id, T::Deletion, Response<DeleteOutcome>)> {
    match next_request::<T>(receiver).await? {
        ResourceRequest::Delete {
            id,
            deletion,
            respond_to,
        } => Some((id, deletion, respond_to)),
        _ => None,
    }
}
