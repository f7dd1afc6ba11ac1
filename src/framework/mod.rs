//! Actor plumbing for the herd store.
//!
//! # Main Components
//!
//! - [`HerdEntity`] - Trait each record type implements to be managed by the actor
//! - [`Table`] - Per-record collection with unique code/name indexes
//! - [`HerdActor`] - The task that owns every table and processes requests sequentially
//! - [`ResourceClient`] - Typed, cloneable handle that sends requests to the actor
//!
//! # Testing
//!
//! See [`mock`] for answering requests from a test without spawning the actor.

pub mod actor;
pub mod client;
pub mod entity;
pub mod message;
pub mod mock;
pub mod table;

pub use actor::HerdActor;
pub use client::ResourceClient;
pub use entity::{entity_type, HerdEntity, Staged};
pub use message::{HerdRequest, ResourceRequest, Response};
pub(crate) use message::herd_routing;
pub use table::{normalize_name, Table};
