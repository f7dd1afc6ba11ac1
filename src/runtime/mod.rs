//! Runtime orchestration: configuration, logging and the actor lifecycle.
//!
//! # Main Components
//!
//! - [`HerdConfig`] - Settings from `config/herd.toml` and `HERD__*` variables
//! - [`HerdSystem`] - Spawns the herd actor and hands out a [`HerdClient`](crate::clients::HerdClient)
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod config;
pub mod system;
pub mod tracing;

pub use self::config::HerdConfig;
pub use self::system::{HerdSystem, RuntimeError};
pub use self::tracing::setup_tracing;
