//! # Herd Ledger
//!
//! > **Resource ledger and lifecycle state machine for a dairy herd.**
//!
//! The crate keeps the records a farm office works with (enclosures, animals,
//! bulls, a treatment and vaccine inventory, administrations and
//! inseminations) and enforces the rules that tie them together: every dose
//! or straw used is taken from stock, every code is unique and sequential,
//! and deleting a record either removes it as an erroneous entry or retires
//! it with a biological or operational outcome.
//!
//! ## 🏗️ Architecture
//!
//! One Tokio task, the [`HerdActor`](framework::HerdActor), owns every table.
//! Clients send it requests over a bounded mailbox and wait on a oneshot
//! reply. Requests are handled strictly one at a time, so a code scan and
//! the insert that follows it, or a stock check and the decrement that
//! follows it, can never interleave with another request.
//!
//! Each request goes through the same two phases:
//!
//! 1. **Stage**: [`validation`] collects every field violation, [`codes`]
//!    assigns or checks the record code, and [`ledger`] or [`lifecycle`]
//!    plans the stock movements or the disposal. Read-only, may fail.
//! 2. **Commit**: the record is written and the plan applied. Cannot fail.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - Records, DTOs and ids.
//! - [`records`] - The per-record rules, as [`HerdEntity`](framework::HerdEntity) impls.
//! - [`framework`] - Actor, mailbox messages, tables and the mock mailbox.
//! - [`clients`] - Typed clients, gathered in [`HerdClient`](clients::HerdClient).
//! - [`runtime`] - [`HerdConfig`](runtime::HerdConfig), tracing setup and [`HerdSystem`](runtime::HerdSystem).
//! - [`accounts`] - Employee accounts with explicit post-creation hooks.
//! - [`error`] - [`LedgerError`](error::LedgerError) and its serializable report.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with debug logs for this crate
//! RUST_LOG=herd_ledger=debug cargo run
//!
//! # Override the mailbox size
//! HERD__MAILBOX_CAPACITY=64 cargo run
//! ```

pub mod accounts;
pub mod clients;
pub mod codes;
pub mod error;
pub mod framework;
pub mod ledger;
pub mod lifecycle;
pub mod model;
pub mod records;
pub mod runtime;
pub mod store;
pub mod validation;
