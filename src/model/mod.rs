//! Herd records and the DTOs used to create, update and delete them.
//!
//! These are plain data; the rules that govern them live in [`crate::records`].

pub mod administration;
pub mod animal;
pub mod bull;
pub mod enclosure;
pub mod ids;
pub mod insemination;
pub mod inventory;
pub mod status;

pub use administration::*;
pub use animal::*;
pub use bull::*;
pub use enclosure::*;
pub use ids::*;
pub use insemination::*;
pub use inventory::*;
pub use status::*;
