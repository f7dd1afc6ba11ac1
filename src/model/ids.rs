//! Typed record keys.
//!
//! Every table is keyed by its own newtype so that an `AnimalId` can never be
//! passed where a `BullId` is expected. Keys are assigned sequentially by the
//! owning [`Table`](crate::framework::Table) and converted from `u32`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($($name:ident => $label:literal),* $(,)?) => {
        $(
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub u32);

            impl From<u32> for $name {
                fn from(value: u32) -> Self {
                    Self(value)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($label, "_{}"), self.0)
                }
            }
        )*
    };
}

record_id! {
    EnclosureId => "enclosure",
    AnimalId => "animal",
    BullId => "bull",
    InventoryItemId => "inventory",
    AdministrationId => "administration",
    InseminationId => "insemination",
}
