//! In-memory record store: one [`Table`] per record type.
//!
//! References between records are ids resolved through these tables; no
//! record embeds another.

use crate::framework::Table;
use crate::model::{
    Administration, AnimalId, Animal, Bull, BullId, Enclosure, EnclosureId, Insemination,
    InventoryItem, InventoryItemId,
};

#[derive(Default)]
pub struct HerdStore {
    pub enclosures: Table<Enclosure>,
    pub animals: Table<Animal>,
    pub bulls: Table<Bull>,
    pub inventory: Table<InventoryItem>,
    pub administrations: Table<Administration>,
    pub inseminations: Table<Insemination>,
}

impl HerdStore {
    pub fn animals_in(&self, enclosure: EnclosureId) -> impl Iterator<Item = &Animal> + '_ {
        self.animals
            .iter()
            .filter(move |animal| animal.enclosure == Some(enclosure))
    }

    pub fn offspring_of_dam(&self, dam: AnimalId) -> impl Iterator<Item = &Animal> + '_ {
        self.animals
            .iter()
            .filter(move |animal| animal.dam == Some(dam))
    }

    pub fn offspring_of_sire(&self, sire: BullId) -> impl Iterator<Item = &Animal> + '_ {
        self.animals
            .iter()
            .filter(move |animal| animal.sire == Some(sire))
    }

    pub fn administrations_of_item(
        &self,
        item: InventoryItemId,
    ) -> impl Iterator<Item = &Administration> + '_ {
        self.administrations
            .iter()
            .filter(move |administration| administration.inventory_item == item)
    }

    pub fn administrations_of_animal(
        &self,
        animal: AnimalId,
    ) -> impl Iterator<Item = &Administration> + '_ {
        self.administrations
            .iter()
            .filter(move |administration| administration.animal == Some(animal))
    }

    pub fn inseminations_of_animal(
        &self,
        animal: AnimalId,
    ) -> impl Iterator<Item = &Insemination> + '_ {
        self.inseminations
            .iter()
            .filter(move |insemination| insemination.animal == Some(animal))
    }

    pub fn inseminations_by_bull(&self, bull: BullId) -> impl Iterator<Item = &Insemination> + '_ {
        self.inseminations
            .iter()
            .filter(move |insemination| insemination.bull == Some(bull))
    }
}
