//! # Record Table
//!
//! One in-memory collection per record type, keyed by internal id, with
//! unique secondary indexes on `code` and (where the record has one) `name`.

use super::entity::HerdEntity;
use std::collections::{BTreeMap, HashMap};

/// Canonical form used by the name index: trimmed and lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub struct Table<T: HerdEntity> {
    rows: BTreeMap<T::Id, T>,
    codes: HashMap<String, T::Id>,
    names: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: HerdEntity> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            codes: HashMap::new(),
            names: HashMap::new(),
            next_id: 1,
        }
    }
}

impl<T: HerdEntity> Table<T> {
    /// The id the next inserted record will receive.
    ///
    /// Peeking does not reserve the id; it is consumed by [`Table::put`].
    pub fn peek_id(&self) -> T::Id {
        T::Id::from(self.next_id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.rows.contains_key(&id)
    }

    /// Mutable access for fields that are not indexed.
    ///
    /// Callers must not change `code` or `name` through this reference; use
    /// [`Table::put`] for that.
    pub(crate) fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// Records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.codes.keys().map(String::as_str)
    }

    pub fn code_owner(&self, code: &str) -> Option<T::Id> {
        self.codes.get(code).copied()
    }

    pub fn name_owner(&self, name: &str) -> Option<T::Id> {
        self.names.get(&normalize_name(name)).copied()
    }

    /// Inserts or replaces a record and refreshes its index entries.
    pub fn put(&mut self, record: T) -> Option<T> {
        let id = record.id();
        let previous = self.rows.remove(&id);
        if let Some(old) = &previous {
            self.unindex(old);
        }
        self.codes.insert(record.code().to_string(), id);
        if let Some(name) = record.name() {
            self.names.insert(normalize_name(name), id);
        }
        if id == self.peek_id() {
            self.next_id += 1;
        }
        self.rows.insert(id, record);
        previous
    }

    /// Allocates the next id and stores `build(id)` as is, skipping every
    /// rule. Loads founder stock whose parents were never on record.
    pub fn import(&mut self, build: impl FnOnce(T::Id) -> T) -> T::Id {
        let id = self.peek_id();
        self.put(build(id));
        id
    }

    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let removed = self.rows.remove(&id)?;
        self.unindex(&removed);
        Some(removed)
    }

    fn unindex(&mut self, record: &T) {
        let id = record.id();
        if self.codes.get(record.code()) == Some(&id) {
            self.codes.remove(record.code());
        }
        if let Some(name) = record.name() {
            let key = normalize_name(name);
            if self.names.get(&key) == Some(&id) {
                self.names.remove(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Enclosure, EnclosureId};

    fn enclosure(id: u32, code: &str, name: &str) -> Enclosure {
        Enclosure {
            id: EnclosureId(id),
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn put_assigns_sequential_ids_and_indexes() {
        let mut table = Table::<Enclosure>::default();
        assert_eq!(table.peek_id(), EnclosureId(1));

        table.put(enclosure(1, "ENC-1", "North Barn"));
        assert_eq!(table.peek_id(), EnclosureId(2));
        assert_eq!(table.code_owner("ENC-1"), Some(EnclosureId(1)));
        assert_eq!(table.name_owner("  north barn "), Some(EnclosureId(1)));
    }

    #[test]
    fn replacing_a_record_drops_stale_index_entries() {
        let mut table = Table::<Enclosure>::default();
        table.put(enclosure(1, "ENC-1", "North Barn"));
        table.put(enclosure(1, "ENC-5", "South Barn"));

        assert_eq!(table.len(), 1);
        assert_eq!(table.code_owner("ENC-1"), None);
        assert_eq!(table.name_owner("North Barn"), None);
        assert_eq!(table.code_owner("ENC-5"), Some(EnclosureId(1)));
        assert_eq!(table.peek_id(), EnclosureId(2));
    }

    #[test]
    fn remove_keeps_the_id_sequence() {
        let mut table = Table::<Enclosure>::default();
        table.put(enclosure(1, "ENC-1", "A"));
        table.put(enclosure(2, "ENC-2", "B"));
        assert!(table.remove(EnclosureId(2)).is_some());

        assert_eq!(table.peek_id(), EnclosureId(3));
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["ENC-1"]);
    }
}
