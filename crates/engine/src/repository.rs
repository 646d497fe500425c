//! In-memory collection of records held for the lifetime of the process.
//!
//! The repository only owns and mutates the collection. Persisting it is the
//! job of [`Tracker`](crate::Tracker), which calls the store after every
//! mutation.

use std::collections::HashSet;

use crate::{Quantities, Record, RecordId};

#[derive(Debug, Default, Clone)]
pub struct Repository {
    records: Vec<Record>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. Duplicate ids are kept but logged; every
    /// mutation by id applies to all of them.
    pub fn initialize(&mut self, records: Vec<Record>) {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                tracing::warn!("duplicate record id {} in loaded data", record.id());
            }
        }
        self.records = records;
    }

    /// Records in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_id(&self) -> Option<RecordId> {
        self.records.iter().map(Record::id).max()
    }

    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Overwrite the quantities of the records with `id`. Returns `false` when
    /// no record matches.
    pub fn replace(&mut self, id: RecordId, quantities: Quantities) -> bool {
        let mut found = false;
        for record in self.records.iter_mut().filter(|record| record.id() == id) {
            record.set_quantities(quantities);
            found = true;
        }
        found
    }

    /// Remove every record with `id` and return how many were removed.
    pub fn remove_by_id(&mut self, id: RecordId) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        before - self.records.len()
    }
}
