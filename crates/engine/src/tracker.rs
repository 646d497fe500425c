//! Lifecycle of the records: validated create, update and delete, each
//! followed by a full save to the store.
//!
//! The tracker owns the [`Repository`] and the [`Store`]. Every mutation
//! applies to memory first and then writes the whole collection. A failed
//! write does not undo the mutation; it is reported in the returned
//! [`Acknowledgement`] and logged.

use std::path::Path;

use crate::{
    Clock, DateFormat, DisplayOrder, EngineError, Quantities, Quantity, Record, RecordId,
    Repository, ResultEngine, Store, SystemClock, store::load_or_empty,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Deleted,
}

/// Result of writing the collection after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Saved,
    Failed(String),
}

/// What a successful mutation reports back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub action: Action,
    pub id: RecordId,
    pub sync: SyncStatus,
}

impl Acknowledgement {
    pub fn message(&self) -> &'static str {
        match self.action {
            Action::Created => "Entry saved!",
            Action::Updated => "Entry updated!",
            Action::Deleted => "Entry deleted.",
        }
    }

    pub fn is_saved(&self) -> bool {
        self.sync == SyncStatus::Saved
    }
}

pub struct Tracker<S: Store> {
    store: S,
    repository: Repository,
    editing: Option<RecordId>,
    order: DisplayOrder,
    clock: Box<dyn Clock>,
    date_format: DateFormat,
}

impl<S: Store> Tracker<S> {
    /// Return a builder for `Tracker`.
    pub fn builder(store: S) -> TrackerBuilder<S> {
        TrackerBuilder {
            store,
            clock: Box::new(SystemClock),
            date_format: DateFormat::default(),
            order: DisplayOrder::default(),
        }
    }

    /// Records in stored (insertion) order.
    pub fn records(&self) -> &[Record] {
        self.repository.all()
    }

    /// Records in the current display order.
    pub fn ordered(&self) -> Vec<&Record> {
        self.order.apply(self.repository.all())
    }

    pub fn order(&self) -> DisplayOrder {
        self.order
    }

    pub fn set_order(&mut self, order: DisplayOrder) {
        self.order = order;
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.repository.get(id)
    }

    pub fn len(&self) -> usize {
        self.repository.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn store_location(&self) -> Option<&Path> {
        self.store.location()
    }

    /// The record currently selected for editing, if any.
    pub fn editing(&self) -> Option<&Record> {
        self.editing.and_then(|id| self.repository.get(id))
    }

    /// Select `id` for editing. Fails with [`EngineError::KeyNotFound`] when
    /// the record does not exist; the previous selection is kept in that case.
    pub fn begin_edit(&mut self, id: RecordId) -> ResultEngine<&Record> {
        let record = self
            .repository
            .get(id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
        self.editing = Some(id);
        Ok(record)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate the three raw inputs and either update the record being
    /// edited or append a new one.
    ///
    /// On a validation failure nothing changes, the edit selection included.
    pub fn submit_entry(
        &mut self,
        coffee: &str,
        books: &str,
        trips: &str,
    ) -> ResultEngine<Acknowledgement> {
        let quantities = parse_quantities(coffee, books, trips)?;

        let (action, id) = match self.editing {
            Some(id) if self.repository.replace(id, quantities) => {
                tracing::debug!("updated record {id}");
                (Action::Updated, id)
            }
            _ => {
                let now = self.clock.now();
                let id = self.next_id(now.timestamp_millis());
                let record = Record::new(id, self.date_format.format(now), quantities);
                self.repository.add(record);
                tracing::debug!("created record {id}");
                (Action::Created, id)
            }
        };
        self.editing = None;

        Ok(Acknowledgement {
            action,
            id,
            sync: self.sync(),
        })
    }

    /// Remove the record with `id`. A missing id is not an error.
    pub fn delete_entry(&mut self, id: RecordId) -> Acknowledgement {
        if self.repository.remove_by_id(id) > 0 {
            tracing::debug!("deleted record {id}");
        } else {
            tracing::debug!("delete of missing record {id} ignored");
        }
        if self.editing == Some(id) {
            self.editing = None;
        }

        Acknowledgement {
            action: Action::Deleted,
            id,
            sync: self.sync(),
        }
    }

    /// Write the whole collection to the store.
    pub fn sync(&mut self) -> SyncStatus {
        match self.store.save(self.repository.all()) {
            Ok(()) => SyncStatus::Saved,
            Err(err) => {
                tracing::warn!("failed to save records: {err}");
                SyncStatus::Failed(err.to_string())
            }
        }
    }

    fn next_id(&self, millis: i64) -> RecordId {
        let candidate = match self.repository.max_id() {
            Some(max) if max.get() >= millis => max.get().checked_add(1),
            _ => Some(millis),
        };
        match candidate {
            Some(id) => RecordId::new(id),
            // Nothing is left above the max: take the highest free id below it.
            None => (i64::MIN..i64::MAX)
                .rev()
                .map(RecordId::new)
                .find(|id| !self.repository.contains(*id))
                .unwrap_or(RecordId::new(i64::MIN)),
        }
    }
}

impl<S: Store + std::fmt::Debug> std::fmt::Debug for Tracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("store", &self.store)
            .field("records", &self.repository.len())
            .field("editing", &self.editing)
            .field("order", &self.order)
            .finish()
    }
}

fn parse_quantities(coffee: &str, books: &str, trips: &str) -> ResultEngine<Quantities> {
    let coffee: Quantity = coffee.parse()?;
    let books: Quantity = books.parse()?;
    let trips: Quantity = trips.parse()?;
    Ok(Quantities::new(coffee, books, trips))
}

pub struct TrackerBuilder<S: Store> {
    store: S,
    clock: Box<dyn Clock>,
    date_format: DateFormat,
    order: DisplayOrder,
}

impl<S: Store> TrackerBuilder<S> {
    /// Override the time source used for new ids and dates.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn order(mut self, order: DisplayOrder) -> Self {
        self.order = order;
        self
    }

    /// Construct `Tracker`, loading the saved collection. Unreadable data
    /// starts an empty collection.
    pub fn build(self) -> Tracker<S> {
        let mut repository = Repository::new();
        repository.initialize(load_or_empty(&self.store));
        tracing::debug!("loaded {} records", repository.len());

        Tracker {
            store: self.store,
            repository,
            editing: None,
            order: self.order,
            clock: self.clock,
            date_format: self.date_format,
        }
    }
}
