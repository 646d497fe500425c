//! Core of habitlog: the record model, the store the records are mirrored to,
//! and the [`Tracker`] that validates and applies every change.
//!
//! ```rust
//! use engine::{Action, MemoryStore, Tracker};
//!
//! let mut tracker = Tracker::builder(MemoryStore::new()).build();
//! let ack = tracker.submit_entry("2", "0,5", "0").unwrap();
//! assert_eq!(ack.action, Action::Created);
//! assert_eq!(tracker.store().records().len(), 1);
//! ```

pub use clock::{Clock, DateFormat, FixedClock, SystemClock};
pub use error::EngineError;
pub use export::ExportFormat;
pub use ordering::DisplayOrder;
pub use quantity::{Quantity, parse_decimal};
pub use record::{Category, Quantities, Record, RecordId};
pub use repository::Repository;
pub use stats::{CategoryStats, Summary};
pub use store::{JsonFileStore, MemoryStore, Store};
pub use tracker::{Acknowledgement, Action, SyncStatus, Tracker, TrackerBuilder};

pub mod clock;
pub mod export;
pub mod stats;
pub mod store;

mod error;
mod ordering;
mod quantity;
mod record;
mod repository;
mod tracker;

pub type ResultEngine<T> = Result<T, EngineError>;
