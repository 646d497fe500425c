use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use engine::{
    Action, DateFormat, DisplayOrder, EngineError, ExportFormat, FixedClock, JsonFileStore,
    MemoryStore, Quantities, Quantity, Record, RecordId, Store, SyncStatus, Tracker, export,
};

fn test_path() -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_data");
    std::fs::create_dir_all(&root).unwrap();
    root.join(format!("habits_{}.json", Uuid::new_v4()))
}

fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap())
}

fn file_tracker(path: &PathBuf) -> Tracker<JsonFileStore> {
    Tracker::builder(JsonFileStore::new(path))
        .clock(fixed_clock())
        .build()
}

fn record(id: i64, coffee: f64) -> Record {
    Record::new(
        RecordId::new(id),
        "01/01/2024",
        Quantities::new(Quantity::new(coffee).unwrap(), Quantity::ZERO, Quantity::ZERO),
    )
}

#[test]
fn fresh_install_starts_empty() {
    let path = test_path();
    let tracker = file_tracker(&path);
    assert!(tracker.is_empty());
    assert!(!path.exists());
}

#[test]
fn every_mutation_is_mirrored_to_disk() {
    let path = test_path();
    let mut tracker = file_tracker(&path);

    let created = tracker.submit_entry("3,5", "1", "0").unwrap();
    assert_eq!(created.sync, SyncStatus::Saved);
    let other = tracker.submit_entry("1", "2", "3").unwrap();

    tracker.begin_edit(created.id).unwrap();
    let updated = tracker.submit_entry("4", "4", "4").unwrap();
    assert_eq!(updated.action, Action::Updated);

    tracker.delete_entry(other.id);

    let reopened = file_tracker(&path);
    assert_eq!(reopened.records(), tracker.records());
    assert_eq!(reopened.len(), 1);
    let record = reopened.get(created.id).unwrap();
    assert_eq!(record.coffee().value(), 4.0);
    assert_eq!(record.date(), "01/06/2024");

    std::fs::remove_file(path).unwrap();
}

#[test]
fn corrupt_file_degrades_to_empty_and_is_overwritten() {
    let path = test_path();
    std::fs::write(&path, "not json").unwrap();

    let mut tracker = file_tracker(&path);
    assert!(tracker.is_empty());
    tracker.submit_entry("1", "1", "1").unwrap();

    let reloaded = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(reloaded.len(), 1);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn save_then_load_round_trips() {
    let path = test_path();
    let records = vec![record(3, 0.1 + 0.2), record(1, 5.0), record(2, 1e-9)];
    let mut store = JsonFileStore::new(&path);
    store.save(&records).unwrap();
    assert_eq!(store.load().unwrap(), records);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn display_orderings() {
    let store = MemoryStore::with_records(vec![record(1, 5.0), record(2, 9.0), record(3, 1.0)]);
    let mut tracker = Tracker::builder(store).build();

    let ids = |t: &Tracker<MemoryStore>| -> Vec<i64> {
        t.ordered().iter().map(|r| r.id().get()).collect()
    };
    assert_eq!(tracker.order(), DisplayOrder::MostRecent);
    assert_eq!(ids(&tracker), vec![3, 2, 1]);

    tracker.set_order(DisplayOrder::HighestCoffee);
    assert_eq!(ids(&tracker), vec![2, 1, 3]);

    let stored: Vec<i64> = tracker.records().iter().map(|r| r.id().get()).collect();
    assert_eq!(stored, vec![1, 2, 3]);
}

#[test]
fn dates_follow_the_configured_format() {
    let mut tracker = Tracker::builder(MemoryStore::new())
        .clock(fixed_clock())
        .date_format(DateFormat::new("UTC", "%Y-%m-%d").unwrap())
        .build();
    let id = tracker.submit_entry("0", "0", "0").unwrap().id;
    assert_eq!(tracker.get(id).unwrap().date(), "2024-06-01");
    assert_eq!(id.get(), fixed_clock().0.timestamp_millis());
}

#[test]
fn empty_tracker_has_nothing_to_export() {
    let path = test_path();
    let tracker = Tracker::builder(MemoryStore::new()).build();
    let err = export::export_to_path(tracker.records(), ExportFormat::Json, &path).unwrap_err();
    assert_eq!(err, EngineError::NothingToExport);
    assert!(!path.exists());
}

#[test]
fn export_writes_current_records() {
    let path = test_path();
    let mut tracker = Tracker::builder(MemoryStore::new()).build();
    tracker.submit_entry("1", "2", "3").unwrap();
    let written = export::export_to_path(tracker.records(), ExportFormat::Json, &path).unwrap();
    let back: Vec<Record> = serde_json::from_slice(&std::fs::read(&written).unwrap()).unwrap();
    assert_eq!(back, tracker.records());
    std::fs::remove_file(written).unwrap();
}

fn non_negative() -> impl Strategy<Value = f64> {
    (0u32..100_000, 0u32..100).prop_map(|(whole, cents)| whole as f64 + cents as f64 / 100.0)
}

fn as_input(value: f64, comma: bool) -> String {
    let text = value.to_string();
    if comma { text.replace('.', ",") } else { text }
}

proptest! {
    #[test]
    fn valid_submission_appends_one(
        coffee in non_negative(),
        books in non_negative(),
        trips in non_negative(),
        comma in any::<bool>(),
    ) {
        let mut tracker = Tracker::builder(MemoryStore::new()).build();
        tracker.submit_entry("1", "1", "1").unwrap();
        let before = tracker.len();

        let ack = tracker
            .submit_entry(&as_input(coffee, comma), &as_input(books, comma), &as_input(trips, comma))
            .unwrap();

        prop_assert_eq!(ack.action, Action::Created);
        prop_assert_eq!(tracker.len(), before + 1);
        let record = tracker.get(ack.id).unwrap();
        prop_assert_eq!(record.coffee().value(), coffee);
        prop_assert_eq!(record.books().value(), books);
        prop_assert_eq!(record.trips().value(), trips);
    }

    #[test]
    fn negative_submission_is_rejected(
        values in prop::array::uniform3(non_negative()),
        negative_at in 0usize..3,
        editing in any::<bool>(),
    ) {
        let mut tracker = Tracker::builder(MemoryStore::new()).build();
        let id = tracker.submit_entry("1", "1", "1").unwrap().id;
        if editing {
            tracker.begin_edit(id).unwrap();
        }
        let snapshot = tracker.records().to_vec();

        let mut inputs: Vec<String> = values.iter().map(|v| as_input(*v, false)).collect();
        inputs[negative_at] = format!("-{}", as_input(values[negative_at] + 0.01, false));

        let err = tracker.submit_entry(&inputs[0], &inputs[1], &inputs[2]).unwrap_err();
        prop_assert!(matches!(err, EngineError::Validation(_)));
        prop_assert_eq!(tracker.records(), snapshot.as_slice());
        prop_assert_eq!(tracker.editing().is_some(), editing);
    }

    #[test]
    fn delete_removes_exactly_the_match(count in 1usize..8, pick in 0usize..8) {
        let store = MemoryStore::with_records(
            (0..count).map(|i| record(i as i64 + 1, i as f64)).collect(),
        );
        let mut tracker = Tracker::builder(store).build();
        let target = RecordId::new(pick as i64 + 1);
        let present = tracker.get(target).is_some();

        tracker.delete_entry(target);

        prop_assert!(tracker.get(target).is_none());
        let expected = if present { count - 1 } else { count };
        prop_assert_eq!(tracker.len(), expected);
    }
}
