//! Durable mirror of the record collection.
//!
//! A store always reads and writes the full collection. [`JsonFileStore`] is
//! the production implementation; [`MemoryStore`] keeps the data in memory and
//! can be told to fail, which is what the tracker tests use.

use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{EngineError, Record, ResultEngine};

pub trait Store {
    /// Read the saved collection. A store that has never been written returns
    /// an empty collection.
    fn load(&self) -> ResultEngine<Vec<Record>>;

    /// Replace the saved collection with `records`.
    fn save(&mut self, records: &[Record]) -> ResultEngine<()>;

    /// Where the data lives, if it lives on disk.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Load `store`, degrading to an empty collection when the data is unreadable.
pub fn load_or_empty<S: Store + ?Sized>(store: &S) -> Vec<Record> {
    match store.load() {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!("failed to load saved records, starting empty: {err}");
            Vec::new()
        }
    }
}

/// Stores the collection as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> ResultEngine<Vec<Record>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("no data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(EngineError::Persistence(format!(
                    "cannot read {}: {err}",
                    self.path.display()
                )));
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|err| {
            EngineError::Persistence(format!("corrupt data in {}: {err}", self.path.display()))
        })
    }

    fn save(&mut self, records: &[Record]) -> ResultEngine<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(records)?;
        let tmp = self.temp_path();
        if let Err(err) = replace_file(&tmp, &self.path, payload.as_bytes()) {
            if let Err(cleanup) = fs::remove_file(&tmp)
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!("cannot remove {}: {cleanup}", tmp.display());
            }
            return Err(err.into());
        }
        tracing::debug!(
            "saved {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Write `data` to `tmp`, flush it to disk, then move it over `target`. The
/// target keeps its previous contents unless the rename succeeds.
fn replace_file(tmp: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(tmp, target)
}

/// Keeps the "saved" collection in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<Record>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Make every following `save` fail, leaving the stored data untouched.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load(&self) -> ResultEngine<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[Record]) -> ResultEngine<()> {
        if self.fail_saves {
            return Err(EngineError::Persistence("memory store is read-only".to_string()));
        }
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quantities, Quantity, RecordId};

    use uuid::Uuid;

    /// Fresh directory under `target/test_data` for one test.
    fn test_dir() -> PathBuf {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_data")
            .join(format!("store_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn temp_file(name: &str) -> PathBuf {
        test_dir().join(name)
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new(
                RecordId::new(1),
                "01/01/2024",
                Quantities::new(
                    Quantity::new(0.1).unwrap(),
                    Quantity::new(2.0).unwrap(),
                    Quantity::ZERO,
                ),
            ),
            Record::new(
                RecordId::new(2),
                "02/01/2024",
                Quantities::new(
                    Quantity::new(1.0 / 3.0).unwrap(),
                    Quantity::ZERO,
                    Quantity::new(4.5).unwrap(),
                ),
            ),
        ]
    }

    #[test]
    fn missing_file_loads_empty() {
        let store = JsonFileStore::new(temp_file("missing.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_keeps_precision() {
        let path = temp_file("roundtrip.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), sample());
        assert!(!store.temp_path().exists());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error_and_degrades_to_empty() {
        let path = temp_file("corrupt.json");
        fs::write(&path, "[{\"id\": 1,").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(EngineError::Persistence(_))));
        assert!(load_or_empty(&store).is_empty());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn blank_file_loads_empty() {
        let path = temp_file("blank.json");
        fs::write(&path, "  \n").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_empty());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn save_creates_parent_directories() {
        let path = temp_file("nested").join("deeper").join("data.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();
        assert!(path.exists());
        fs::remove_dir_all(path.parent().unwrap().parent().unwrap().parent().unwrap()).unwrap();
    }

    #[test]
    fn failed_save_keeps_previous_contents() {
        let path = temp_file("habits.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()[..1]).unwrap();

        // A directory where the temp file goes makes the next save fail.
        fs::create_dir(store.temp_path()).unwrap();
        assert!(store.save(&sample()).is_err());

        assert_eq!(store.load().unwrap(), sample()[..1].to_vec());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let path = temp_file("habits.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.save(&sample()).is_err());

        assert!(!store.temp_path().exists());
        assert!(path.join("keep").exists());
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn memory_store_can_fail() {
        let mut store = MemoryStore::new();
        store.save(&sample()).unwrap();
        store.fail_saves(true);
        assert!(store.save(&[]).is_err());
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.saves(), 1);
    }
}
