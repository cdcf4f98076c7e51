use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FarmopsError;
use crate::models::{StaffMember, Task};

pub const TASKS_FILE: &str = "tasks.json";
pub const RECURRING_FILE: &str = "recurring_tasks.json";
pub const STAFF_FILE: &str = "staff.json";
pub const INVENTORY_FILE: &str = "inventory.json";
pub const SYSTEMS_FILE: &str = "growing_systems.json";
pub const COUNTERS_FILE: &str = "counters.json";
pub const CONFIG_FILE: &str = "config.json";

const COLLECTION_FILES: [&str; 5] = [
    TASKS_FILE,
    RECURRING_FILE,
    STAFF_FILE,
    INVENTORY_FILE,
    SYSTEMS_FILE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Task,
    RecurringTask,
    Staff,
    Inventory,
    GrowingSystem,
}

/// Last id handed out per collection. Ids are never reused, even after the
/// record holding the highest one is deleted.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counters {
    pub task: u64,
    pub recurring_task: u64,
    pub staff: u64,
    pub inventory: u64,
    pub growing_system: u64,
}

impl Counters {
    fn slot(&mut self, collection: Collection) -> &mut u64 {
        match collection {
            Collection::Task => &mut self.task,
            Collection::RecurringTask => &mut self.recurring_task,
            Collection::Staff => &mut self.staff,
            Collection::Inventory => &mut self.inventory,
            Collection::GrowingSystem => &mut self.growing_system,
        }
    }
}

/// Read-only view of the records the scheduling rules work on.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub staff: Vec<StaffMember>,
}

/// A directory of JSON documents, one array per collection.
///
/// Each save replaces a whole file through a temp file and rename, so
/// readers never see half a document. Two writers racing on the same file
/// still lose one of the updates: the last save wins.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Opens an initialised data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, FarmopsError> {
        let dir = dir.into();
        if !dir.join(COUNTERS_FILE).exists() {
            return Err(FarmopsError::not_initialized(&dir.to_string_lossy()));
        }
        Ok(Self { dir })
    }

    /// Creates the directory and any missing documents. Existing data is
    /// left alone, so running it twice is harmless.
    pub fn init(dir: impl Into<PathBuf>) -> Result<Self, FarmopsError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let store = Self { dir };
        for file in COLLECTION_FILES {
            if !store.path(file).exists() {
                store.save::<Value>(file, &[])?;
            }
        }
        if !store.path(COUNTERS_FILE).exists() {
            store.write_document(COUNTERS_FILE, &Counters::default())?;
        }
        tracing::info!(dir = %store.dir.display(), "initialised data directory");
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Loads a collection. A missing file reads as empty. Entries that do not
    /// read as `T` are left out here and kept in the file by [`Store::save`].
    pub fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, FarmopsError> {
        let Some(document) = self.read_document(file)? else {
            return Ok(Vec::new());
        };
        let Value::Array(entries) = document else {
            return Err(FarmopsError::storage(format!(
                "{file} must contain a JSON array"
            )));
        };

        let mut out = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value(entry) {
                Ok(item) => out.push(item),
                Err(e) => tracing::warn!(file, index, error = %e, "skipping unreadable record"),
            }
        }
        tracing::debug!(file, count = out.len(), "loaded collection");
        Ok(out)
    }

    /// Replaces a collection with `items`. Entries already in the file that
    /// do not read as `T` are written back after them unchanged.
    pub fn save<T: Serialize + DeserializeOwned>(&self, file: &str, items: &[T]) -> Result<(), FarmopsError> {
        let kept = self.unreadable_entries::<T>(file)?;
        let mut document = Vec::with_capacity(items.len() + kept.len());
        for item in items {
            document.push(serde_json::to_value(item)?);
        }
        if !kept.is_empty() {
            tracing::warn!(file, count = kept.len(), "keeping unreadable records");
        }
        document.extend(kept);
        self.write_document(file, &document)?;
        tracing::debug!(file, count = items.len(), "saved collection");
        Ok(())
    }

    fn unreadable_entries<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<Value>, FarmopsError> {
        match self.read_document(file)? {
            None => Ok(Vec::new()),
            Some(Value::Array(entries)) => Ok(entries
                .into_iter()
                .filter(|entry| T::deserialize(entry).is_err())
                .collect()),
            Some(_) => Err(FarmopsError::storage(format!(
                "{file} must contain a JSON array"
            ))),
        }
    }

    pub fn snapshot(&self) -> Result<Snapshot, FarmopsError> {
        Ok(Snapshot {
            tasks: self.load(TASKS_FILE)?,
            staff: self.load(STAFF_FILE)?,
        })
    }

    /// Hands out the next id for a collection: one past both the stored
    /// counter and the highest id already present.
    pub fn next_id(&self, collection: Collection, existing_max: u64) -> Result<u64, FarmopsError> {
        self.reserve_ids(collection, existing_max, 1)
    }

    /// Reserves `count` consecutive ids with a single counter write and
    /// returns the first. `count` must be at least one.
    pub fn reserve_ids(&self, collection: Collection, existing_max: u64, count: u64) -> Result<u64, FarmopsError> {
        let mut counters: Counters = self
            .read_document(COUNTERS_FILE)?
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        let slot = counters.slot(collection);
        let first = (*slot).max(existing_max) + 1;
        *slot = first + count.max(1) - 1;
        self.write_document(COUNTERS_FILE, &counters)?;
        Ok(first)
    }

    pub fn read_document(&self, file: &str) -> Result<Option<Value>, FarmopsError> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| FarmopsError::storage(format!("{}: {e}", path.display())))
    }

    pub fn write_document<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), FarmopsError> {
        let path = self.path(file);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = Store::open(dir.path().join("farm")).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotInitialized);
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        fs::write(store.path(TASKS_FILE), r#"[{"id": 1, "title": "keep me"}]"#).unwrap();
        let store = Store::init(dir.path()).unwrap();
        let tasks: Vec<Task> = store.load(TASKS_FILE).unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(Store::open(dir.path()).is_ok());
    }

    #[test]
    fn test_load_skips_non_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        fs::write(
            store.path(TASKS_FILE),
            json!([{"id": 1, "title": "a"}, "junk", 7, {"id": 2}]).to_string(),
        )
        .unwrap();
        let tasks: Vec<Task> = store.load(TASKS_FILE).unwrap();
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_save_keeps_unreadable_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        fs::write(
            store.path(TASKS_FILE),
            json!([{"id": 1, "title": "a"}, "note", {"id": 2, "title": "b"}]).to_string(),
        )
        .unwrap();

        let mut tasks: Vec<Task> = store.load(TASKS_FILE).unwrap();
        tasks.retain(|t| t.id != 2);
        tasks.push(Task::new(3, "c"));
        store.save(TASKS_FILE, &tasks).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path(TASKS_FILE)).unwrap()).unwrap();
        let entries = raw.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["id"], 1);
        assert_eq!(entries[1]["id"], 3);
        assert_eq!(entries[2], "note");
    }

    #[test]
    fn test_save_keeps_unknown_status_and_priority() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        fs::write(
            store.path(TASKS_FILE),
            json!([{"id": 1, "title": "old", "status": "archived", "priority": "urgent", "dueDate": "2025-08-01"}])
                .to_string(),
        )
        .unwrap();

        let mut tasks: Vec<Task> = store.load(TASKS_FILE).unwrap();
        tasks.push(Task::new(2, "new"));
        store.save(TASKS_FILE, &tasks).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path(TASKS_FILE)).unwrap()).unwrap();
        assert_eq!(raw[0]["status"], "archived");
        assert_eq!(raw[0]["priority"], "urgent");
        assert_eq!(raw[1]["status"], "pending");
    }

    #[test]
    fn test_save_keeps_unmodelled_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        fs::write(
            store.path(STAFF_FILE),
            json!([{"id": 1, "email": "a@farm.test", "fullName": "Ana", "phone": "555"}]).to_string(),
        )
        .unwrap();
        let staff: Vec<StaffMember> = store.load(STAFF_FILE).unwrap();
        store.save(STAFF_FILE, &staff).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path(STAFF_FILE)).unwrap()).unwrap();
        assert_eq!(raw[0]["phone"], "555");
        assert_eq!(raw[0]["fullName"], "Ana");
    }

    #[test]
    fn test_non_array_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        fs::write(store.path(STAFF_FILE), r#"{"staff": []}"#).unwrap();
        assert!(store.load::<StaffMember>(STAFF_FILE).is_err());
    }

    #[test]
    fn test_next_id_is_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        assert_eq!(store.next_id(Collection::Task, 0).unwrap(), 1);
        assert_eq!(store.next_id(Collection::Task, 0).unwrap(), 2);
        assert_eq!(store.next_id(Collection::Task, 10).unwrap(), 11);
        assert_eq!(store.next_id(Collection::Task, 0).unwrap(), 12);
        assert_eq!(store.next_id(Collection::Staff, 0).unwrap(), 1);
    }

    #[test]
    fn test_reserve_ids_takes_a_block() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        assert_eq!(store.reserve_ids(Collection::Task, 0, 5).unwrap(), 1);
        assert_eq!(store.next_id(Collection::Task, 0).unwrap(), 6);
        assert_eq!(store.reserve_ids(Collection::Task, 2, 3).unwrap(), 7);
        assert_eq!(store.next_id(Collection::Task, 0).unwrap(), 10);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::init(dir.path()).unwrap();
        store.save(TASKS_FILE, &[Task::new(1, "x")]).unwrap();
        assert!(!store.path("tasks.json.tmp").exists());
        let raw = fs::read_to_string(store.path(TASKS_FILE)).unwrap();
        assert!(raw.contains("\"status\": \"pending\""));
    }
}
