use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    constants::{FILE_NAMES, LABELS, PLOTS_PER_FIELD},
    domain::{Category, Field, Planting, Plot, Record},
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

// `load` never fails: a missing or unreadable document yields a fresh record.
pub trait RecordStore {
    fn load(&self) -> Record;
    fn save(&self, record: &Record) -> Result<(), StoreError>;
    fn save_as(&self, record: &Record, name: &str) -> Result<PathBuf, StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDocument {
    #[serde(rename = "type")]
    pub kinds: Vec<u8>,
    pub time: Vec<u64>,
    #[serde(rename = "eventName")]
    pub event_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordDocument {
    #[serde(default = "default_owner")]
    pub name: String,
    pub trees: Vec<FieldDocument>,
}

fn default_owner() -> String {
    LABELS.default_owner.to_string()
}

impl From<&Field> for FieldDocument {
    fn from(field: &Field) -> Self {
        let mut doc = FieldDocument {
            kinds: Vec::with_capacity(PLOTS_PER_FIELD),
            time: Vec::with_capacity(PLOTS_PER_FIELD),
            event_names: Vec::with_capacity(PLOTS_PER_FIELD),
        };
        for plot in &field.plots {
            match plot {
                Plot::Empty => {
                    doc.kinds.push(0);
                    doc.time.push(0);
                    doc.event_names.push(String::new());
                }
                Plot::Planted(planting) => {
                    doc.kinds.push(planting.category.id());
                    doc.time.push(planting.elapsed_secs);
                    doc.event_names.push(planting.label.clone());
                }
            }
        }
        doc
    }
}

impl From<&Record> for RecordDocument {
    fn from(record: &Record) -> Self {
        RecordDocument {
            name: record.owner_name.clone(),
            trees: record.fields.iter().map(FieldDocument::from).collect(),
        }
    }
}

impl TryFrom<FieldDocument> for Field {
    type Error = String;

    fn try_from(doc: FieldDocument) -> Result<Self, Self::Error> {
        if doc.kinds.len() != PLOTS_PER_FIELD
            || doc.time.len() != PLOTS_PER_FIELD
            || doc.event_names.len() != PLOTS_PER_FIELD
        {
            return Err(format!(
                "field arrays must hold {} entries, found {}/{}/{}",
                PLOTS_PER_FIELD,
                doc.kinds.len(),
                doc.time.len(),
                doc.event_names.len()
            ));
        }

        let mut field = Field::new();
        let entries = doc.kinds.into_iter().zip(doc.time).zip(doc.event_names);
        for (slot, ((kind, elapsed_secs), label)) in entries.enumerate() {
            if kind == 0 {
                continue;
            }
            let category =
                Category::from_id(kind).ok_or_else(|| format!("unknown plant type {}", kind))?;
            field.plots[slot] = Plot::Planted(Planting {
                category,
                elapsed_secs,
                label,
            });
        }
        Ok(field)
    }
}

impl TryFrom<RecordDocument> for Record {
    type Error = String;

    fn try_from(doc: RecordDocument) -> Result<Self, Self::Error> {
        let mut fields = doc
            .trees
            .into_iter()
            .map(Field::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if fields.is_empty() {
            warn!("Record has no fields, starting a new one");
            fields.push(Field::new());
        }

        Ok(Record {
            owner_name: doc.name,
            fields,
        })
    }
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn open_default() -> Self {
        Self::new(get_data_dir().join(FILE_NAMES.record))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Record {
        let doc = match read_json::<RecordDocument>(&self.path) {
            Ok(doc) => doc,
            Err(LoadFailure::Missing) => {
                info!("No record at {}, starting fresh", self.path.display());
                return Record::new();
            }
            Err(LoadFailure::Unreadable(e)) => {
                warn!("Could not load record {}: {}", self.path.display(), e);
                return Record::new();
            }
        };

        match Record::try_from(doc) {
            Ok(record) => record,
            Err(e) => {
                warn!("Malformed record {}: {}", self.path.display(), e);
                Record::new()
            }
        }
    }

    fn save(&self, record: &Record) -> Result<(), StoreError> {
        write_json_atomic(&self.path, &RecordDocument::from(record))
    }

    fn save_as(&self, record: &Record, name: &str) -> Result<PathBuf, StoreError> {
        let json = serde_json::to_string_pretty(&RecordDocument::from(record))?;
        create_unique(self.dir(), name, &json)
    }
}

pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        FILE_NAMES.backup_prefix,
        now.format("%Y%m%d_%H%M%S"),
        FILE_NAMES.backup_extension
    )
}

pub fn numbered_name(name: &str, n: u32) -> String {
    if n == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{}_{}.{}", stem, n, extension),
        _ => format!("{}_{}", name, n),
    }
}

// Never replaces an existing file: a taken name gets the next free suffix.
fn create_unique(dir: &Path, name: &str, content: &str) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut n = 0;
    loop {
        let path = dir.join(numbered_name(name, n));
        n += 1;
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(io_err(e)),
        };
        file.write_all(content.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        return Ok(path);
    }
}

pub fn get_data_dir() -> PathBuf {
    if Path::new(".").join(FILE_NAMES.record).exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "thriving", "thriving") {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "thriving", "thriving") {
        if let Some(state_dir) = proj_dirs.state_dir() {
            let dir = state_dir.to_path_buf();
            fs::create_dir_all(&dir).ok();
            return dir;
        }
    }
    get_data_dir()
}

enum LoadFailure {
    Missing,
    Unreadable(String),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadFailure> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(LoadFailure::Missing),
        Err(e) => return Err(LoadFailure::Unreadable(e.to_string())),
    };
    serde_json::from_str(&content).map_err(|e| LoadFailure::Unreadable(e.to_string()))
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, &json)
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(io_err)?;
    tmp_file.write_all(content.as_bytes()).map_err(io_err)?;
    tmp_file.sync_all().map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) saved: RefCell<Option<RecordDocument>>,
        pub(crate) backups: RefCell<Vec<(String, RecordDocument)>>,
        pub(crate) save_count: RefCell<usize>,
        pub(crate) fail_saves: RefCell<bool>,
    }

    impl MemoryStore {
        pub(crate) fn with_record(record: &Record) -> Self {
            let store = Self::default();
            *store.saved.borrow_mut() = Some(RecordDocument::from(record));
            store
        }

        pub(crate) fn saved_record(&self) -> Option<Record> {
            self.saved
                .borrow()
                .clone()
                .and_then(|doc| Record::try_from(doc).ok())
        }

        pub(crate) fn saves(&self) -> usize {
            *self.save_count.borrow()
        }
    }

    impl RecordStore for MemoryStore {
        fn load(&self) -> Record {
            self.saved_record().unwrap_or_default()
        }

        fn save(&self, record: &Record) -> Result<(), StoreError> {
            if *self.fail_saves.borrow() {
                return Err(StoreError::Io {
                    path: PathBuf::from("memory"),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            *self.saved.borrow_mut() = Some(RecordDocument::from(record));
            *self.save_count.borrow_mut() += 1;
            Ok(())
        }

        fn save_as(&self, record: &Record, name: &str) -> Result<PathBuf, StoreError> {
            let mut backups = self.backups.borrow_mut();
            let name = (0..)
                .map(|n| numbered_name(name, n))
                .find(|candidate| backups.iter().all(|(taken, _)| taken != candidate))
                .unwrap_or_else(|| name.to_string());
            backups.push((name.clone(), RecordDocument::from(record)));
            Ok(PathBuf::from(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use chrono::TimeZone;

    use super::*;

    fn unique_path(prefix: &str, extension: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("{}_{}.{}", prefix, now, extension))
    }

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.owner_name = "Mei".to_string();
        record.fields[0]
            .plant(
                0,
                Planting {
                    category: Category::Work,
                    elapsed_secs: 1830,
                    label: "report".to_string(),
                },
            )
            .unwrap();
        record.fields[0]
            .plant(
                1,
                Planting {
                    category: Category::Commuting,
                    elapsed_secs: 12,
                    label: "通勤".to_string(),
                },
            )
            .unwrap();
        record.fields.push(Field::new());
        record
    }

    #[test]
    fn test_missing_file_loads_fresh_record() {
        let store = JsonFileStore::new(unique_path("thriving_missing", "json"));
        let record = store.load();

        assert_eq!(record, Record::new());
        assert_eq!(record.owner_name, "UserName");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_record_round_trip() {
        let path = unique_path("thriving_roundtrip", "json");
        let store = JsonFileStore::new(path.clone());
        let record = sample_record();

        store.save(&record).unwrap();
        assert_eq!(store.load(), record);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_json_recovers_and_leaves_file() {
        let path = unique_path("thriving_corrupt", "json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(path.clone());

        let record = store.load();
        assert_eq!(record.fields.len(), 1);
        assert!(record.fields[0].plots.iter().all(Plot::is_empty));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_wrong_shape_is_treated_as_malformed() {
        let path = unique_path("thriving_shape", "json");
        fs::write(
            &path,
            r#"{"name":"x","trees":[{"type":[1,0],"time":[5,0],"eventName":["a",""]}]}"#,
        )
        .unwrap();
        assert_eq!(JsonFileStore::new(path.clone()).load(), Record::new());

        fs::write(
            &path,
            r#"{"name":"x","trees":[{"type":[7,0,0,0,0,0,0,0,0],"time":[5,0,0,0,0,0,0,0,0],"eventName":["a","","","","","","","",""]}]}"#,
        )
        .unwrap();
        assert_eq!(JsonFileStore::new(path.clone()).load(), Record::new());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_empty_tree_list_gets_one_field() {
        let path = unique_path("thriving_no_trees", "json");
        fs::write(&path, r#"{"name":"Ana","trees":[]}"#).unwrap();

        let record = JsonFileStore::new(path.clone()).load();
        assert_eq!(record.owner_name, "Ana");
        assert_eq!(record.fields.len(), 1);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_document_field_names_are_stable() {
        let doc = RecordDocument::from(&sample_record());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["name"], "Mei");
        assert_eq!(value["trees"][0]["type"][0], 2);
        assert_eq!(value["trees"][0]["time"][0], 1830);
        assert_eq!(value["trees"][0]["eventName"][1], "通勤");
        assert_eq!(value["trees"][0]["type"][8], 0);
        assert_eq!(value["trees"][1]["eventName"][4], "");
    }

    #[test]
    fn test_save_as_writes_sibling_file() {
        let dir = unique_path("thriving_backup_dir", "d");
        let store = JsonFileStore::new(dir.join("data.json"));
        let record = sample_record();

        let written = store.save_as(&record, "data_20260101_120000.json").unwrap();
        assert_eq!(written, dir.join("data_20260101_120000.json"));
        assert!(!store.path().exists());

        let backup = JsonFileStore::new(written);
        assert_eq!(backup.load(), record);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_save_as_never_replaces_existing_backup() {
        let dir = unique_path("thriving_backup_clash", "d");
        let store = JsonFileStore::new(dir.join("data.json"));
        let name = "data_20260101_120000.json";

        let first = store.save_as(&sample_record(), name).unwrap();
        let second = store.save_as(&Record::new(), name).unwrap();
        let third = store.save_as(&Record::new(), name).unwrap();

        assert_eq!(first, dir.join(name));
        assert_eq!(second, dir.join("data_20260101_120000_1.json"));
        assert_eq!(third, dir.join("data_20260101_120000_2.json"));
        assert_eq!(JsonFileStore::new(first).load(), sample_record());
        assert_eq!(JsonFileStore::new(second).load(), Record::new());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("data_x.json", 0), "data_x.json");
        assert_eq!(numbered_name("data_x.json", 3), "data_x_3.json");
        assert_eq!(numbered_name("backup", 1), "backup_1");
    }

    #[test]
    fn test_backup_file_name_format() {
        let at = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(backup_file_name(at), "data_20250307_090502.json");
    }
}
