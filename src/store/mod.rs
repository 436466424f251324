use fs_err as fs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::StoreError;
use crate::outfit::HistoryEntry;

pub type Wardrobes = BTreeMap<String, Vec<String>>;

/// A collection read from disk. `warning` is set when the file existed but
/// could not be used (`data` is then empty) or when some history entries
/// were skipped.
#[derive(Debug)]
pub struct Loaded<T> {
    pub data: T,
    pub warning: Option<String>,
}

/// Result of a successful whole-file rewrite.
#[derive(Debug)]
pub struct SaveReport {
    pub path: PathBuf,
    /// Set when the previous content was unreadable and got replaced.
    pub warning: Option<String>,
}

/// Flat JSON files for history and wardrobes.
///
/// Every save reads the whole file, changes it in memory and writes it back.
/// No locks are taken: two processes saving at once lose one update.
pub struct JsonStore {
    history_path: PathBuf,
    wardrobes_path: PathBuf,
    backup_corrupt: bool,
}

impl JsonStore {
    pub fn new(history_path: impl Into<PathBuf>, wardrobes_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            wardrobes_path: wardrobes_path.into(),
            backup_corrupt: false,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.history_path(), cfg.wardrobes_path()).with_backup(cfg.backup_corrupt)
    }

    /// Copy an unreadable file to `<file>.bak` before it gets overwritten.
    pub fn with_backup(mut self, on: bool) -> Self {
        self.backup_corrupt = on;
        self
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn wardrobes_path(&self) -> &Path {
        &self.wardrobes_path
    }

    /// Entries are decoded one by one. An entry that does not decode (an
    /// unknown label, a missing key) is skipped with a warning and the rest
    /// of the history still loads.
    pub fn load_history(&self) -> Loaded<Vec<HistoryEntry>> {
        let Loaded { data: raw, warning } = self.load_history_raw();
        let (data, skipped) = decode_entries(raw);
        let warning = match skipped {
            0 => warning,
            n => {
                warn!(path = %self.history_path.display(), skipped = n, "history entries skipped");
                Some(format!(
                    "{n} history {} in {} could not be read and {} skipped.",
                    if n == 1 { "entry" } else { "entries" },
                    self.history_path.display(),
                    if n == 1 { "was" } else { "were" },
                ))
            }
        };
        Loaded { data, warning }
    }

    /// Entries that no longer decode are written back untouched.
    pub fn append_history(&self, entry: HistoryEntry) -> Result<SaveReport, StoreError> {
        let Loaded { mut data, warning } = self.load_history_raw();
        self.backup_if_unreadable(&self.history_path, &warning);
        let value = serde_json::to_value(&entry).map_err(|e| StoreError::Write {
            path: self.history_path.clone(),
            reason: e.to_string(),
        })?;
        data.push(value);
        write_json(&self.history_path, &data)?;
        info!(path = %self.history_path.display(), entries = data.len(), "history appended");
        Ok(SaveReport { path: self.history_path.clone(), warning })
    }

    pub fn load_wardrobes(&self) -> Loaded<Wardrobes> {
        load_or_empty(&self.wardrobes_path, "wardrobe")
    }

    pub fn save_wardrobe(&self, name: &str, items: Vec<String>) -> Result<SaveReport, StoreError> {
        let Loaded { mut data, warning } = self.load_wardrobes();
        self.backup_if_unreadable(&self.wardrobes_path, &warning);
        data.insert(name.to_string(), items);
        write_json(&self.wardrobes_path, &data)?;
        info!(path = %self.wardrobes_path.display(), %name, "wardrobe saved");
        Ok(SaveReport { path: self.wardrobes_path.clone(), warning })
    }

    fn load_history_raw(&self) -> Loaded<Vec<Value>> {
        load_or_empty(&self.history_path, "history")
    }

    fn backup_if_unreadable(&self, path: &Path, warning: &Option<String>) {
        if !self.backup_corrupt || warning.is_none() || !path.exists() {
            return;
        }
        let bak = backup_path(path);
        match fs::copy(path, &bak) {
            Ok(_) => info!(from = %path.display(), to = %bak.display(), "kept unreadable file"),
            Err(e) => warn!(error = %e, "could not back up unreadable file"),
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

fn decode_entries(raw: Vec<Value>) -> (Vec<HistoryEntry>, usize) {
    let total = raw.len();
    let data: Vec<HistoryEntry> = raw
        .into_iter()
        .filter_map(|v| match serde_json::from_value(v) {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, "skipping history entry");
                None
            }
        })
        .collect();
    let skipped = total - data.len();
    (data, skipped)
}

/// `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let read_err = |reason: String| StoreError::Read { path: path.to_path_buf(), reason };
    let raw = fs::read_to_string(path).map_err(|e| read_err(e.to_string()))?;
    serde_json::from_str(&raw).map(Some).map_err(|e| read_err(e.to_string()))
}

fn load_or_empty<T: DeserializeOwned + Default>(path: &Path, what: &str) -> Loaded<T> {
    match read_json(path) {
        Ok(Some(data)) => Loaded { data, warning: None },
        Ok(None) => Loaded { data: T::default(), warning: None },
        Err(e) => {
            warn!(error = %e, "{what} file unreadable, using an empty collection");
            Loaded {
                data: T::default(),
                warning: Some(format!("{e}. Starting with an empty {what}.")),
            }
        }
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let write_err = |reason: String| StoreError::Write { path: path.to_path_buf(), reason };

    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    value.serialize(&mut ser).map_err(|e| write_err(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    fs::write(path, buf).map_err(|e| write_err(e.to_string()))
}
