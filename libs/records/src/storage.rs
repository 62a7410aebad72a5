//! JSON file persistence for one record collection
//!
//! Each collection lives in a single file holding a pretty-printed JSON array.
//! Reads are forgiving: a missing file is created empty, an unreadable or
//! malformed file reads as an empty collection. Array elements that do not
//! fit the record type are retained as raw JSON and written back unchanged
//! after the typed records. Writes go to a temporary file
//! in the same directory which is then renamed over the live file, so readers
//! never observe a half-written array.

use crate::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Create a directory (and parents) if it does not exist yet.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// What a load produced: the typed records plus the elements that did not fit.
#[derive(Debug, Clone, PartialEq)]
pub struct Contents<R> {
    pub records: Vec<R>,
    pub retained: Vec<Value>,
}

impl<R> Default for Contents<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            retained: Vec::new(),
        }
    }
}

/// Typed JSON array file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R> JsonFileStorage<R>
where
    R: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record from the file.
    ///
    /// A missing file is created with `[]` and yields an empty collection.
    /// Content that is not a JSON array yields an empty collection; array
    /// elements that do not match the record schema go to `retained`.
    pub fn load(&self) -> Result<Contents<R>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Creating empty record file");
            self.save(&[], &[])?;
            return Ok(Contents::default());
        }

        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Record file unreadable, treating as empty"
                );
                return Ok(Contents::default());
            }
        };

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Record file does not hold a JSON array, treating as empty"
                );
                return Ok(Contents::default());
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Record file is not valid JSON, treating as empty"
                );
                return Ok(Contents::default());
            }
        };

        let mut contents = Contents {
            records: Vec::with_capacity(items.len()),
            retained: Vec::new(),
        };
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<R>(item.clone()) {
                Ok(record) => contents.records.push(record),
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "Retaining record that does not match the schema"
                    );
                    contents.retained.push(item);
                }
            }
        }

        Ok(contents)
    }

    /// Replace the file content with `records` followed by `retained`.
    pub fn save(&self, records: &[R], retained: &[Value]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        ensure_dir(dir)?;

        let mut rows = Vec::with_capacity(records.len() + retained.len());
        for record in records {
            rows.push(serde_json::to_value(record)?);
        }
        rows.extend_from_slice(retained);

        let mut json = serde_json::to_string_pretty(&rows)?;
        json.push('\n');

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            retained = retained.len(),
            "Record file written"
        );
        Ok(())
    }
}
