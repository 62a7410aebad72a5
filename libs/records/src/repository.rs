//! Generic in-memory repository over a JSON file
//!
//! A [`Repository`] lazily loads its collection on first access and serves
//! every later call from the cache until [`Repository::reload`] is called.
//! Reads hand out clones, so callers never alias the cached records. File
//! rows that do not fit the record type are carried along untouched and
//! written back on every save.

use crate::storage::JsonFileStorage;
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::path::Path;

/// Comparable projection of a record field, used for deterministic sorting.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Int(i64),
    Text(String),
}

/// A record type stored in its own JSON file.
pub trait Record: Clone + Debug + Serialize + DeserializeOwned {
    type Key: Clone + Debug + PartialEq;

    /// File name inside the data directory.
    const FILE_NAME: &'static str;

    /// Fields that make up the identity; never overwritten by an update.
    const IDENTITY_FIELDS: &'static [&'static str];

    fn key(&self) -> Self::Key;

    /// Text form of a field, `None` when the field is absent.
    fn field_text(&self, field: &str) -> Option<String>;

    /// Sort projection of a field. Text compares lowercase.
    fn sort_value(&self, field: &str) -> SortValue {
        SortValue::Text(self.field_text(field).unwrap_or_default().to_lowercase())
    }
}

#[derive(Debug)]
pub struct Repository<R: Record> {
    storage: JsonFileStorage<R>,
    autosave: bool,
    cache: Option<Vec<R>>,
    retained: Vec<Value>,
}

impl<R: Record> Repository<R> {
    /// Repository backed by `R::FILE_NAME` inside `data_dir`. Nothing is read yet.
    pub fn open(data_dir: &Path, autosave: bool) -> Self {
        Self {
            storage: JsonFileStorage::new(data_dir.join(R::FILE_NAME)),
            autosave,
            cache: None,
            retained: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    pub fn autosave(&self) -> bool {
        self.autosave
    }

    fn records(&mut self) -> Result<&mut Vec<R>> {
        if self.cache.is_none() {
            let contents = self.storage.load()?;
            self.retained = contents.retained;
            self.cache = Some(contents.records);
        }
        Ok(self.cache.get_or_insert_with(Vec::new))
    }

    /// Persist after a mutation. On failure the cache is rolled back to
    /// `previous` so it keeps mirroring the file.
    fn commit(&mut self, previous: Vec<R>) -> Result<()> {
        if !self.autosave {
            return Ok(());
        }
        let current = self.cache.as_deref().unwrap_or_default();
        if let Err(e) = self.storage.save(current, &self.retained) {
            self.cache = Some(previous);
            return Err(e);
        }
        Ok(())
    }

    pub fn list_all(&mut self) -> Result<Vec<R>> {
        Ok(self.records()?.clone())
    }

    pub fn get_by_id(&mut self, key: &R::Key) -> Result<Option<R>> {
        Ok(self.records()?.iter().find(|r| r.key() == *key).cloned())
    }

    pub fn exists(&mut self, key: &R::Key) -> Result<bool> {
        Ok(self.records()?.iter().any(|r| r.key() == *key))
    }

    /// Append a record and return the stored copy.
    pub fn insert(&mut self, record: R) -> Result<R> {
        let records = self.records()?;
        let previous = records.clone();
        records.push(record.clone());
        self.commit(previous)?;
        Ok(record)
    }

    /// Merge `patch` over the record at `key`.
    ///
    /// Patch values win over stored values and `null` removes a field.
    /// Identity fields in the patch are ignored.
    pub fn update(&mut self, key: &R::Key, patch: &Map<String, Value>) -> Result<R> {
        let records = self.records()?;
        let index = records
            .iter()
            .position(|r| r.key() == *key)
            .ok_or_else(|| Error::not_found(format!("Record not found: {key:?}")))?;

        let mut merged = match serde_json::to_value(&records[index])? {
            Value::Object(map) => map,
            _ => return Err(Error::invalid_input("Stored record is not a JSON object")),
        };
        for (field, value) in patch {
            if R::IDENTITY_FIELDS.contains(&field.as_str()) {
                continue;
            }
            if value.is_null() {
                merged.remove(field);
            } else {
                merged.insert(field.clone(), value.clone());
            }
        }
        let updated: R = serde_json::from_value(Value::Object(merged))
            .map_err(|e| Error::invalid_input(format!("Invalid update: {e}")))?;

        let previous = records.clone();
        records[index] = updated.clone();
        self.commit(previous)?;
        Ok(updated)
    }

    /// Remove the record at `key`. Returns false when nothing matched.
    pub fn delete(&mut self, key: &R::Key) -> Result<bool> {
        let records = self.records()?;
        let Some(index) = records.iter().position(|r| r.key() == *key) else {
            return Ok(false);
        };

        let previous = records.clone();
        records.remove(index);
        self.commit(previous)?;
        Ok(true)
    }

    /// Write the cached collection. A repository that was never read has
    /// nothing to flush.
    pub fn save(&mut self) -> Result<()> {
        match self.cache.as_deref() {
            Some(records) => self.storage.save(records, &self.retained),
            None => Ok(()),
        }
    }

    /// Drop the cache; the next access reads the file again.
    pub fn reload(&mut self) {
        self.cache = None;
        self.retained.clear();
    }
}
