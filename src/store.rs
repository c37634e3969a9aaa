// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The record journal and the key-value slot it lives in.
//!
//! The whole journal is one JSON array stored under a single key. It is read
//! once when a session starts and rewritten in full after every append.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::models::{Category, RecordInput, SpendingRecord};
use crate::utils::{parse_amount, parse_date};

pub const DEFAULT_STORAGE_KEY: &str = "records";

/// A get/set/clear slot store addressed by string keys.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn clear(&self, key: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
    fn clear(&self, key: &str) -> Result<()> {
        (**self).clear(key)
    }
}

/// Slots backed by the `kv` table (see `db::open_or_init`).
impl BlobStore for Connection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
            .with_context(|| format!("Read slot '{}'", key))?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )
        .with_context(|| format!("Write slot '{}'", key))?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.execute("DELETE FROM kv WHERE key=?1", params![key])
            .with_context(|| format!("Clear slot '{}'", key))?;
        Ok(())
    }
}

/// In-process slots, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

/// What to do with a category label outside the fixed set when appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryPolicy {
    #[default]
    Reject,
    Miscellaneous,
    PassThrough,
}

impl CategoryPolicy {
    /// The label to store for `label`, or `None` if the record is refused.
    pub fn resolve(self, label: &str) -> Option<String> {
        if Category::from_label(label).is_some() {
            return Some(label.to_string());
        }
        match self {
            CategoryPolicy::Reject => None,
            CategoryPolicy::Miscellaneous => Some(Category::Miscellaneous.label().to_string()),
            CategoryPolicy::PassThrough => Some(label.to_string()),
        }
    }
}

/// Journal records in persistence order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCollection {
    records: Vec<SpendingRecord>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SpendingRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpendingRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A copy of this collection with the record built from `input` at the
    /// end, or `None` when the input does not make a valid record.
    pub fn append(&self, input: &RecordInput, policy: CategoryPolicy) -> Option<RecordCollection> {
        let record = validate(input, policy)?;
        let mut records = self.records.clone();
        records.push(record);
        Some(RecordCollection { records })
    }
}

impl From<Vec<SpendingRecord>> for RecordCollection {
    fn from(records: Vec<SpendingRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a SpendingRecord;
    type IntoIter = std::slice::Iter<'a, SpendingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn validate(input: &RecordInput, policy: CategoryPolicy) -> Option<SpendingRecord> {
    let date = input.date.trim();
    let category = input.category.trim();
    if date.is_empty() || category.is_empty() || input.amount.trim().is_empty() {
        debug!("append refused: missing field");
        return None;
    }
    if parse_date(date).is_err() {
        debug!(date, "append refused: bad date");
        return None;
    }
    let Some(amount) = parse_amount(&input.amount) else {
        debug!(amount = %input.amount, "append refused: bad amount");
        return None;
    };
    let Some(category) = policy.resolve(category) else {
        debug!(category, ?policy, "append refused: category not allowed");
        return None;
    };
    Some(SpendingRecord::new(date, category, amount))
}

/// Loads and saves the journal through an injected [`BlobStore`].
pub struct RecordStore<S> {
    store: S,
    key: String,
    policy: CategoryPolicy,
}

impl<S: BlobStore> RecordStore<S> {
    pub fn new(store: S, key: impl Into<String>, policy: CategoryPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            policy,
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY, CategoryPolicy::default())
    }

    /// The stored blob as-is.
    pub fn raw(&self) -> Result<Option<String>> {
        self.store.get(&self.key)
    }

    /// Read the journal. A missing or unreadable blob is an empty journal;
    /// only faults of the underlying store are returned as errors.
    pub fn load(&self) -> Result<RecordCollection> {
        let Some(blob) = self.raw()? else {
            debug!(key = %self.key, "no stored journal, starting empty");
            return Ok(RecordCollection::new());
        };
        match serde_json::from_str::<RecordCollection>(&blob) {
            Ok(c) => {
                debug!(key = %self.key, records = c.len(), "journal loaded");
                Ok(c)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored journal unreadable, starting empty");
                Ok(RecordCollection::new())
            }
        }
    }

    /// Overwrite the stored blob with the full collection.
    pub fn persist(&self, collection: &RecordCollection) -> Result<()> {
        let blob = serde_json::to_string(collection)?;
        self.store.set(&self.key, &blob)?;
        debug!(key = %self.key, records = collection.len(), "journal persisted");
        Ok(())
    }

    /// Append `input` and persist right away. Returns `false`, leaving the
    /// collection and the store untouched, when the input is refused.
    pub fn add(&self, collection: &mut RecordCollection, input: &RecordInput) -> Result<bool> {
        let Some(updated) = collection.append(input, self.policy) else {
            return Ok(false);
        };
        self.persist(&updated)?;
        *collection = updated;
        info!(records = collection.len(), "record added");
        Ok(true)
    }
}
