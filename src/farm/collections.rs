//! Ordered and id-keyed record collections.

use crate::error::{check_index, Result, StoreError};
use crate::types::{LogEntry, Record};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ordered logs with a pointer to the log under active edit.
///
/// The pointer is an index, kept valid across every structural change:
/// whenever the list is non-empty it addresses an existing log, and it is
/// `0` when the list is empty.
#[derive(Clone, Debug, Default)]
pub struct LogList {
    logs: Vec<LogEntry>,
    current: usize,
}

impl LogList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.logs.get(index)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The log under active edit, if any.
    pub fn current(&self) -> Option<&LogEntry> {
        self.logs.get(self.current)
    }

    /// Append a batch, preserving its order. The pointer is not moved.
    pub fn extend(&mut self, batch: Vec<LogEntry>) {
        let added = batch.len();
        self.logs.extend(batch);
        debug!(added, len = self.logs.len(), "Appended logs");
    }

    /// Append one log and point at it. Returns the new pointer.
    pub fn push_current(&mut self, log: LogEntry) -> usize {
        self.logs.push(log);
        self.current = self.logs.len() - 1;
        debug!(current = self.current, "Appended current log");
        self.current
    }

    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if let Err(e) = check_index(index, self.logs.len()) {
            warn!(index, len = self.logs.len(), "Rejected current log index");
            return Err(e);
        }
        self.current = index;
        Ok(())
    }

    /// Replace the current log with `f(current)`.
    ///
    /// `f` receives a copy; the stored log is untouched if `f` fails.
    pub fn replace_current<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(LogEntry) -> Result<LogEntry>,
    {
        let current = self.current().cloned().ok_or(StoreError::NoCurrentRecord)?;
        let updated = f(current)?;
        self.logs[self.current] = updated;
        debug!(current = self.current, "Replaced current log");
        Ok(())
    }

    /// Replace every log with `f(log)`. Length and order are unchanged.
    ///
    /// `f` receives copies; the list is only swapped once every log has been
    /// mapped, so a panicking `f` leaves it as it was.
    pub fn map_all<F>(&mut self, f: F)
    where
        F: Fn(LogEntry) -> LogEntry,
    {
        let mapped: Vec<LogEntry> = self.logs.iter().cloned().map(f).collect();
        self.logs = mapped;
        debug!(len = self.logs.len(), "Updated all logs");
    }

    /// Replace the log at each of `indices`, in the given order, with
    /// `mapper(log)`. A repeated index sees the result of its previous
    /// application.
    ///
    /// All indices are checked before any log is touched, and results are
    /// staged until every application has returned.
    pub fn map_at<F>(&mut self, indices: &[usize], mapper: F) -> Result<()>
    where
        F: Fn(LogEntry) -> LogEntry,
    {
        let len = self.logs.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            warn!(index, len, "Rejected log update");
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let mut staged: HashMap<usize, LogEntry> = HashMap::with_capacity(indices.len());
        for &i in indices {
            let log = match staged.remove(&i) {
                Some(log) => log,
                None => self.logs[i].clone(),
            };
            staged.insert(i, mapper(log));
        }

        for (i, log) in staged {
            self.logs[i] = log;
        }

        debug!(count = indices.len(), "Updated logs");
        Ok(())
    }

    /// Remove the log at `index`, shifting later logs down.
    ///
    /// The pointer keeps designating the same log when an earlier log is
    /// removed. When the current log itself is removed, the pointer stays at
    /// its position (now the following log), clamped to the last log.
    pub fn remove(&mut self, index: usize) -> Result<LogEntry> {
        if let Err(e) = check_index(index, self.logs.len()) {
            warn!(index, len = self.logs.len(), "Rejected log deletion");
            return Err(e);
        }

        let removed = self.logs.remove(index);

        if index < self.current {
            self.current -= 1;
        } else if self.current >= self.logs.len() {
            self.current = self.logs.len().saturating_sub(1);
        }

        debug!(index, current = self.current, len = self.logs.len(), "Deleted log");
        Ok(removed)
    }

    /// Remove every log and reset the pointer to `0`.
    pub fn clear(&mut self) {
        self.logs.clear();
        self.current = 0;
        debug!("Cleared logs");
    }
}

/// Records identified by their `id` field, in insertion order.
///
/// Batches are appended without an id check; duplicate ids are the
/// appender's responsibility. Replacement only ever touches the first
/// record with a matching id.
#[derive(Clone, Debug)]
pub struct KeyedCollection {
    kind: &'static str,
    records: Vec<Record>,
}

impl KeyedCollection {
    /// Create an empty collection. `kind` names it in logs and errors.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the first record whose `id` equals `id`.
    pub fn position(&self, id: &Value) -> Option<usize> {
        self.records.iter().position(|r| r.id() == Some(id))
    }

    pub fn get(&self, id: &Value) -> Option<&Record> {
        self.position(id).map(|i| &self.records[i])
    }

    pub fn extend(&mut self, batch: Vec<Record>) {
        let added = batch.len();
        self.records.extend(batch);
        debug!(kind = self.kind, added, len = self.records.len(), "Appended records");
    }

    /// Replace the stored record with the same `id` wholesale.
    pub fn replace(&mut self, record: Record) -> Result<()> {
        let id = record.id().cloned().ok_or_else(|| {
            StoreError::InvalidPayload(format!("{} replacement has no id", self.kind))
        })?;

        let Some(index) = self.position(&id) else {
            warn!(kind = self.kind, id = %id, "Rejected replacement of unknown record");
            return Err(StoreError::NotFound(format!("{} {}", self.kind, id)));
        };

        self.records[index] = record;
        debug!(kind = self.kind, id = %id, index, "Replaced record");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.records.clear();
        debug!(kind = self.kind, "Cleared records");
    }
}
