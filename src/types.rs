//! Core types for the farm store.

use crate::error::{Result, StoreError};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Seconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Whole seconds of `dt`, rounded down.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp())
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A domain record: an owned JSON object with caller-defined fields.
///
/// Logs, assets and areas share this representation. Assets and areas are
/// identified by their `id` field; logs are addressed by position only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// A log entry, addressed by its position in the logs collection.
pub type LogEntry = Record;

/// An asset, identified by `id`.
pub type Asset = Record;

/// An area, identified by `id`.
pub type Area = Record;

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StoreError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// The record's `id` field, if present and not null.
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id").filter(|v| !v.is_null())
    }

    /// Get a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Shallow merge: every field of `props` overwrites the field of the same name.
    pub fn merge(&mut self, props: Record) {
        for (key, value) in props.0 {
            self.0.insert(key, value);
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self> {
        Record::from_value(value)
    }
}

fn default_show() -> bool {
    true
}

/// A user-visible error notification.
///
/// `show` is cleared on dismissal; the record itself is never removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,

    #[serde(default)]
    pub detail: Value,

    #[serde(default = "default_show")]
    pub show: bool,

    /// Opaque caller payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorRecord {
    /// A visible error with no detail.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: Value::Null,
            show: true,
            extra: Map::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = detail.into();
        self
    }
}

/// Identity and login state of the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub name: String,
    pub email: String,
    pub uid: Option<String>,
    pub is_logged_in: bool,
}

/// User-adjustable settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub use_geolocation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_geolocation: true,
        }
    }
}
