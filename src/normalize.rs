//! Log normalization capability.
//!
//! Logs created or edited through the current-log protocol pass through a
//! [`LogNormalizer`] before they are stored. The store never inspects record
//! shape itself; it only calls the normalizer it was constructed with.

use crate::error::{Result, StoreError};
use crate::types::Record;
use serde_json::Value;

/// Turns a raw log into a validated, defaulted log of the same kind.
pub trait LogNormalizer {
    fn normalize(&self, raw: Record) -> Result<Record>;
}

impl<F> LogNormalizer for F
where
    F: Fn(Record) -> Result<Record>,
{
    fn normalize(&self, raw: Record) -> Result<Record> {
        self(raw)
    }
}

/// Fills the fields every log is expected to carry and rejects logs whose
/// descriptive fields are not strings. Unknown fields pass through.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLogFactory;

/// String fields defaulted to `""`.
const STRING_FIELDS: &[&str] = &["type", "name", "timestamp", "notes"];

impl LogNormalizer for DefaultLogFactory {
    fn normalize(&self, mut raw: Record) -> Result<Record> {
        for field in STRING_FIELDS {
            match raw.get(field) {
                None | Some(Value::Null) => {
                    raw.insert(*field, "");
                }
                Some(Value::String(_)) => {}
                // Unix seconds are accepted as numbers and stored as text
                Some(Value::Number(n)) if *field == "timestamp" => {
                    let text = n.to_string();
                    raw.insert(*field, text);
                }
                Some(other) => {
                    return Err(StoreError::InvalidPayload(format!(
                        "log field `{}` must be a string, got {}",
                        field, other
                    )));
                }
            }
        }

        match raw.get("done") {
            None | Some(Value::Null) => {
                raw.insert("done", false);
            }
            Some(Value::Bool(_)) => {}
            Some(other) => {
                return Err(StoreError::InvalidPayload(format!(
                    "log field `done` must be a boolean, got {}",
                    other
                )));
            }
        }

        Ok(raw)
    }
}

/// Stores logs exactly as given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl LogNormalizer for Passthrough {
    fn normalize(&self, raw: Record) -> Result<Record> {
        Ok(raw)
    }
}
