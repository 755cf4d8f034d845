//! Farm domain records.
//!
//! Logs live in an ordered list addressed by position, with a single
//! pointer designating the log under active edit. Assets and areas are
//! keyed by `id` and replaced wholesale. Scratch fields hold the state of
//! an in-progress interaction (photo location, geolocation, an area being
//! drawn) and are not domain records.

mod collections;
mod manager;

pub use collections::{KeyedCollection, LogList};
pub use manager::FarmState;
