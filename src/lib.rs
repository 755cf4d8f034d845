//! # Farm Store
//!
//! In-memory application state for a farm record-keeping client.
//!
//! ## Core Concepts
//!
//! - **Session**: user identity, login flag and settings
//! - **Notifications**: an append-only error queue with soft dismissal
//! - **Farm records**: logs (ordered, with a current-log pointer), assets
//!   and areas (keyed by `id`), plus scratch fields for in-progress work
//! - **Transitions**: every write is a named [`Mutation`] or an action, and
//!   either applies completely or fails without touching the tree
//! - **Hooks**: subscribers are told about applied mutations and actions
//!
//! Log normalization and the wall clock are injected capabilities
//! ([`LogNormalizer`], [`Clock`]).
//!
//! ## Example
//!
//! ```ignore
//! use farm_store::{Mutation, Record, Store};
//! use serde_json::json;
//!
//! let mut store = Store::with_defaults();
//!
//! store.commit(Mutation::AddAssets(vec![
//!     Record::from_value(json!({"id": 7, "name": "Tractor"}))?,
//! ]))?;
//!
//! // Start a new log and edit it
//! store.initialize_log("farm_observation")?;
//! store.commit(Mutation::UpdateCurrentLog(
//!     Record::from_value(json!({"notes": "Frost on the east field"}))?,
//! ))?;
//! ```

pub mod clock;
pub mod error;
pub mod farm;
pub mod mutations;
pub mod normalize;
pub mod notifications;
pub mod session;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, StoreError};
pub use farm::{FarmState, KeyedCollection, LogList};
pub use mutations::Mutation;
pub use normalize::{DefaultLogFactory, LogNormalizer, Passthrough};
pub use notifications::ErrorQueue;
pub use session::SessionState;
pub use store::{
    FarmSnapshot, ShellSnapshot, StateSnapshot, Store, StoreConfig, FORCE_SYNC_ASSETS_AND_AREAS,
    INITIALIZE_LOG,
};
pub use subscriptions::{
    ActionPhase, DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
pub use types::*;
