//! Hooks for collaborators that react to store transitions.
//!
//! Subscribers receive:
//! - a `Mutation` event after every transition that applied
//! - `Action` events before and after each action runs
//!
//! Events are delivered over bounded channels. A subscriber that falls
//! behind (full buffer) or goes away is dropped.
//!
//! # Example
//!
//! ```ignore
//! let handle = store.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::action_names(vec!["forceSyncAssetsAndAreas".into()]),
//!     ..Default::default()
//! });
//!
//! store.force_sync_assets_and_areas();
//!
//! while let Ok(event) = handle.try_recv() {
//!     if let StoreEvent::Action { phase: ActionPhase::Before, .. } = event {
//!         // start a sync
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::{SubscriptionManager, DEFAULT_BUFFER_SIZE};
pub use types::{
    ActionPhase, DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    SubscriptionHandle, SubscriptionId,
};
