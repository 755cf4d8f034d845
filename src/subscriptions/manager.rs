//! Subscription manager for broadcasting store events.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

use super::types::{
    ActionPhase, DropReason, StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

/// Default subscriber buffer (events).
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<StoreEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if the subscriber must be dropped.
    fn try_send(&self, event: StoreEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
    /// Buffer size for subscriptions that don't set one.
    default_buffer_size: usize,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new subscription manager with a custom default buffer.
    ///
    /// Buffers hold at least one event; `0` is treated as `1`.
    pub fn with_buffer_size(default_buffer_size: usize) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            default_buffer_size,
        }
    }

    /// Create a new subscription.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        // A zero-capacity channel never accepts a try_send
        let buffer_size = config.buffer_size.unwrap_or(self.default_buffer_size).max(1);
        let (sender, receiver) = bounded(buffer_size);

        self.subscriptions.write().insert(id, Subscription { config, sender });

        debug!(id = id.0, buffer_size, "Added subscription");
        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Best effort
            let _ = sub.sender.try_send(StoreEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
            debug!(id = id.0, "Removed subscription");
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    // --- Broadcasting ---

    /// Broadcast an applied mutation.
    pub fn broadcast_mutation(&self, name: &str) {
        let event = StoreEvent::Mutation {
            name: name.to_string(),
        };

        self.broadcast(|sub| sub.config.filter.matches_mutation(name), event);
    }

    /// Broadcast an action phase.
    pub fn broadcast_action(&self, name: &str, phase: ActionPhase) {
        let event = StoreEvent::Action {
            name: name.to_string(),
            phase,
        };

        self.broadcast(|sub| sub.config.filter.matches_action(name), event);
    }

    /// Internal broadcast helper. Drops subscribers that fail to receive.
    fn broadcast<F>(&self, filter: F, event: StoreEvent)
    where
        F: Fn(&Subscription) -> bool,
    {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if filter(sub) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        trace!(event = ?event, dropped = to_remove.len(), "Broadcast event");

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    // Might fail, that's ok
                    let _ = sub.sender.try_send(StoreEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                    debug!(id = id.0, "Dropped slow subscription");
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::SubscriptionFilter;

    #[test]
    fn test_subscribe_unsubscribe() {
        let manager = SubscriptionManager::new();

        let handle = manager.subscribe(SubscriptionConfig::default());
        assert_eq!(manager.subscription_count(), 1);

        manager.unsubscribe(handle.id);
        assert_eq!(manager.subscription_count(), 0);
        assert_eq!(
            handle.try_recv().unwrap(),
            StoreEvent::Dropped {
                reason: DropReason::Unsubscribed
            }
        );
    }

    #[test]
    fn test_broadcast_to_matching() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::mutation_names(vec!["addLogs".to_string()]),
            ..Default::default()
        });

        manager.broadcast_mutation("addLogs");
        manager.broadcast_mutation("clearLogs");
        manager.broadcast_action("initializeLog", ActionPhase::Before);

        assert_eq!(
            handle.drain(),
            vec![StoreEvent::Mutation {
                name: "addLogs".to_string()
            }]
        );
    }

    #[test]
    fn test_drop_slow_subscriber() {
        let manager = SubscriptionManager::new();
        let _handle = manager.subscribe(SubscriptionConfig {
            buffer_size: Some(2),
            filter: SubscriptionFilter::mutations(),
        });

        for _ in 0..10 {
            manager.broadcast_mutation("addLogs");
        }

        assert_eq!(manager.subscription_count(), 0);
    }

    #[test]
    fn test_drop_disconnected_subscriber() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::all(),
            ..Default::default()
        });
        drop(handle);

        manager.broadcast_action("forceSyncAssetsAndAreas", ActionPhase::After);
        assert_eq!(manager.subscription_count(), 0);
    }

    #[test]
    fn test_manager_default_buffer() {
        let manager = SubscriptionManager::with_buffer_size(1);
        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::mutations(),
            ..Default::default()
        });

        manager.broadcast_mutation("clearLogs");
        assert_eq!(manager.subscription_count(), 1);
        manager.broadcast_mutation("clearLogs");
        assert_eq!(manager.subscription_count(), 0);
        assert_eq!(handle.drain().len(), 1);
    }

    #[test]
    fn test_zero_buffer_holds_one_event() {
        let manager = SubscriptionManager::with_buffer_size(0);
        let handle = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::mutations(),
            ..Default::default()
        });
        let explicit = manager.subscribe(SubscriptionConfig {
            buffer_size: Some(0),
            filter: SubscriptionFilter::mutations(),
        });

        manager.broadcast_mutation("clearLogs");

        assert_eq!(manager.subscription_count(), 2);
        assert_eq!(handle.drain().len(), 1);
        assert_eq!(explicit.drain().len(), 1);
    }
}
