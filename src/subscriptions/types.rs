//! Subscription types for store hooks.

use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping the subscriber.
    /// None = the manager's default. At least 1.
    pub buffer_size: Option<usize>,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

/// Filter criteria for subscriptions.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Only these mutation names (None = all).
    pub mutation_names: Option<Vec<String>>,

    /// Only these action names (None = all).
    pub action_names: Option<Vec<String>>,

    /// Include mutation events.
    pub include_mutations: bool,

    /// Include action events.
    pub include_actions: bool,
}

impl SubscriptionFilter {
    /// Every mutation.
    pub fn mutations() -> Self {
        Self {
            include_mutations: true,
            ..Default::default()
        }
    }

    /// Specific mutations by name.
    pub fn mutation_names(names: Vec<String>) -> Self {
        Self {
            mutation_names: Some(names),
            include_mutations: true,
            ..Default::default()
        }
    }

    /// Every action.
    pub fn actions() -> Self {
        Self {
            include_actions: true,
            ..Default::default()
        }
    }

    /// Specific actions by name.
    pub fn action_names(names: Vec<String>) -> Self {
        Self {
            action_names: Some(names),
            include_actions: true,
            ..Default::default()
        }
    }

    /// Everything.
    pub fn all() -> Self {
        Self {
            include_mutations: true,
            include_actions: true,
            ..Default::default()
        }
    }

    pub(crate) fn matches_mutation(&self, name: &str) -> bool {
        if !self.include_mutations {
            return false;
        }

        match self.mutation_names {
            Some(ref names) => names.iter().any(|n| n == name),
            None => true,
        }
    }

    pub(crate) fn matches_action(&self, name: &str) -> bool {
        if !self.include_actions {
            return false;
        }

        match self.action_names {
            Some(ref names) => names.iter().any(|n| n == name),
            None => true,
        }
    }
}

/// When an action event fires relative to the action's work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    Before,
    After,
}

/// Events emitted to subscribers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A transition was applied.
    Mutation { name: String },

    /// An action is about to run, or has finished.
    Action { name: String, phase: ActionPhase },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to receive a subscription's events.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    pub receiver: crossbeam_channel::Receiver<StoreEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<StoreEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<StoreEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every event currently buffered.
    pub fn drain(&self) -> Vec<StoreEvent> {
        self.receiver.try_iter().collect()
    }
}
