//! User-visible error notifications.
//!
//! Errors are appended in creation order and never removed. Dismissal only
//! clears the record's `show` flag, so indices stay stable between
//! transitions.

mod queue;

pub use queue::ErrorQueue;
