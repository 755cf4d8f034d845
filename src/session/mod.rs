//! User session and settings.
//!
//! Plain field replacement: every setter accepts any value and stores it
//! verbatim. Validation (e.g. of an email address) belongs to the caller.

mod manager;

pub use manager::SessionState;
