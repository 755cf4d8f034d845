//! Append-only error queue with soft dismissal.

use crate::error::{check_index, Result};
use crate::types::ErrorRecord;
use tracing::{debug, warn};

/// Ordered history of error notifications.
#[derive(Clone, Debug, Default)]
pub struct ErrorQueue {
    errors: Vec<ErrorRecord>,
}

impl ErrorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an error. No deduplication.
    pub fn log_error(&mut self, error: ErrorRecord) {
        debug!(message = %error.message, index = self.errors.len(), "Logged error");
        self.errors.push(error);
    }

    /// Mark the error at `index` as dismissed, preserving every other field.
    pub fn dismiss_error(&mut self, index: usize) -> Result<()> {
        if let Err(e) = check_index(index, self.errors.len()) {
            warn!(index, len = self.errors.len(), "Rejected dismissal");
            return Err(e);
        }

        let updated = ErrorRecord {
            show: false,
            ..self.errors[index].clone()
        };
        self.errors[index] = updated;

        debug!(index, "Dismissed error");
        Ok(())
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Errors that have not been dismissed, with their indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &ErrorRecord)> {
        self.errors.iter().enumerate().filter(|(_, e)| e.show)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use serde_json::json;

    #[test]
    fn test_log_then_dismiss() {
        let mut queue = ErrorQueue::new();
        queue.log_error(ErrorRecord::new("x"));
        queue.log_error(ErrorRecord::new("y").with_detail(json!({"code": 500})));

        queue.dismiss_error(0).unwrap();

        assert_eq!(queue.len(), 2);
        assert!(!queue.errors()[0].show);
        assert_eq!(queue.errors()[0].message, "x");
        assert_eq!(queue.errors()[1], ErrorRecord::new("y").with_detail(json!({"code": 500})));
    }

    #[test]
    fn test_no_deduplication() {
        let mut queue = ErrorQueue::new();
        queue.log_error(ErrorRecord::new("same"));
        queue.log_error(ErrorRecord::new("same"));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_dismiss_out_of_range() {
        let mut queue = ErrorQueue::new();
        queue.log_error(ErrorRecord::new("x"));

        let result = queue.dismiss_error(1);
        assert!(matches!(
            result,
            Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(queue.errors()[0].show);
    }

    #[test]
    fn test_dismiss_twice_is_idempotent() {
        let mut queue = ErrorQueue::new();
        queue.log_error(ErrorRecord::new("x"));
        queue.dismiss_error(0).unwrap();
        queue.dismiss_error(0).unwrap();
        assert_eq!(queue.visible().count(), 0);
        assert_eq!(queue.len(), 1);
    }
}
