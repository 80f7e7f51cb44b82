//! Configuration for the consumer pool.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikiRaiderError};

/// Default number of consumer threads.
pub const DEFAULT_CONSUMER_AMOUNT: usize = 5;

/// Configuration for a [`WorkQueue`](crate::queue::WorkQueue).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Number of long-lived consumer threads.
    pub consumer_amount: usize,

    /// How long an empty consumer waits before logging that it is idle.
    pub idle_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            consumer_amount: DEFAULT_CONSUMER_AMOUNT,
            idle_timeout: Duration::from_secs(1),
        }
    }
}

impl QueueConfig {
    /// Create a configuration with `consumer_amount` threads.
    pub fn new(consumer_amount: usize) -> Self {
        Self {
            consumer_amount,
            ..Default::default()
        }
    }

    /// Set the idle timeout.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Reject configurations that could never drain.
    pub fn validate(&self) -> Result<()> {
        if self.consumer_amount == 0 {
            return Err(WikiRaiderError::invalid_operation(
                "the work queue needs at least one consumer",
            ));
        }
        if self.idle_timeout.is_zero() {
            return Err(WikiRaiderError::invalid_operation(
                "the idle timeout must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_config_default() {
        let config = QueueConfig::default();
        assert_eq!(config.consumer_amount, 5);
        assert_eq!(config.idle_timeout, Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_consumers_is_rejected() {
        assert!(QueueConfig::new(0).validate().is_err());
        assert!(
            QueueConfig::new(2)
                .with_idle_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
