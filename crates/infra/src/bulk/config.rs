//! Run configuration, validated once at entry.

use std::time::Duration;

use super::error::BulkRunError;

/// How the engine sources the employee population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamingMode {
    /// Stream when the eligible population reaches `streaming_threshold`.
    #[default]
    Auto,
    /// Always consume from a cursor, one page per batch.
    Enabled,
    /// Always materialize the full population up front.
    Disabled,
}

/// Configuration for one bulk payroll run.
///
/// Validated once before any unit runs; constant for the run's lifetime.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Employees per batch. Must be at least 1.
    pub batch_size: usize,
    /// Pause inserted between batches (never after the final batch).
    pub batch_delay: Duration,
    /// Maximum units executing simultaneously within a batch. Must be at
    /// least 1; 1 selects the strictly-ordered sequential path.
    pub concurrency: usize,
    /// Population sourcing mode.
    pub streaming: StreamingMode,
    /// Population size at which `StreamingMode::Auto` switches to a cursor.
    pub streaming_threshold: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay: Duration::ZERO,
            concurrency: 1,
            streaming: StreamingMode::Auto,
            streaming_threshold: 1_000,
        }
    }
}

impl RunConfig {
    /// Reject configurations no run should start with.
    pub fn validate(&self) -> Result<(), BulkRunError> {
        if self.batch_size == 0 {
            return Err(BulkRunError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(BulkRunError::Configuration(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sequential_small_batches() {
        let config = RunConfig::default();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.batch_delay, Duration::ZERO);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.streaming, StreamingMode::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let config = RunConfig {
            batch_size: 0,
            ..RunConfig::default()
        };
        match config.validate().unwrap_err() {
            BulkRunError::Configuration(msg) => assert!(msg.contains("batch_size")),
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let config = RunConfig {
            concurrency: 0,
            ..RunConfig::default()
        };
        match config.validate().unwrap_err() {
            BulkRunError::Configuration(msg) => assert!(msg.contains("concurrency")),
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }
}
