//! Payment ledger port (write side).
//!
//! Each posted payment is its own independent write: units never share a
//! transaction, so one employee's failure cannot roll back another's
//! already-committed payment.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use wagemill_payroll::PaymentRecord;

/// Error type for ledger writes.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger backend error: {0}")]
    Backend(String),
}

/// Write-side port for posted salary payments.
#[async_trait]
pub trait PaymentLedger: Send + Sync {
    /// Post one payment. Must be atomic per call.
    async fn post(&self, record: PaymentRecord) -> Result<(), LedgerError>;
}

/// In-memory payment ledger for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPaymentLedger {
    posted: Mutex<Vec<PaymentRecord>>,
}

impl InMemoryPaymentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posted(&self) -> Vec<PaymentRecord> {
        self.posted
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentLedger for InMemoryPaymentLedger {
    async fn post(&self, record: PaymentRecord) -> Result<(), LedgerError> {
        let mut posted = self
            .posted
            .lock()
            .map_err(|_| LedgerError::Backend("lock poisoned".to_string()))?;
        posted.push(record);
        Ok(())
    }
}
