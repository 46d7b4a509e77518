//! The bulk payroll run driver.
//!
//! Owns the batch schedule: population sourcing (materialized or streamed),
//! the batch loop with its cancellation checkpoints and inter-batch delay,
//! progress plumbing, and the completion notification.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{info, warn};

use wagemill_core::{EmployeeId, OrganizationId, PayPeriod};
use wagemill_events::{EventBus, InMemoryEventBus};
use wagemill_payroll::PayrollRunCompleted;

use super::cancel::CancelToken;
use super::config::{RunConfig, StreamingMode};
use super::error::BulkRunError;
use super::executor::{run_batch_concurrent, run_batch_sequential};
use super::outcome::{BulkRunReport, RunLedger};
use super::progress::{ProgressCallback, ProgressReporter};
use crate::directory::{DirectoryError, EmployeeCursor, EmployeeDirectory};
use crate::processor::UnitProcessor;

/// Where the batch loop pulls employee ids from.
///
/// `Materialized` holds the whole population; `Streamed` holds one page at a
/// time, bounding peak memory to O(batch_size).
enum PopulationSource {
    Materialized { ids: VecDeque<EmployeeId> },
    Streamed { cursor: Box<dyn EmployeeCursor> },
}

impl PopulationSource {
    async fn next_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<Option<Vec<EmployeeId>>, DirectoryError> {
        match self {
            PopulationSource::Materialized { ids } => {
                if ids.is_empty() {
                    return Ok(None);
                }
                let take = batch_size.min(ids.len());
                Ok(Some(ids.drain(..take).collect()))
            }
            PopulationSource::Streamed { cursor } => {
                let page = cursor.next_page(batch_size).await?;
                if page.is_empty() { Ok(None) } else { Ok(Some(page)) }
            }
        }
    }
}

/// Runs the unit processor across an organization's workforce.
///
/// One logical run per `run` call; batches are strictly sequential with at
/// most `concurrency` units in flight inside the current batch.
pub struct BulkPayrollRunner<D, P, B = InMemoryEventBus<PayrollRunCompleted>> {
    directory: Arc<D>,
    processor: Arc<P>,
    bus: Option<Arc<B>>,
}

impl<D, P> BulkPayrollRunner<D, P> {
    pub fn new(directory: Arc<D>, processor: Arc<P>) -> Self {
        Self {
            directory,
            processor,
            bus: None,
        }
    }
}

impl<D, P, B> BulkPayrollRunner<D, P, B> {
    /// Runner that publishes `PayrollRunCompleted` on the given bus after
    /// each normally-completed run.
    pub fn with_bus(directory: Arc<D>, processor: Arc<P>, bus: Arc<B>) -> Self {
        Self {
            directory,
            processor,
            bus: Some(bus),
        }
    }
}

impl<D, P, B> BulkPayrollRunner<D, P, B>
where
    D: EmployeeDirectory,
    P: UnitProcessor + 'static,
    B: EventBus<PayrollRunCompleted>,
{
    /// Run bulk payroll for one organization and period.
    ///
    /// An empty `employee_ids` means "all eligible employees"; explicit ids
    /// are processed in the order given. Unit failures are collected into
    /// the report; the run only errors on misconfiguration, a population
    /// source failure, or cancellation. Cancellation granularity is
    /// per-unit when `concurrency == 1` and per-batch otherwise: a batch
    /// already in flight runs to completion after an abort.
    pub async fn run(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
        employee_ids: Vec<EmployeeId>,
        config: RunConfig,
        on_progress: Option<ProgressCallback>,
        cancel: CancelToken,
    ) -> Result<BulkRunReport, BulkRunError> {
        config.validate()?;

        let (total, mut source) = self
            .resolve_population(organization_id, period, employee_ids, &config)
            .await?;
        info!(
            organization_id = %organization_id,
            period = %period,
            total,
            batch_size = config.batch_size,
            concurrency = config.concurrency,
            "starting bulk payroll run"
        );

        let mut ledger = RunLedger::new(total);
        let reporter = ProgressReporter::new(on_progress);

        let mut pending = source.next_batch(config.batch_size).await?;
        while let Some(batch) = pending {
            // Checkpoint: top of every batch, and (via the loop) right after
            // an inter-batch delay.
            if cancel.is_cancelled() {
                return Err(self.cancelled(&ledger));
            }

            if config.concurrency <= 1 {
                run_batch_sequential(
                    self.processor.as_ref(),
                    &batch,
                    period,
                    &mut ledger,
                    &reporter,
                    &cancel,
                )
                .await?;
            } else {
                let outcomes =
                    run_batch_concurrent(&self.processor, &batch, period, config.concurrency)
                        .await;
                for outcome in outcomes {
                    ledger.record(outcome);
                }
                reporter.report(ledger.snapshot(None)).await;
            }

            pending = source.next_batch(config.batch_size).await?;
            if pending.is_some() && !config.batch_delay.is_zero() {
                sleep(config.batch_delay).await;
            }
        }

        let report = ledger.into_report();
        self.publish_completion(organization_id, period, &report);
        info!(
            organization_id = %organization_id,
            period = %period,
            successful = report.successful.len(),
            failed = report.failed.len(),
            total_amount = %report.total_amount(),
            "bulk payroll run completed"
        );
        Ok(report)
    }

    /// Decide in-memory vs streaming and produce (total, source).
    async fn resolve_population(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
        employee_ids: Vec<EmployeeId>,
        config: &RunConfig,
    ) -> Result<(usize, PopulationSource), BulkRunError> {
        if !employee_ids.is_empty() {
            return Ok((
                employee_ids.len(),
                PopulationSource::Materialized {
                    ids: employee_ids.into(),
                },
            ));
        }

        let (stream, counted) = match config.streaming {
            StreamingMode::Enabled => (true, None),
            StreamingMode::Disabled => (false, None),
            StreamingMode::Auto => {
                let count = self
                    .directory
                    .count_eligible(organization_id, period)
                    .await?;
                (count >= config.streaming_threshold, Some(count))
            }
        };

        if stream {
            let total = match counted {
                Some(count) => count,
                None => {
                    self.directory
                        .count_eligible(organization_id, period)
                        .await?
                }
            };
            let cursor = self.directory.open_cursor(organization_id, period).await?;
            Ok((total, PopulationSource::Streamed { cursor }))
        } else {
            let ids = self
                .directory
                .list_eligible(organization_id, period)
                .await?;
            Ok((
                ids.len(),
                PopulationSource::Materialized { ids: ids.into() },
            ))
        }
    }

    fn cancelled(&self, ledger: &RunLedger) -> BulkRunError {
        BulkRunError::Cancelled {
            processed: ledger.processed(),
            successful: ledger.successful_count(),
            failed: ledger.failed_count(),
            total: ledger.total(),
        }
    }

    fn publish_completion(
        &self,
        organization_id: OrganizationId,
        period: PayPeriod,
        report: &BulkRunReport,
    ) {
        let Some(bus) = &self.bus else {
            return;
        };
        let event = PayrollRunCompleted {
            organization_id,
            period,
            totals: report.totals(),
            occurred_at: Utc::now(),
        };
        // Notification is best-effort; the report is the source of truth.
        if let Err(err) = bus.publish(event) {
            warn!(
                organization_id = %organization_id,
                period = %period,
                error = ?err,
                "failed to publish run completion event"
            );
        }
    }
}
