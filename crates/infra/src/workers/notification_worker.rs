//! Notification worker: drains run events off the bus for logging/alerting
//! collaborators.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use wagemill_core::OrganizationId;
use wagemill_events::{EventBus, OrganizationScoped, Subscription};

/// Handle to control and join a background worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Generic notification worker loop.
///
/// - Subscribes to an event bus
/// - Invokes the handler for each message (handler must be idempotent;
///   delivery is at-least-once)
/// - Supports graceful shutdown
/// - Optional organization pinning: messages for other organizations are
///   ignored
#[derive(Debug)]
pub struct NotificationWorker;

impl NotificationWorker {
    /// Spawn a worker thread that processes messages from the bus subscription.
    pub fn spawn<M, B, H, E>(
        name: &'static str,
        bus: B,
        organization_id: Option<OrganizationId>,
        mut handler: H,
    ) -> WorkerHandle
    where
        M: OrganizationScoped + Send + 'static,
        B: EventBus<M> + Send + Sync + 'static,
        H: FnMut(M) -> Result<(), E> + Send + 'static,
        E: core::fmt::Debug + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let subscription: Subscription<M> = bus.subscribe();

        let join = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                worker_loop(name, subscription, shutdown_rx, organization_id, &mut handler)
            })
            .expect("failed to spawn notification worker thread");

        WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        }
    }
}

fn worker_loop<M, H, E>(
    name: &'static str,
    subscription: Subscription<M>,
    shutdown_rx: mpsc::Receiver<()>,
    organization_id: Option<OrganizationId>,
    handler: &mut H,
) where
    M: OrganizationScoped,
    H: FnMut(M) -> Result<(), E>,
    E: core::fmt::Debug,
{
    let tick = Duration::from_millis(250);

    loop {
        // Shutdown check (non-blocking)
        if shutdown_rx.try_recv().is_ok() {
            break;
        }

        match subscription.recv_timeout(tick) {
            Ok(message) => {
                if let Some(org) = organization_id {
                    if message.organization_id() != org {
                        // Pinned worker: ignore other organizations.
                        continue;
                    }
                }

                if let Err(err) = handler(message) {
                    warn!(worker = name, error = ?err, "notification handler failed");
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}
