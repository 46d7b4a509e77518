//! Event publishing/subscription abstraction (mechanics only).
//!
//! A lightweight pub/sub mechanism for distributing notifications to
//! consumers (loggers, notifiers, downstream workers). The bus is
//! intentionally minimal:
//!
//! - **Transport-agnostic**: in-memory channels here; a broker could
//!   implement the same trait.
//! - **At-least-once**: messages may be delivered more than once; consumers
//!   must be idempotent.
//! - **No persistence**: the bus distributes, it does not store. A payroll
//!   run's report is the source of truth; the `PayrollRunCompleted` message
//!   is a courtesy copy.

use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a message stream.
///
/// Each subscription receives a copy of every message published to the bus
/// (broadcast semantics). Subscriptions are designed for single-threaded
/// consumption; a typical consumer loops on [`Subscription::recv_timeout`] so
/// it can interleave shutdown checks.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// Publication must never block on slow consumers; implementations fan out
/// copies and move on. Delivery is at-least-once and a subscriber that has
/// gone away is silently dropped.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug;

    /// Publish a message to all current subscribers.
    fn publish(&self, message: M) -> Result<(), Self::Error>;

    /// Open a new subscription receiving all messages published after this call.
    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for std::sync::Arc<B>
where
    B: EventBus<M>,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
