//! `wagemill-events` — event mechanics (no business rules).
//!
//! The `Event` trait plus a transport-agnostic pub/sub bus. Domain crates
//! define the event types; infrastructure chooses the transport.

pub mod bus;
pub mod event;
pub mod in_memory_bus;
pub mod scoped;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use scoped::OrganizationScoped;
