//! Infrastructure layer: population sources, unit processing, the bulk
//! payroll engine, and background workers.
//!
//! Domain crates stay synchronous and pure; everything async lives here.

pub mod bulk;
pub mod directory;
pub mod ledger;
pub mod processor;
pub mod workers;
