//! Task record model and upstream source boundary for Olmsted.
//!
//! Tasks are immutable snapshots produced fresh on every planning pass
//! by an external adapter; the planner only reads them. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
