//! Planning pipeline for Olmsted.
//!
//! One planning pass runs four stages over an immutable task snapshot:
//! hierarchy building, filtering and sorting, rollup aggregation, and
//! greedy day scheduling. Each stage is a pure function of its inputs
//! and an explicit reference time; the [`services`] facade wires the
//! stages to the task source port and an injected clock.
//!
//! - Pure pipeline stages in [`domain`]
//! - Orchestration in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
