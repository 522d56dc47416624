//! Olmsted: dependency-aware personal day-planning engine.
//!
//! This crate turns a flat snapshot of externally-sourced tasks into a
//! milestone hierarchy, filtered and sorted task queues, per-milestone
//! rollup summaries, and a greedy single-day schedule of focus blocks
//! that respects declared dependencies.
//!
//! # Architecture
//!
//! Olmsted follows hexagonal architecture principles:
//!
//! - **Domain**: Pure planning logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory store,
//!   upstream record normalization)
//!
//! Every planning pass is a pure function of one immutable task
//! snapshot, an injected reference time, and the request parameters;
//! the engine never mutates tasks and owns no state between passes.
//!
//! # Modules
//!
//! - [`task`]: Canonical task record model and the upstream source seam
//! - [`planner`]: Hierarchy, filtering, rollups, and the day scheduler

pub mod planner;
pub mod task;
