//! Unit tests for the planning pipeline.
