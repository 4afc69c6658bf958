//! Unit tests for Sheetlytics.
//!
//! These tests cover individual components through the public API.

mod perf_tests;
mod snapshot_tests;
mod types_tests;
