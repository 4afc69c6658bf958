//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep link time down.
//!
//! Structure:
//! - helpers: Dataset builders, fixtures and a scripted parser
//! - integration: Multi-component workflow tests
//! - unit: Single-component tests against the public API

mod helpers;
mod integration;
mod unit;
