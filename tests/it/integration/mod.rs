//! Integration tests for Sheetlytics.
//!
//! These tests drive the pipeline and the controller end-to-end, from an
//! upload through charts, insights, persistence and the admin view.

mod admin_workflow_tests;
mod persistence_workflow_tests;
mod pipeline_workflow_tests;
mod workbook_ingest_tests;
