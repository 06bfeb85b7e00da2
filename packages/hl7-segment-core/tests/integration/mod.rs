//! Integration test suite.
//!
//! Tests are organized by concern:
//! 1. Field-table loading into a catalog
//! 2. Segment population workflows over real field tables
//! 3. Randomized store properties

pub mod catalog_tests;
pub mod segment_workflow_tests;
