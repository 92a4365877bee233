//! Integration test suite.
//!
//! Tests are organized by concern:
//! 1. Person table scenarios
//! 2. JSON streaming through files
//! 3. Index consistency under random mutations
//! 4. Bulk feeding
//! 5. Shared catalog access

pub mod database_tests;
pub mod feeder_tests;
pub mod helpers;
pub mod index_consistency_tests;
pub mod scenario_tests;
