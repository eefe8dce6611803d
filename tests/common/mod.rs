//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{csv_row, TestEnv, TEST_USER};
//!
//! #[test]
//! fn test_import() {
//!     let env = TestEnv::new();
//!     let csv = env.write_csv("one.csv", &[csv_row("WARP1", "Aphex Twin", "Xtal", "Warp", "Vinyl", "", "")]);
//!     let report = env.import(TEST_USER, &csv);
//!     assert_eq!(report.imported, 1);
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
pub use fixtures::{csv_row, CsvRow, TestEnv};
