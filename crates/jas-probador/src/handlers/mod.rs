//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod catalog;
pub mod resolve;
pub mod run;

pub use catalog::execute_catalog;
pub use resolve::{execute_resolve, resolve_locator};
pub use run::{build_config, execute_run};
