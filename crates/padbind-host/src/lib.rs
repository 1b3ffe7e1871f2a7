//! padbind-host library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and any frontend binary share the same module tree.

pub mod application;
pub mod infrastructure;
pub mod logging;
