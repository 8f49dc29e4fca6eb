//! Infrastructure layer - External concerns and adapters
//!
//! This module reads bundle documents from files and strings and renders
//! check results for callers outside the process.

pub mod loader;
pub mod report;

pub use loader::DocumentLoader;
pub use report::ValidationReport;
