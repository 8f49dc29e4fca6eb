//! Test suite for the event-sourcing configuration library
//!
//! This module provides:
//! - Scenario tests for each configuration section
//! - Property tests for the resolver
//! - Integration tests from document files to wiring plans
//! - Fixture documents shared by the suites

pub mod fixtures;
pub mod integration;
pub mod properties;

/// Test environment utilities
pub mod config {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize test environment
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter("debug")
                .with_test_writer()
                .try_init();
        });
    }
}

/// Test result type
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;
