//! CLI command handlers for the countertop site.
//!
//! This module provides headless access to the estimator for scripting and
//! for checking a pricing document before it is deployed.

pub mod common;
pub mod estimate;
pub mod materials;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use estimate::EstimateArgs;
pub use materials::MaterialsArgs;
