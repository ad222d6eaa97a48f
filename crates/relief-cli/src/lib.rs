//! Relief CLI - command line tools for planning UAV relief deliveries.
//!
//! This crate provides the `relief-plan` binary and the pieces it is built
//! from: environment configuration, the JSON scenario format and a synthetic
//! scenario generator.

pub mod config;
pub mod scenario;
pub mod sim;

pub use config::Config;
pub use scenario::{FleetOverrides, PlanReport, Scenario};
pub use sim::generate_scenario;
