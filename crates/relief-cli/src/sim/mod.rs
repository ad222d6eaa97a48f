//! Synthetic scenario generation.
//!
//! Stands in for the aerial classifier and depth estimator when exercising
//! the planner without real imagery.

mod terrain;

pub use terrain::{generate_scenario, TerrainOption, PERSON_OPTIONS, TERRAIN_OPTIONS};
