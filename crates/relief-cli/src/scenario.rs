//! Scenario files and plan reports.
//!
//! A scenario is the externally classified terrain plus the people awaiting
//! supplies. Labels use the classifier's integer codes:
//!
//! ```json
//! {
//!   "labels": [[1, 0, -1], [0, 0, 1]],
//!   "elevations": [[0.0, 0.8, 0.0], [-1.2, 0.0, 0.0]],
//!   "targets": [[1, 0]],
//!   "depot": [0, 0],
//!   "fleet": { "capacity": 3 }
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use relief_core::{CellLabel, DeliveryPlan, FleetParams, GridCoord, PlanError, TerrainGrid};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub labels: Vec<Vec<CellLabel>>,
    /// Flat ground is assumed when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevations: Option<Vec<Vec<f64>>>,
    pub targets: Vec<GridCoord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depot: Option<GridCoord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet: Option<FleetOverrides>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    pub fn grid(&self) -> Result<TerrainGrid, PlanError> {
        match &self.elevations {
            Some(elevations) => TerrainGrid::new(self.labels.clone(), elevations.clone()),
            None => TerrainGrid::flat(self.labels.clone()),
        }
    }
}

/// Partial fleet parameters; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetOverrides {
    pub speed: Option<f64>,
    pub takeoff_time_s: Option<f64>,
    pub landing_time_s: Option<f64>,
    pub max_flight_time_s: Option<f64>,
    pub capacity: Option<usize>,
    pub vehicle_count: Option<usize>,
}

impl FleetOverrides {
    pub fn apply(&self, fleet: &mut FleetParams) {
        if let Some(speed) = self.speed {
            fleet.speed = speed;
        }
        if let Some(takeoff) = self.takeoff_time_s {
            fleet.takeoff_time_s = takeoff;
        }
        if let Some(landing) = self.landing_time_s {
            fleet.landing_time_s = landing;
        }
        if let Some(max_flight) = self.max_flight_time_s {
            fleet.max_flight_time_s = max_flight;
        }
        if let Some(capacity) = self.capacity {
            fleet.capacity = capacity;
        }
        if let Some(vehicles) = self.vehicle_count {
            fleet.vehicle_count = vehicles;
        }
    }
}

/// Output document of a planning run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub cols: usize,
    pub depot: GridCoord,
    pub fleet: FleetParams,
    pub plan: DeliveryPlan,
}

impl PlanReport {
    pub fn new(
        grid: &TerrainGrid,
        depot: GridCoord,
        fleet: FleetParams,
        plan: DeliveryPlan,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            rows: grid.rows(),
            cols: grid.cols(),
            depot,
            fleet,
            plan,
        }
    }
}
