//! Core data models for relief delivery planning.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terrain classification of a single grid cell.
///
/// Serialized as the classifier's integer code so label grids produced
/// upstream can be loaded as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum CellLabel {
    /// A vehicle may set down here (and a person can reach it).
    Landable,
    /// A person can walk here but a vehicle may not land.
    PersonReachableOnly,
    /// Neither a person nor a vehicle can occupy the cell.
    Blocked,
}

impl CellLabel {
    pub const LANDABLE_CODE: i8 = 1;
    pub const PERSON_REACHABLE_ONLY_CODE: i8 = 0;
    pub const BLOCKED_CODE: i8 = -1;

    pub fn can_land(self) -> bool {
        self == CellLabel::Landable
    }

    /// Whether a person can stand on or walk through the cell.
    pub fn is_passable(self) -> bool {
        matches!(self, CellLabel::Landable | CellLabel::PersonReachableOnly)
    }

    pub fn code(self) -> i8 {
        match self {
            CellLabel::Landable => Self::LANDABLE_CODE,
            CellLabel::PersonReachableOnly => Self::PERSON_REACHABLE_ONLY_CODE,
            CellLabel::Blocked => Self::BLOCKED_CODE,
        }
    }
}

impl TryFrom<i8> for CellLabel {
    type Error = PlanError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            Self::LANDABLE_CODE => Ok(CellLabel::Landable),
            Self::PERSON_REACHABLE_ONLY_CODE => Ok(CellLabel::PersonReachableOnly),
            Self::BLOCKED_CODE => Ok(CellLabel::Blocked),
            other => Err(PlanError::InvalidLabel(other)),
        }
    }
}

impl From<CellLabel> for i8 {
    fn from(label: CellLabel) -> Self {
        label.code()
    }
}

/// A (row, col) position on the terrain grid. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct GridCoord {
    pub row: usize,
    pub col: usize,
}

impl GridCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<GridCoord> for (usize, usize) {
    fn from(coord: GridCoord) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Immutable classified terrain with a co-indexed elevation map.
///
/// Elevation is signed: negative values are pits, positive values are mounds,
/// both relative to nominal ground. Cells are stored row-major.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    rows: usize,
    cols: usize,
    labels: Vec<CellLabel>,
    elevations: Vec<f64>,
}

impl TerrainGrid {
    /// Build a grid from row-major nested label and elevation arrays.
    pub fn new(labels: Vec<Vec<CellLabel>>, elevations: Vec<Vec<f64>>) -> Result<Self, PlanError> {
        let rows = labels.len();
        let cols = labels.first().map(|row| row.len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(PlanError::EmptyGrid);
        }
        for (row, cells) in labels.iter().enumerate() {
            if cells.len() != cols {
                return Err(PlanError::RaggedGrid {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }

        let elev_cols = elevations.first().map(|row| row.len()).unwrap_or(0);
        if elevations.len() != rows || elev_cols != cols {
            return Err(PlanError::ShapeMismatch {
                labels: (rows, cols),
                elevations: (elevations.len(), elev_cols),
            });
        }
        for (row, cells) in elevations.iter().enumerate() {
            if cells.len() != cols {
                return Err(PlanError::RaggedGrid {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
            if let Some(col) = cells.iter().position(|value| !value.is_finite()) {
                return Err(PlanError::NonFiniteElevation {
                    coord: GridCoord::new(row, col),
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            labels: labels.into_iter().flatten().collect(),
            elevations: elevations.into_iter().flatten().collect(),
        })
    }

    /// Build a grid where every cell sits at nominal ground level.
    pub fn flat(labels: Vec<Vec<CellLabel>>) -> Result<Self, PlanError> {
        let elevations = labels.iter().map(|row| vec![0.0; row.len()]).collect();
        Self::new(labels, elevations)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.labels.len()
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Canonical dense index of an in-bounds coordinate.
    pub fn index(&self, coord: GridCoord) -> usize {
        coord.row * self.cols + coord.col
    }

    pub fn coord(&self, index: usize) -> GridCoord {
        GridCoord::new(index / self.cols, index % self.cols)
    }

    /// Label of an in-bounds coordinate.
    pub fn label(&self, coord: GridCoord) -> CellLabel {
        self.labels[self.index(coord)]
    }

    /// Elevation of an in-bounds coordinate.
    pub fn elevation(&self, coord: GridCoord) -> f64 {
        self.elevations[self.index(coord)]
    }

    pub fn label_at(&self, index: usize) -> CellLabel {
        self.labels[index]
    }

    /// Reject coordinates that are out of bounds or on blocked terrain.
    pub fn check_target(&self, coord: GridCoord) -> Result<(), PlanError> {
        if !self.contains(coord) {
            return Err(PlanError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.label(coord).is_passable() {
            return Err(PlanError::BlockedSource { coord });
        }
        Ok(())
    }

    pub fn landable_count(&self) -> usize {
        self.labels.iter().filter(|label| label.can_land()).count()
    }
}

/// Fleet-wide vehicle performance and payload limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetParams {
    /// Cruise speed in grid cells per second.
    pub speed: f64,
    pub takeoff_time_s: f64,
    pub landing_time_s: f64,
    /// Maximum time a vehicle may be away from the depot.
    pub max_flight_time_s: f64,
    /// Maximum number of targets served in one outbound trip.
    pub capacity: usize,
    pub vehicle_count: usize,
}

impl Default for FleetParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            takeoff_time_s: 5.0,
            landing_time_s: 5.0,
            max_flight_time_s: 600.0,
            capacity: 2,
            vehicle_count: 3,
        }
    }
}

impl FleetParams {
    pub fn validate(&self) -> Result<(), PlanError> {
        let reals = [
            ("speed", self.speed),
            ("takeoff_time_s", self.takeoff_time_s),
            ("landing_time_s", self.landing_time_s),
            ("max_flight_time_s", self.max_flight_time_s),
        ];
        for (name, value) in reals {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidFleetParam { name, value });
            }
        }
        if self.capacity == 0 {
            return Err(PlanError::InvalidFleetParam {
                name: "capacity",
                value: 0.0,
            });
        }
        if self.vehicle_count == 0 {
            return Err(PlanError::InvalidFleetParam {
                name: "vehicle_count",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Outcome of a landing-zone search from one source cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Source first, chosen landing cell last. Empty when unreachable.
    pub path: Vec<GridCoord>,
    /// Cumulative traversal cost, or -1 when unreachable.
    pub cost: f64,
    #[serde(default)]
    pub cells_visited: usize,
}

impl PathResult {
    pub const UNREACHABLE_COST: f64 = -1.0;

    pub fn unreachable(cells_visited: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: Self::UNREACHABLE_COST,
            cells_visited,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn landing_cell(&self) -> Option<GridCoord> {
        self.path.last().copied()
    }
}

/// One vehicle's sortie: depot, served landing cells, depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub vehicle: usize,
    pub waypoints: Vec<GridCoord>,
    /// Total time from first takeoff to final landing at the depot.
    pub elapsed_s: f64,
}

impl Route {
    /// Landing cells served by this route, excluding the depot endpoints.
    pub fn targets(&self) -> &[GridCoord] {
        if self.waypoints.len() < 2 {
            return &[];
        }
        &self.waypoints[1..self.waypoints.len() - 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnservedReason {
    /// A direct round trip from the depot alone exceeds the flight-time budget.
    BeyondFlightRange,
    /// Every vehicle was used before this target could be assigned.
    FleetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnservedTarget {
    pub coord: GridCoord,
    pub reason: UnservedReason,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    pub routes: Vec<Route>,
    pub unserved: Vec<UnservedTarget>,
}

impl RoutePlan {
    pub fn served_count(&self) -> usize {
        self.routes.iter().map(|route| route.targets().len()).sum()
    }
}

/// A target and the landing cell chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetLanding {
    pub target: GridCoord,
    pub search: PathResult,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeliveryPlan {
    pub landings: Vec<TargetLanding>,
    /// Targets with no landable cell reachable on foot.
    pub no_landing_zone: Vec<GridCoord>,
    pub routes: RoutePlan,
}
