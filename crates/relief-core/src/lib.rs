//! Relief Core - landing-zone search and delivery route assignment for
//! supply-carrying UAVs over a classified terrain grid.

pub mod error;
pub mod landing;
pub mod models;
pub mod pipeline;
pub mod routing;
pub mod spatial;

pub use error::PlanError;
pub use landing::find_landing_zone;
pub use models::{
    CellLabel, DeliveryPlan, FleetParams, GridCoord, PathResult, Route, RoutePlan, TargetLanding,
    TerrainGrid, UnservedReason, UnservedTarget,
};
pub use pipeline::plan_deliveries;
pub use routing::{assign_routes, leg_times, return_time, LegTimes};
pub use spatial::{edge_cost, king_neighbours, planar_distance, KING_MOVES};
