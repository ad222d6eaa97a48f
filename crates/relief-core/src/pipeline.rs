//! End-to-end delivery planning: one landing-zone search per target, then a
//! single route assignment over the landing cells.

use crate::error::PlanError;
use crate::landing::find_landing_zone;
use crate::models::{DeliveryPlan, FleetParams, GridCoord, TargetLanding, TerrainGrid};
use crate::routing::assign_routes;
use rayon::prelude::*;
use tracing::{info, warn};

/// Plan deliveries for every target on `grid`.
///
/// All inputs are validated before any search runs. Searches share the grid
/// read-only and run in parallel; routing starts once every search is done.
pub fn plan_deliveries(
    grid: &TerrainGrid,
    targets: &[GridCoord],
    depot: GridCoord,
    fleet: &FleetParams,
) -> Result<DeliveryPlan, PlanError> {
    fleet.validate()?;
    for &target in targets {
        grid.check_target(target)?;
    }

    info!(
        rows = grid.rows(),
        cols = grid.cols(),
        landable = grid.landable_count(),
        targets = targets.len(),
        "searching landing zones"
    );

    let landings = targets
        .par_iter()
        .map(|&target| {
            find_landing_zone(grid, target).map(|search| TargetLanding { target, search })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut no_landing_zone = Vec::new();
    let mut landing_cells = Vec::with_capacity(landings.len());
    for landing in &landings {
        match landing.search.landing_cell() {
            Some(cell) => landing_cells.push(cell),
            None => {
                warn!(target = %landing.target, "no landing zone reachable on foot");
                no_landing_zone.push(landing.target);
            }
        }
    }

    let routes = assign_routes(&landing_cells, depot, fleet)?;

    Ok(DeliveryPlan {
        landings,
        no_landing_zone,
        routes,
    })
}
