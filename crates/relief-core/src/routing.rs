//! Greedy delivery route assignment.
//!
//! This is a real-time heuristic, not an exact vehicle router. Each step
//! commits to the unassigned target that keeps the vehicle closest to home,
//! and a vehicle that cannot take the chosen target is sent home for good.

use crate::error::PlanError;
use crate::models::{FleetParams, GridCoord, Route, RoutePlan, UnservedReason, UnservedTarget};
use crate::spatial::planar_distance;
use tracing::{debug, info, warn};

/// Time cost of flying from one position to a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegTimes {
    /// Take off, fly to the candidate, land, and be ready to take off again.
    pub time_to_next: f64,
    /// As `time_to_next`, plus flying from the candidate back to the depot
    /// and landing there.
    pub time_to_home: f64,
}

pub fn leg_times(
    from: GridCoord,
    to: GridCoord,
    depot: GridCoord,
    fleet: &FleetParams,
) -> LegTimes {
    let outbound = planar_distance(from, to) / fleet.speed;
    let time_to_next =
        fleet.takeoff_time_s + outbound + fleet.landing_time_s + fleet.takeoff_time_s;
    LegTimes {
        time_to_next,
        time_to_home: time_to_next + return_time(to, depot, fleet),
    }
}

/// Flight back to the depot from a cell the vehicle has already taken off from.
pub fn return_time(from: GridCoord, depot: GridCoord, fleet: &FleetParams) -> f64 {
    planar_distance(from, depot) / fleet.speed + fleet.landing_time_s
}

/// Index and coordinate of the target minimizing `d(position, c) + d(c, depot)`.
/// Ties go to the lowest index.
fn closest_with_lookahead(
    position: GridCoord,
    remaining: &[GridCoord],
    depot: GridCoord,
) -> Option<(usize, GridCoord)> {
    let mut best: Option<(usize, GridCoord, f64)> = None;
    for (idx, candidate) in remaining.iter().copied().enumerate() {
        let score = planar_distance(position, candidate) + planar_distance(candidate, depot);
        if best.map_or(true, |(_, _, best_score)| score < best_score) {
            best = Some((idx, candidate, score));
        }
    }
    best.map(|(idx, candidate, _)| (idx, candidate))
}

struct OpenRoute {
    vehicle: usize,
    position: GridCoord,
    waypoints: Vec<GridCoord>,
    elapsed_s: f64,
}

impl OpenRoute {
    fn new(vehicle: usize, depot: GridCoord) -> Self {
        Self {
            vehicle,
            position: depot,
            waypoints: vec![depot],
            elapsed_s: 0.0,
        }
    }

    fn served(&self) -> usize {
        self.waypoints.len() - 1
    }

    fn visit(&mut self, coord: GridCoord, time_to_next: f64) {
        self.waypoints.push(coord);
        self.elapsed_s += time_to_next;
        self.position = coord;
    }

    /// Fly home. Routes that never left the depot are dropped.
    fn close(mut self, depot: GridCoord, fleet: &FleetParams) -> Option<Route> {
        if self.served() == 0 {
            return None;
        }
        self.elapsed_s += return_time(self.position, depot, fleet);
        self.waypoints.push(depot);
        Some(Route {
            vehicle: self.vehicle,
            waypoints: self.waypoints,
            elapsed_s: self.elapsed_s,
        })
    }
}

/// Partition landing coordinates into depot-to-depot routes.
///
/// No route carries more than `fleet.capacity` targets, and at every stop the
/// time already spent plus the time to fly home stays within
/// `fleet.max_flight_time_s`. Targets that cannot be assigned are returned in
/// [`RoutePlan::unserved`] rather than failing the whole plan.
pub fn assign_routes(
    targets: &[GridCoord],
    depot: GridCoord,
    fleet: &FleetParams,
) -> Result<RoutePlan, PlanError> {
    fleet.validate()?;
    let max_time = fleet.max_flight_time_s;

    let mut unserved = Vec::new();
    let mut remaining = Vec::with_capacity(targets.len());
    for &target in targets {
        let round_trip = leg_times(depot, target, depot, fleet).time_to_home;
        if round_trip > max_time {
            warn!(%target, round_trip, max_time, "target beyond flight range");
            unserved.push(UnservedTarget {
                coord: target,
                reason: UnservedReason::BeyondFlightRange,
            });
        } else {
            remaining.push(target);
        }
    }

    let mut routes = Vec::new();
    let mut vehicle = 0usize;
    let mut current = Some(OpenRoute::new(vehicle, depot));

    while let Some(route) = current.as_mut() {
        let Some((idx, candidate)) = closest_with_lookahead(route.position, &remaining, depot)
        else {
            break;
        };
        let leg = leg_times(route.position, candidate, depot, fleet);

        let full = route.served() >= fleet.capacity;
        let over_budget = route.elapsed_s + leg.time_to_home > max_time
            || route.elapsed_s + leg.time_to_next > max_time;

        if full || over_budget {
            debug!(
                vehicle,
                %candidate,
                full,
                over_budget,
                elapsed_s = route.elapsed_s,
                "closing route"
            );
            if let Some(closed) = current.take().and_then(|r| r.close(depot, fleet)) {
                routes.push(closed);
            }
            vehicle += 1;
            if vehicle < fleet.vehicle_count {
                current = Some(OpenRoute::new(vehicle, depot));
            }
            continue;
        }

        debug!(vehicle, %candidate, time_to_next = leg.time_to_next, "assigning target");
        route.visit(candidate, leg.time_to_next);
        remaining.remove(idx);
    }

    if let Some(closed) = current.and_then(|r| r.close(depot, fleet)) {
        routes.push(closed);
    }

    if !remaining.is_empty() {
        warn!(count = remaining.len(), "fleet exhausted before all targets were assigned");
    }
    unserved.extend(remaining.into_iter().map(|coord| UnservedTarget {
        coord,
        reason: UnservedReason::FleetExhausted,
    }));

    let plan = RoutePlan { routes, unserved };
    info!(
        routes = plan.routes.len(),
        served = plan.served_count(),
        unserved = plan.unserved.len(),
        "route assignment complete"
    );
    Ok(plan)
}
