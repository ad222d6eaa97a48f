//! Delivery planning integration tests.
//!
//! Exercises the public API end to end: terrain in, routes out.

use relief_core::{
    find_landing_zone, plan_deliveries, CellLabel, FleetParams, GridCoord, PlanError,
    TerrainGrid, UnservedReason,
};

const L: i8 = 1;
const P: i8 = 0;
const B: i8 = -1;

fn terrain(codes: &[&[i8]], elevations: &[&[f64]]) -> TerrainGrid {
    let labels = codes
        .iter()
        .map(|row| {
            row.iter()
                .map(|code| CellLabel::try_from(*code).unwrap())
                .collect()
        })
        .collect();
    let elevations = elevations.iter().map(|row| row.to_vec()).collect();
    TerrainGrid::new(labels, elevations).unwrap()
}

fn field() -> TerrainGrid {
    terrain(
        &[
            &[L, L, P, P, B, P, P, L],
            &[L, P, P, B, B, P, P, P],
            &[P, P, P, B, P, P, B, P],
            &[B, B, P, P, P, P, B, P],
            &[P, P, P, B, B, P, P, L],
            &[P, B, P, P, B, B, P, P],
        ],
        &[
            &[0.0, 0.0, 0.8, 0.0, 0.0, -1.2, 0.0, 0.0],
            &[0.0, -1.2, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0],
            &[0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.2],
            &[0.0, 0.0, 0.0, -1.2, 0.8, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.8, 0.0],
            &[-1.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ],
    )
}

#[test]
fn every_target_gets_a_walkable_landing_path() {
    let grid = field();
    let targets = [
        GridCoord::new(5, 0),
        GridCoord::new(3, 4),
        GridCoord::new(2, 5),
        GridCoord::new(5, 7),
    ];
    let plan = plan_deliveries(&grid, &targets, GridCoord::new(0, 0), &FleetParams::default())
        .expect("valid input");

    assert!(plan.no_landing_zone.is_empty());
    for landing in &plan.landings {
        let path = &landing.search.path;
        assert_eq!(path.first(), Some(&landing.target));
        assert_eq!(grid.label(*path.last().unwrap()), CellLabel::Landable);
        assert!(path.iter().all(|c| grid.label(*c) != CellLabel::Blocked));
        for pair in path.windows(2) {
            assert!(pair[0].row.abs_diff(pair[1].row) <= 1);
            assert!(pair[0].col.abs_diff(pair[1].col) <= 1);
        }
        assert!(landing.search.cost >= 0.0);
    }
}

#[test]
fn pipeline_conserves_targets() {
    let grid = field();
    let targets: Vec<GridCoord> = (0..grid.rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| GridCoord::new(row, col)))
        .filter(|coord| grid.label(*coord) != CellLabel::Blocked)
        .collect();
    let fleet = FleetParams {
        speed: 0.5,
        takeoff_time_s: 3.0,
        landing_time_s: 4.0,
        max_flight_time_s: 90.0,
        capacity: 3,
        vehicle_count: 4,
    };

    let plan = plan_deliveries(&grid, &targets, GridCoord::new(0, 0), &fleet).unwrap();
    let routed = plan.routes.served_count();
    assert_eq!(
        routed + plan.routes.unserved.len() + plan.no_landing_zone.len(),
        targets.len()
    );
    assert!(plan.routes.routes.len() <= fleet.vehicle_count);
    for route in &plan.routes.routes {
        assert!(route.targets().len() <= fleet.capacity);
        assert!(route.elapsed_s <= fleet.max_flight_time_s + 1e-9);
    }
    assert!(plan
        .routes
        .unserved
        .iter()
        .any(|u| u.reason == UnservedReason::FleetExhausted));
}

#[test]
fn searches_agree_with_direct_calls() {
    let grid = field();
    let targets = [GridCoord::new(4, 2), GridCoord::new(1, 6)];
    let plan = plan_deliveries(&grid, &targets, GridCoord::new(0, 0), &FleetParams::default())
        .unwrap();
    for landing in &plan.landings {
        let direct = find_landing_zone(&grid, landing.target).unwrap();
        assert_eq!(direct, landing.search);
    }
}

#[test]
fn malformed_grid_fails_fast() {
    let labels = vec![vec![CellLabel::Landable; 3]; 2];
    let elevations = vec![vec![0.0; 3]; 3];
    assert!(matches!(
        TerrainGrid::new(labels, elevations),
        Err(PlanError::ShapeMismatch { .. })
    ));

    let grid = field();
    let err = plan_deliveries(
        &grid,
        &[GridCoord::new(9, 9)],
        GridCoord::new(0, 0),
        &FleetParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::OutOfBounds { rows: 6, cols: 8, .. }));
}

#[test]
fn plan_serializes_to_json() {
    let grid = field();
    let plan = plan_deliveries(
        &grid,
        &[GridCoord::new(2, 1)],
        GridCoord::new(0, 0),
        &FleetParams::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["routes"]["routes"][0]["waypoints"][0], serde_json::json!([0, 0]));
    assert_eq!(json["landings"][0]["target"], serde_json::json!([2, 1]));
}
