//! Planning runs over generated scenarios.

use relief_cli::{generate_scenario, Config, FleetOverrides, PlanReport};
use relief_core::{plan_deliveries, CellLabel, FleetParams, GridCoord};

#[test]
fn generated_scenarios_always_plan() {
    for seed in 0..20 {
        let scenario = generate_scenario(9, 11, 5, seed);
        let grid = scenario.grid().unwrap();
        let depot = scenario.depot.unwrap();

        let plan = plan_deliveries(&grid, &scenario.targets, depot, &FleetParams::default())
            .expect("generated targets are valid");

        assert_eq!(plan.landings.len(), scenario.targets.len());
        assert_eq!(
            plan.routes.served_count() + plan.routes.unserved.len() + plan.no_landing_zone.len(),
            scenario.targets.len()
        );
        for landing in &plan.landings {
            if let Some(cell) = landing.search.landing_cell() {
                assert_eq!(grid.label(cell), CellLabel::Landable);
            } else {
                assert!(plan.no_landing_zone.contains(&landing.target));
            }
        }
    }
}

#[test]
fn report_round_trips_through_json() {
    let mut scenario = generate_scenario(5, 5, 2, 3);
    scenario.fleet = Some(FleetOverrides {
        capacity: Some(1),
        ..FleetOverrides::default()
    });

    let mut fleet = Config::from_env().fleet;
    if let Some(overrides) = &scenario.fleet {
        overrides.apply(&mut fleet);
    }
    assert_eq!(fleet.capacity, 1);

    let grid = scenario.grid().unwrap();
    let depot = GridCoord::new(0, 0);
    let plan = plan_deliveries(&grid, &scenario.targets, depot, &fleet).unwrap();
    let report = PlanReport::new(&grid, depot, fleet, plan);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["rows"], 5);
    assert_eq!(json["fleet"]["capacity"], 1);
    assert!(json["generated_at"].is_string());

    let scenario_json = serde_json::to_string(&scenario).unwrap();
    let reparsed: relief_cli::Scenario = serde_json::from_str(&scenario_json).unwrap();
    assert_eq!(reparsed.targets, scenario.targets);
    assert_eq!(reparsed.labels, scenario.labels);
}
