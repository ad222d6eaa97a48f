//! Random terrain and person placement.

use crate::scenario::Scenario;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relief_core::{CellLabel, GridCoord};

/// One kind of ground patch the classifier can report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainOption {
    pub name: &'static str,
    pub label: CellLabel,
    /// Estimated elevation relative to nominal ground.
    pub elevation: f64,
}

const MOUND: f64 = 0.8;
const PIT: f64 = -1.2;

pub const TERRAIN_OPTIONS: [TerrainOption; 9] = [
    TerrainOption {
        name: "grass",
        label: CellLabel::Landable,
        elevation: 0.0,
    },
    TerrainOption {
        name: "grass_mound",
        label: CellLabel::Landable,
        elevation: MOUND,
    },
    TerrainOption {
        name: "grass_pit",
        label: CellLabel::Landable,
        elevation: PIT,
    },
    TerrainOption {
        name: "tall_grass",
        label: CellLabel::PersonReachableOnly,
        elevation: 0.0,
    },
    TerrainOption {
        name: "tall_grass_mound",
        label: CellLabel::PersonReachableOnly,
        elevation: MOUND,
    },
    TerrainOption {
        name: "tall_grass_pit",
        label: CellLabel::PersonReachableOnly,
        elevation: PIT,
    },
    TerrainOption {
        name: "tree",
        label: CellLabel::Blocked,
        elevation: 0.0,
    },
    TerrainOption {
        name: "tree_mound",
        label: CellLabel::Blocked,
        elevation: MOUND,
    },
    TerrainOption {
        name: "tree_pit",
        label: CellLabel::Blocked,
        elevation: PIT,
    },
];

/// A person's cell is never landable: the vehicle must not set down on them.
pub const PERSON_OPTIONS: [TerrainOption; 3] = [
    TerrainOption {
        name: "person",
        label: CellLabel::PersonReachableOnly,
        elevation: 0.0,
    },
    TerrainOption {
        name: "person_mound",
        label: CellLabel::PersonReachableOnly,
        elevation: MOUND,
    },
    TerrainOption {
        name: "person_pit",
        label: CellLabel::PersonReachableOnly,
        elevation: PIT,
    },
];

/// Generate a `rows` x `cols` scenario with `people` targets on distinct cells.
///
/// The same seed always yields the same scenario. `people` is capped at the
/// number of cells. The depot is the top-left corner.
pub fn generate_scenario(rows: usize, cols: usize, people: usize, seed: u64) -> Scenario {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut labels = vec![vec![CellLabel::Blocked; cols]; rows];
    let mut elevations = vec![vec![0.0; cols]; rows];
    for row in 0..rows {
        for col in 0..cols {
            let option = TERRAIN_OPTIONS[rng.random_range(0..TERRAIN_OPTIONS.len())];
            labels[row][col] = option.label;
            elevations[row][col] = option.elevation;
        }
    }

    let cells = rows * cols;
    let people = people.min(cells);
    let mut targets: Vec<GridCoord> = rand::seq::index::sample(&mut rng, cells, people)
        .into_iter()
        .map(|idx| GridCoord::new(idx / cols, idx % cols))
        .collect();
    targets.sort();

    for target in &targets {
        let option = PERSON_OPTIONS[rng.random_range(0..PERSON_OPTIONS.len())];
        labels[target.row][target.col] = option.label;
        elevations[target.row][target.col] = option.elevation;
    }

    Scenario {
        labels,
        elevations: Some(elevations),
        targets,
        depot: Some(GridCoord::new(0, 0)),
        fleet: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_scenario() {
        let a = generate_scenario(7, 7, 3, 42);
        let b = generate_scenario(7, 7, 3, 42);
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.elevations, b.elevations);
        assert_eq!(a.targets, b.targets);
    }

    #[test]
    fn people_stand_on_distinct_walkable_cells() {
        let scenario = generate_scenario(10, 6, 12, 7);
        let grid = scenario.grid().unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 6);

        let mut targets = scenario.targets.clone();
        targets.dedup();
        assert_eq!(targets.len(), 12);
        for target in &targets {
            assert_eq!(grid.label(*target), CellLabel::PersonReachableOnly);
            assert!(grid.check_target(*target).is_ok());
        }
    }

    #[test]
    fn people_capped_at_cell_count() {
        let scenario = generate_scenario(2, 2, 10, 1);
        assert_eq!(scenario.targets.len(), 4);
    }

    #[test]
    fn elevations_come_from_known_options() {
        let scenario = generate_scenario(8, 8, 0, 99);
        for row in scenario.elevations.unwrap() {
            for value in row {
                assert!([0.0, MOUND, PIT].contains(&value));
            }
        }
    }
}
