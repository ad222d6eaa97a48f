//! Grid geometry for landing-zone search and route timing.

use crate::models::{GridCoord, TerrainGrid};

/// King-move offsets in the fixed enumeration order used by the search.
///
/// Equal-cost ties are resolved by discovery order, so this order is part of
/// the search result.
pub const KING_MOVES: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (1, 1),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

/// Offset a coordinate, returning `None` if the result leaves the grid.
pub fn offset(
    coord: GridCoord,
    (d_row, d_col): (isize, isize),
    rows: usize,
    cols: usize,
) -> Option<GridCoord> {
    let row = coord.row.checked_add_signed(d_row)?;
    let col = coord.col.checked_add_signed(d_col)?;
    (row < rows && col < cols).then_some(GridCoord::new(row, col))
}

/// In-bounds 8-connected neighbours of `coord`, in [`KING_MOVES`] order.
pub fn king_neighbours(
    grid: &TerrainGrid,
    coord: GridCoord,
) -> impl Iterator<Item = GridCoord> + '_ {
    let (rows, cols) = (grid.rows(), grid.cols());
    KING_MOVES
        .iter()
        .filter_map(move |delta| offset(coord, *delta, rows, cols))
}

/// Straight-line distance between two cells in grid units.
pub fn planar_distance(a: GridCoord, b: GridCoord) -> f64 {
    let dr = a.row as f64 - b.row as f64;
    let dc = a.col as f64 - b.col as f64;
    dr.hypot(dc)
}

/// Walking cost between two cells.
///
/// 3-D Euclidean distance with each endpoint's z taken as the *absolute*
/// elevation of its cell. A pit and a mound of equal magnitude therefore
/// cost the same as flat ground between them. Route-time estimates
/// downstream depend on this exact metric.
pub fn edge_cost(grid: &TerrainGrid, from: GridCoord, to: GridCoord) -> f64 {
    let dz = grid.elevation(from).abs() - grid.elevation(to).abs();
    planar_distance(from, to).hypot(dz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellLabel;

    fn flat_grid(rows: usize, cols: usize) -> TerrainGrid {
        TerrainGrid::flat(vec![vec![CellLabel::Landable; cols]; rows]).unwrap()
    }

    #[test]
    fn corner_has_three_neighbours() {
        let grid = flat_grid(3, 3);
        let neighbours: Vec<_> = king_neighbours(&grid, GridCoord::new(0, 0)).collect();
        assert_eq!(
            neighbours,
            vec![GridCoord::new(1, 0), GridCoord::new(0, 1), GridCoord::new(1, 1)]
        );
    }

    #[test]
    fn centre_has_eight_neighbours_in_fixed_order() {
        let grid = flat_grid(3, 3);
        let neighbours: Vec<_> = king_neighbours(&grid, GridCoord::new(1, 1)).collect();
        assert_eq!(neighbours.len(), 8);
        assert_eq!(neighbours[0], GridCoord::new(2, 1));
        assert_eq!(neighbours[7], GridCoord::new(2, 0));
        assert!(!neighbours.contains(&GridCoord::new(1, 1)));
    }

    #[test]
    fn planar_distance_is_euclidean() {
        let d = planar_distance(GridCoord::new(0, 0), GridCoord::new(3, 4));
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(planar_distance(GridCoord::new(2, 2), GridCoord::new(2, 2)), 0.0);
    }

    #[test]
    fn edge_cost_uses_absolute_elevations() {
        let labels = vec![vec![CellLabel::Landable; 3]];
        let grid = TerrainGrid::new(labels, vec![vec![0.8, -0.8, -1.2]]).unwrap();

        // |0.8| == |-0.8|: pit next to mound is flat ground.
        let flat = edge_cost(&grid, GridCoord::new(0, 0), GridCoord::new(0, 1));
        assert!((flat - 1.0).abs() < 1e-12);

        let climb = edge_cost(&grid, GridCoord::new(0, 1), GridCoord::new(0, 2));
        assert!((climb - (1.0f64 + 0.4 * 0.4).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn huge_elevation_step_stays_finite() {
        let labels = vec![vec![CellLabel::Landable; 2]];
        let grid = TerrainGrid::new(labels, vec![vec![0.0, -1e200]]).unwrap();

        let cost = edge_cost(&grid, GridCoord::new(0, 0), GridCoord::new(0, 1));
        assert!(cost.is_finite());
        assert!((cost / 1e200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_step_costs_root_two() {
        let grid = flat_grid(2, 2);
        let cost = edge_cost(&grid, GridCoord::new(0, 0), GridCoord::new(1, 1));
        assert!((cost - std::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
