//! Landing-zone search.
//!
//! Finds the cheapest cell a vehicle can land on that a person standing at the
//! source can walk to. Walking is restricted to person-reachable cells and
//! priced by [`edge_cost`], so a nearby landing cell across a steep pit may
//! lose to a farther one on level ground.

use crate::error::PlanError;
use crate::models::{GridCoord, PathResult, TerrainGrid};
use crate::spatial::{edge_cost, king_neighbours};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Per-cell search state, indexed by the grid's dense cell index.
#[derive(Debug, Clone, Copy)]
struct CellRecord {
    distance: f64,
    prev: Option<usize>,
    can_land: bool,
    finalized: bool,
}

impl Default for CellRecord {
    fn default() -> Self {
        Self {
            distance: f64::INFINITY,
            prev: None,
            can_land: false,
            finalized: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenCell {
    distance: FloatOrd,
    seq: u64,
    index: usize,
}

impl PartialOrd for OpenCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenCell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.seq.cmp(&other.seq))
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Find the minimum-cost walk from `source` to a landable cell.
///
/// Returns the sentinel [`PathResult::unreachable`] when no landable cell can
/// be reached. A source outside the grid or on a blocked cell is an error.
pub fn find_landing_zone(grid: &TerrainGrid, source: GridCoord) -> Result<PathResult, PlanError> {
    grid.check_target(source)?;

    if grid.label(source).can_land() {
        trace!(%source, "source is landable");
        return Ok(PathResult {
            path: vec![source],
            cost: 0.0,
            cells_visited: 1,
        });
    }

    let mut records = vec![CellRecord::default(); grid.cell_count()];
    let mut open_set: BinaryHeap<Reverse<OpenCell>> = BinaryHeap::new();
    let mut seq = 0u64;

    let source_idx = grid.index(source);
    records[source_idx].distance = 0.0;
    open_set.push(Reverse(OpenCell {
        distance: FloatOrd(0.0),
        seq,
        index: source_idx,
    }));

    let mut best: Option<usize> = None;
    let mut cells_visited = 0usize;

    while let Some(Reverse(current)) = open_set.pop() {
        let record = records[current.index];
        if record.finalized || current.distance.0 > record.distance {
            continue;
        }
        records[current.index].finalized = true;
        cells_visited += 1;

        // Cells leave the heap in non-decreasing distance order, so the first
        // landable one is the cheapest; seq breaks ties by discovery order.
        if record.can_land {
            best = Some(current.index);
            break;
        }

        let current_coord = grid.coord(current.index);
        for neighbour in king_neighbours(grid, current_coord) {
            let next_idx = grid.index(neighbour);
            let label = grid.label_at(next_idx);
            if !label.is_passable() || records[next_idx].finalized {
                continue;
            }

            let tentative = record.distance + edge_cost(grid, current_coord, neighbour);
            let next = &mut records[next_idx];
            next.can_land = label.can_land();
            if tentative < next.distance {
                next.distance = tentative;
                next.prev = Some(current.index);
                seq += 1;
                open_set.push(Reverse(OpenCell {
                    distance: FloatOrd(tentative),
                    seq,
                    index: next_idx,
                }));
            }
        }
    }

    let Some(landing_idx) = best else {
        debug!(%source, cells_visited, "no landable cell reachable");
        return Ok(PathResult::unreachable(cells_visited));
    };

    let mut path = Vec::new();
    let mut current = Some(landing_idx);
    while let Some(idx) = current {
        path.push(grid.coord(idx));
        current = records[idx].prev;
    }
    path.reverse();

    let cost = records[landing_idx].distance;
    debug!(
        %source,
        landing = %grid.coord(landing_idx),
        cost,
        cells_visited,
        "landing zone found"
    );

    Ok(PathResult {
        path,
        cost,
        cells_visited,
    })
}
