//! Connected-component analysis of floor cells under 4-connectivity.

use crate::{
    error::{Error, Result},
    grid::{Cell, Grid},
    point::Point,
};

use fnv::{FnvHashMap, FnvHashSet};
use stats::OnlineStats;
use std::collections::VecDeque;

/// A maximal 4-connected set of floor cells, in flood-fill arrival order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    pub cells: Vec<Point>,
}

impl Region {
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Breadth-first flood fill over floor cells starting at `start`. Every discovered cell is added
/// to `visited`, and cells already in `visited` are never entered. Returns the cells in dequeue
/// order; empty if `start` is not an unvisited floor cell.
pub fn flood_fill(grid: &Grid, start: Point, visited: &mut FnvHashSet<Point>) -> Vec<Point> {
    let mut filled = Vec::new();
    if !grid.is_floor(&start) || !visited.insert(start) {
        return filled;
    }

    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        filled.push(p);
        for n in p.von_neumann_neighbors().iter() {
            if grid.is_floor(n) && visited.insert(*n) {
                queue.push_back(*n);
            }
        }
    }

    filled
}

/// All floor regions, discovered in row-major scan order.
pub fn regions(grid: &Grid) -> Vec<Region> {
    let mut visited = FnvHashSet::default();
    let mut found = Vec::new();
    for p in grid.extent().iter() {
        if visited.contains(&p) || !grid.is_floor(&p) {
            continue;
        }
        found.push(Region {
            cells: flood_fill(grid, p, &mut visited),
        });
    }

    found
}

/// The biggest region; the earliest in scan order wins ties.
pub fn largest_region(grid: &Grid) -> Option<Region> {
    regions(grid)
        .into_iter()
        .fold(None, |best: Option<Region>, r| match best {
            Some(b) if b.size() >= r.size() => Some(b),
            _ => Some(r),
        })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CleanupReport {
    pub regions_found: usize,
    pub regions_removed: usize,
    pub cells_removed: usize,
    /// Size statistics over every region found, including removed ones.
    pub mean_region_size: f64,
    pub region_size_std_dev: f64,
}

/// Turns every floor region with fewer than `min_size` cells into wall.
pub fn remove_small_regions(grid: &Grid, min_size: usize) -> Grid {
    remove_small_regions_with_report(grid, min_size).0
}

pub fn remove_small_regions_with_report(grid: &Grid, min_size: usize) -> (Grid, CleanupReport) {
    let mut cleaned = grid.clone();
    let mut report = CleanupReport::default();
    let mut sizes = OnlineStats::new();

    for region in regions(grid).iter() {
        report.regions_found += 1;
        sizes.add(region.size());
        if region.size() >= min_size {
            continue;
        }
        report.regions_removed += 1;
        report.cells_removed += region.size();
        for p in region.cells.iter() {
            cleaned.put(p, Cell::Wall);
        }
    }

    if report.regions_found > 0 {
        report.mean_region_size = sizes.mean();
        report.region_size_std_dev = sizes.stddev();
    }
    log::debug!(
        "Removed {} of {} regions smaller than {} ({} cells)",
        report.regions_removed,
        report.regions_found,
        min_size,
        report.cells_removed
    );

    (cleaned, report)
}

/// Keeps only the floor region containing `start`; every other floor cell becomes wall.
pub fn keep_region_of(grid: &Grid, start: Point) -> Result<Grid> {
    let zoning = zone_from_seed(grid, start)?;
    let mut kept = Grid::new(grid.width(), grid.height());
    for p in zoning.order().iter() {
        kept.put(p, Cell::Floor);
    }

    Ok(kept)
}

/// Flood-fill arrival ranks from a start cell. Ranks are 1-indexed.
#[derive(Clone, Debug)]
pub struct Zoning {
    order: Vec<Point>,
    ranks: FnvHashMap<Point, usize>,
    floor_count: usize,
}

impl Zoning {
    pub fn rank(&self, p: &Point) -> Option<usize> {
        self.ranks.get(p).cloned()
    }

    pub fn ranks(&self) -> &FnvHashMap<Point, usize> {
        &self.ranks
    }

    /// Reached cells, lowest rank first.
    pub fn order(&self) -> &[Point] {
        &self.order
    }

    /// Number of cells reachable from the start.
    pub fn reached(&self) -> usize {
        self.order.len()
    }

    /// Floor cells in the whole grid, reachable or not.
    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    pub fn covers_all_floor(&self) -> bool {
        self.reached() == self.floor_count
    }

    /// Buckets `p` into one of `num_bands` bands by `rank / floor_count * num_bands`.
    pub fn band(&self, p: &Point, num_bands: usize) -> Option<usize> {
        if num_bands == 0 {
            return None;
        }
        let rank = self.rank(p)?;
        let band = (rank as f64 / self.floor_count as f64 * num_bands as f64) as usize;

        Some(band.min(num_bands - 1))
    }
}

/// Ranks every floor cell reachable from `start` by breadth-first dequeue order. `start` must be a
/// floor cell of `grid`.
pub fn zone_from_seed(grid: &Grid, start: Point) -> Result<Zoning> {
    if !grid.contains(&start) {
        return Err(Error::OutOfBounds(start));
    }
    if !grid.is_floor(&start) {
        return Err(Error::StartNotFloor(start));
    }

    let order = flood_fill(grid, start, &mut FnvHashSet::default());
    let ranks = order
        .iter()
        .enumerate()
        .map(|(i, p)| (*p, i + 1))
        .collect();

    Ok(Zoning {
        order,
        ranks,
        floor_count: grid.floor_count(),
    })
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
