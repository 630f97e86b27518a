//! Maze carving by a biased random walk that falls back to a stack of frontier cells when it gets
//! blocked.
//!
//! A cell may only be carved while it touches at most one floor cell, so corridors stay one cell
//! wide and never merge into loops. Out-of-grid neighbors count as floor, which keeps the walk off
//! the boundary. Loops are added afterwards by [`kill_walls`].

use crate::{
    error::{check_area, check_range, Error, Result},
    extent::Extent,
    grid::{Cell, Grid},
    point::{Direction, Point, ALL_DIRECTIONS},
    sampling::LatticeUniformDist,
};

use fnv::FnvHashSet;
use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MazeSpec {
    pub width: usize,
    pub height: usize,
    /// Chance per carved cell that the walk turns instead of going straight.
    pub turn_chance: f32,
    /// Given a turn, the chance that it is counter-clockwise.
    pub turn_direction_flip: f32,
    /// Number of random interior cells tried by the wall-kill pass.
    pub max_walls_to_kill: usize,
}

impl Default for MazeSpec {
    fn default() -> Self {
        MazeSpec {
            width: 40,
            height: 40,
            turn_chance: 0.4,
            turn_direction_flip: 0.5,
            max_walls_to_kill: 0,
        }
    }
}

impl MazeSpec {
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(Error::invalid(
                "dimensions",
                format!(
                    "{}x{} maze has no interior; need at least 3x3",
                    self.width, self.height
                ),
            ));
        }
        check_area("dimensions", self.width, self.height, Grid::MAX_CELLS)?;
        check_range("turn_chance", self.turn_chance, 0.0, 1.0)?;

        check_range("turn_direction_flip", self.turn_direction_flip, 0.0, 1.0)
    }

    /// Starts a carving run. Nothing is carved until the carver is stepped.
    pub fn carver<'r, R: Rng>(&self, rng: &'r mut R) -> Result<MazeCarver<'r, R>> {
        MazeCarver::new(self, rng)
    }

    /// Carves the whole maze, then runs the wall-kill pass.
    pub fn generate(&self, rng: &mut impl Rng) -> Result<Maze> {
        log::debug!("Generating {}x{} maze", self.width, self.height);

        let mut carver = self.carver(rng)?;
        let steps = carver.by_ref().count();
        let start = carver.start();
        let carved_cells = carver.grid().floor_count();
        let (mut grid, rng) = carver.into_parts();
        log::debug!("Carved {} cells in {} steps", carved_cells, steps);

        let walls_killed = kill_walls(&mut grid, self.max_walls_to_kill, rng);
        log::debug!(
            "Killed {} walls in {} attempts",
            walls_killed,
            self.max_walls_to_kill
        );

        Ok(Maze {
            grid,
            start,
            carved_cells,
            walls_killed,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Point,
    /// Floor cells before the wall-kill pass.
    pub carved_cells: usize,
    pub walls_killed: usize,
}

/// One transition of the carver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MazeStep {
    /// `position` became floor and the walk moved on.
    Carved { position: Point },
    /// The walk was blocked and resumed from a frontier cell.
    Backtracked { position: Point },
}

/// Steppable maze carving state. Each call to `next` performs one transition; the iterator ends
/// when the frontier stack runs dry. Not restartable.
pub struct MazeCarver<'r, R> {
    grid: Grid,
    start: Point,
    position: Point,
    direction: Direction,
    stack: Vec<Point>,
    visited: FnvHashSet<Point>,
    turn_chance: f32,
    turn_direction_flip: f32,
    finished: bool,
    rng: &'r mut R,
}

impl<'r, R: Rng> MazeCarver<'r, R> {
    pub fn new(spec: &MazeSpec, rng: &'r mut R) -> Result<Self> {
        spec.validate()?;

        let grid = Grid::new(spec.width, spec.height);
        let start = LatticeUniformDist::over_extent(&grid.interior()).sample(rng);
        let direction = ALL_DIRECTIONS[rng.gen_range(0, ALL_DIRECTIONS.len())];

        Ok(MazeCarver {
            grid,
            start,
            position: start,
            direction,
            stack: Vec::new(),
            visited: FnvHashSet::default(),
            turn_chance: spec.turn_chance,
            turn_direction_flip: spec.turn_direction_flip,
            finished: false,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cells waiting to be revisited, most recent last.
    pub fn frontier(&self) -> &[Point] {
        &self.stack
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Gives back the grid (complete or not) and the borrowed RNG, so the caller can keep drawing
    /// from the same stream.
    pub fn into_parts(self) -> (Grid, &'r mut R) {
        (self.grid, self.rng)
    }

    pub fn step(&mut self) -> Option<MazeStep> {
        if self.finished {
            return None;
        }

        let position = self.position;
        if self.grid.contains(&position) && self.floor_neighbors(&position) <= 1 {
            self.grid.put(&position, Cell::Floor);
            self.visited.insert(position);
            self.track_neighboring_walls(&position);
            self.position = self.next_position(&position);
            if self.stack.is_empty() {
                self.finished = true;
            }

            return Some(MazeStep::Carved { position });
        }

        match self.stack.pop() {
            Some(p) => {
                self.position = p;

                Some(MazeStep::Backtracked { position: p })
            }
            None => {
                self.finished = true;

                None
            }
        }
    }

    /// Orthogonal floor neighbors, counting each out-of-grid neighbor as floor.
    fn floor_neighbors(&self, p: &Point) -> usize {
        p.von_neumann_neighbors()
            .iter()
            .filter(|n| self.grid.get(n).map_or(true, Cell::is_floor))
            .count()
    }

    fn track_neighboring_walls(&mut self, p: &Point) {
        for n in p.von_neumann_neighbors().iter() {
            if self.grid.contains(n) && self.visited.insert(*n) {
                self.stack.push(*n);
            }
        }
    }

    fn next_position(&mut self, p: &Point) -> Point {
        if self.rng.gen::<f32>() < self.turn_chance {
            self.direction = if self.rng.gen::<f32>() < self.turn_direction_flip {
                self.direction.rotate_ccw()
            } else {
                self.direction.rotate_cw()
            };
        }

        *p + self.direction.vector()
    }
}

impl<'r, R: Rng> Iterator for MazeCarver<'r, R> {
    type Item = MazeStep;

    fn next(&mut self) -> Option<MazeStep> {
        self.step()
    }
}

/// Tries `iterations` random interior cells and turns each one that is still wall into floor.
/// Returns how many were converted; tries that land on floor are spent all the same.
pub fn kill_walls(grid: &mut Grid, iterations: usize, rng: &mut impl Rng) -> usize {
    let interior: Extent = grid.interior();
    if interior.is_empty() {
        return 0;
    }

    let dist = LatticeUniformDist::over_extent(&interior);
    let mut killed = 0;
    for _ in 0..iterations {
        let p = dist.sample(rng);
        if grid.get(&p) == Some(Cell::Wall) {
            grid.put(&p, Cell::Floor);
            killed += 1;
        }
    }

    killed
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{region::zone_from_seed, sampling::small_rng};

    fn spec(width: usize, height: usize) -> MazeSpec {
        MazeSpec {
            width,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let s = MazeSpec {
            max_walls_to_kill: 20,
            ..spec(25, 19)
        };

        assert_eq!(
            s.generate(&mut small_rng(11)).unwrap(),
            s.generate(&mut small_rng(11)).unwrap()
        );
    }

    #[test]
    fn test_stepping_matches_running() {
        let s = spec(16, 12);
        let mut rng_a = small_rng(4);
        let mut rng_b = small_rng(4);

        let steps_a: Vec<MazeStep> = s.carver(&mut rng_a).unwrap().collect();
        let mut carver = s.carver(&mut rng_b).unwrap();
        let mut steps_b = Vec::new();
        while let Some(step) = carver.step() {
            if let MazeStep::Carved { position } = step {
                assert!(carver.grid().is_floor(&position));
            }
            steps_b.push(step);
        }

        assert_eq!(steps_a, steps_b);
        assert!(carver.is_finished());
        assert!(carver.frontier().is_empty());
        assert_eq!(carver.step(), None);
        assert_eq!(
            steps_a[0],
            MazeStep::Carved {
                position: carver.start()
            }
        );
        assert_eq!(
            carver.into_parts().0,
            s.generate(&mut small_rng(4)).unwrap().grid
        );
    }

    #[test]
    fn test_carved_maze_is_connected() {
        for seed in 0..10 {
            let maze = spec(21, 17).generate(&mut small_rng(seed)).unwrap();
            let zoning = zone_from_seed(&maze.grid, maze.start).unwrap();

            assert!(zoning.covers_all_floor());
            assert_eq!(maze.carved_cells, maze.grid.floor_count());
        }
    }

    #[test]
    fn test_border_is_never_carved() {
        for seed in 0..10 {
            let maze = spec(15, 15).generate(&mut small_rng(seed)).unwrap();
            for p in maze.grid.extent().iter() {
                if !maze.grid.interior().contains_world(&p) {
                    assert!(!maze.grid.is_floor(&p), "seed {} carved {:?}", seed, p);
                }
            }
        }
    }

    #[test]
    fn test_corridors_have_no_open_squares() {
        let maze = spec(30, 30).generate(&mut small_rng(8)).unwrap();
        let g = &maze.grid;
        for y in 0..29 {
            for x in 0..29 {
                let block = [[x, y], [x + 1, y], [x, y + 1], [x + 1, y + 1]];
                assert!(!block.iter().all(|p| g.is_floor(&(*p).into())));
            }
        }
    }

    #[test]
    fn test_wall_kill_budget() {
        let mut grid = spec(20, 20).generate(&mut small_rng(2)).unwrap().grid;
        let before = grid.floor_count();
        let mut rng = small_rng(3);

        assert_eq!(kill_walls(&mut grid, 0, &mut rng), 0);
        assert_eq!(grid.floor_count(), before);

        let killed = kill_walls(&mut grid, 30, &mut rng);
        assert!(killed <= 30);
        assert_eq!(grid.floor_count(), before + killed);

        let maze = MazeSpec {
            max_walls_to_kill: 30,
            ..spec(20, 20)
        }
        .generate(&mut small_rng(2))
        .unwrap();
        assert_eq!(maze.grid.floor_count(), maze.carved_cells + maze.walls_killed);
    }

    #[test]
    fn test_always_turning_still_terminates() {
        let s = MazeSpec {
            turn_chance: 1.0,
            turn_direction_flip: 1.0,
            ..spec(12, 9)
        };
        let maze = s.generate(&mut small_rng(6)).unwrap();

        assert!(zone_from_seed(&maze.grid, maze.start)
            .unwrap()
            .covers_all_floor());
    }

    #[test]
    fn test_invalid_specs_rejected() {
        let mut rng = small_rng(0);

        assert!(spec(2, 10).generate(&mut rng).is_err());
        assert!(MazeSpec {
            turn_chance: 1.5,
            ..spec(10, 10)
        }
        .generate(&mut rng)
        .is_err());
        assert!(MazeSpec {
            turn_direction_flip: -0.1,
            ..spec(10, 10)
        }
        .generate(&mut rng)
        .is_err());
        assert!(spec(usize::MAX, 2).generate(&mut rng).is_err());
        assert!(spec(usize::MAX / 2, usize::MAX / 2).carver(&mut rng).is_err());
    }

    #[test]
    fn test_wall_kill_spends_budget_without_walls() {
        // No interior walls to convert, so only an attempt budget lets this return.
        let mut grid = Grid::filled(5, 5, Cell::Floor);

        assert_eq!(kill_walls(&mut grid, 10, &mut small_rng(4)), 0);
        assert_eq!(grid.floor_count(), 25);
    }
}
