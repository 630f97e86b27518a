use crate::{
    error::Result,
    grid::Grid,
    maze::{kill_walls, MazeSpec, MazeStep},
    point::Point,
    region::{keep_region_of, zone_from_seed, Zoning},
    sampling::small_rng,
};

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct MazeMap {
    pub grid: Grid,
    pub start: Point,
    pub walls_killed: usize,
    /// Flood-fill ranks from `start` over the finished grid.
    pub zoning: Zoning,
}

/// Carves a maze, punches loops into it, then ranks cells by distance from the start.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MazeMapSpec {
    pub seed: u64,
    pub maze: MazeSpec,
    /// Killed walls can open floor cells that don't touch the maze. When set, those islands are
    /// walled back up so every floor cell is reachable from the start.
    pub purge_islands: bool,
}

impl MazeMapSpec {
    pub fn generate(&self) -> Result<MazeMap> {
        self.generate_with(|_, _| {})
    }

    /// Like `generate`, but shows `on_step` the grid after every carving step.
    pub fn generate_with(&self, mut on_step: impl FnMut(MazeStep, &Grid)) -> Result<MazeMap> {
        log::debug!("Generating maze map");

        let mut rng = small_rng(self.seed);
        let mut carver = self.maze.carver(&mut rng)?;
        while let Some(step) = carver.step() {
            on_step(step, carver.grid());
        }
        let start = carver.start();
        let (mut grid, rng) = carver.into_parts();
        log::debug!("Carved {} cells from {:?}", grid.floor_count(), start);

        let walls_killed = kill_walls(&mut grid, self.maze.max_walls_to_kill, rng);
        log::debug!("Killed {} walls", walls_killed);

        if self.purge_islands {
            grid = keep_region_of(&grid, start)?;
        }
        let zoning = zone_from_seed(&grid, start)?;
        log::debug!(
            "{} of {} floor cells reachable from start",
            zoning.reached(),
            zoning.floor_count()
        );

        Ok(MazeMap {
            grid,
            start,
            walls_killed,
            zoning,
        })
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
