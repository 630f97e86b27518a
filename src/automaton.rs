use crate::{
    error::{check_range, Result},
    grid::{Cell, Grid},
};

use serde::{Deserialize, Serialize};

pub const MAX_NEIGHBORS: u8 = 8;
pub const MAX_PASSES: u8 = 16;

/// Decides a cell's next state from its current state and the number of floor cells among its
/// (clipped) Moore neighbors.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Rule {
    /// Floor iff `count > threshold`, otherwise wall.
    Flip { threshold: u8 },
    /// Floor if `count > upper`, else wall if `count < lower`, otherwise unchanged. With
    /// `lower > upper` the two bands overlap and growing wins.
    KillGrow { lower: u8, upper: u8 },
}

impl Rule {
    pub fn next_cell(&self, current: Cell, count: u8) -> Cell {
        match *self {
            Rule::Flip { threshold } => {
                if count > threshold {
                    Cell::Floor
                } else {
                    Cell::Wall
                }
            }
            Rule::KillGrow { lower, upper } => {
                if count > upper {
                    Cell::Floor
                } else if count < lower {
                    Cell::Wall
                } else {
                    current
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Rule::Flip { threshold } => check_range("threshold", threshold, 0, MAX_NEIGHBORS),
            Rule::KillGrow { lower, upper } => {
                check_range("lower", lower, 0, MAX_NEIGHBORS)?;

                check_range("upper", upper, 0, MAX_NEIGHBORS)
            }
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AutomatonSpec {
    pub rule: Rule,
    pub passes: u8,
}

impl Default for AutomatonSpec {
    fn default() -> Self {
        AutomatonSpec {
            rule: Rule::Flip { threshold: 4 },
            passes: 4,
        }
    }
}

impl AutomatonSpec {
    pub fn flip(threshold: u8, passes: u8) -> Self {
        AutomatonSpec {
            rule: Rule::Flip { threshold },
            passes,
        }
    }

    pub fn kill_grow(lower: u8, upper: u8, passes: u8) -> Self {
        AutomatonSpec {
            rule: Rule::KillGrow { lower, upper },
            passes,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.rule.validate()?;

        check_range("passes", self.passes, 1, MAX_PASSES)
    }

    /// Runs every pass and returns the final grid. `grid` is left untouched.
    pub fn apply(&self, grid: &Grid) -> Result<Grid> {
        let mut smoothed = grid.clone();
        for pass in self.passes(grid.clone())? {
            smoothed = pass;
        }
        log::debug!(
            "Smoothed grid with {:?} over {} passes, {} -> {} floor cells",
            self.rule,
            self.passes,
            grid.floor_count(),
            smoothed.floor_count()
        );

        Ok(smoothed)
    }

    /// Lazily yields the grid after each pass, for callers that want to show progress.
    pub fn passes(&self, grid: Grid) -> Result<Passes> {
        self.validate()?;

        Ok(Passes {
            rule: self.rule,
            remaining: self.passes,
            grid,
        })
    }
}

pub struct Passes {
    rule: Rule,
    remaining: u8,
    grid: Grid,
}

impl Iterator for Passes {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.grid = smooth_pass(&self.grid, self.rule);

        Some(self.grid.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Passes {}

/// One synchronous pass: every cell is decided from the `source` snapshot and written to a new
/// grid.
pub fn smooth_pass(source: &Grid, rule: Rule) -> Grid {
    let mut next = Grid::new(source.width(), source.height());
    for p in source.extent().iter() {
        let current = source.get(&p).unwrap_or_default();
        next.put(&p, rule.next_cell(current, source.moore_floor_count(&p)));
    }

    next
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
