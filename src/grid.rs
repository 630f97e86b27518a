use crate::{
    error::{check_area, Error, Result},
    extent::Extent,
    point::Point,
    CellEncoder,
};

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[repr(u8)]
pub enum Cell {
    Wall = 0,
    Floor = 1,
}

impl Cell {
    pub fn is_floor(self) -> bool {
        self == Cell::Floor
    }

    /// 1 for floor, 0 for wall. Handy for neighbor sums.
    pub fn as_count(self) -> u8 {
        self as u8
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Wall
    }
}

/// A fixed-size, row-major array of cells.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

/// Unchecked serialized form; `Grid` only accepts it if the cell count matches.
#[derive(Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = Error;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let GridRepr {
            width,
            height,
            cells,
        } = repr;
        let expected = check_area("dimensions", width, height, Grid::MAX_CELLS)?;
        if cells.len() != expected {
            return Err(Error::invalid(
                "cells",
                format!("{} cells for a {}x{} grid", cells.len(), width, height),
            ));
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }
}

impl Grid {
    /// Largest cell count any generator will allocate.
    pub const MAX_CELLS: usize = isize::MAX as usize;

    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Grid {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// All walls.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Cell::Wall)
    }

    /// Builds a grid from text rows, where `.` is floor and anything else is wall. The first row
    /// is `y = 0`.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for (i, row) in rows.iter().enumerate() {
            let row_len = row.chars().count();
            if row_len != width {
                return Err(Error::invalid(
                    "rows",
                    format!("row {} has {} cells but row 0 has {}", i, row_len, width),
                ));
            }
            cells.extend(
                row.chars()
                    .map(|c| if c == '.' { Cell::Floor } else { Cell::Wall }),
            );
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn extent(&self) -> Extent {
        Extent::from_min_and_local_supremum(
            Point::new(0, 0),
            Point::new(self.width as i32, self.height as i32),
        )
    }

    /// The extent without its one-cell border.
    pub fn interior(&self) -> Extent {
        self.extent().radial_grow(-1)
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    fn index(&self, p: &Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, p: &Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    pub fn is_floor(&self, p: &Point) -> bool {
        self.get(p).map_or(false, Cell::is_floor)
    }

    pub fn set(&mut self, p: &Point, cell: Cell) -> Result<()> {
        let i = self.index(p).ok_or(Error::OutOfBounds(*p))?;
        self.cells[i] = cell;

        Ok(())
    }

    /// Unchecked by `Result`; only for points the caller already knows are inside.
    pub(crate) fn put(&mut self, p: &Point, cell: Cell) {
        debug_assert!(self.contains(p));
        let i = p.y as usize * self.width + p.x as usize;
        self.cells[i] = cell;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_floor()).count()
    }

    /// Number of floor cells in the 8-cell Moore neighborhood of `p`, clipped to the grid. The
    /// center cell is not counted.
    pub fn moore_floor_count(&self, p: &Point) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(c) = self.get(&Point::new(p.x + dx, p.y + dy)) {
                    count += c.as_count();
                }
            }
        }

        count
    }

    /// Hands every cell to an external consumer, row-major.
    pub fn encode_into(&self, encoder: &mut impl CellEncoder) {
        for p in self.extent().iter() {
            encoder.encode_cell(&p, self.cells[p.y as usize * self.width + p.x as usize]);
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for c in row.iter() {
                let glyph = if c.is_floor() { '.' } else { '#' };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
