//! Seeded generators for 2D grid and point layouts: shaped white noise, cellular smoothing,
//! region cleanup and zoning, random-walk mazes, and Poisson disk scattering.
//!
//! Every generator takes its parameters as a plain `*Spec` struct and draws from an explicit
//! `rand::Rng`, so the same seed always gives the same result.

pub mod automaton;
pub mod curve;
pub mod error;
pub mod extent;
pub mod grid;
pub mod map_types;
pub mod maze;
pub mod noise;
pub mod point;
pub mod poisson;
pub mod region;
pub mod sampling;

pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use point::Point;

/// Implement this to allow the procedural generation algorithms to write into your own map.
pub trait CellEncoder {
    /// `cell` is the state to write into `point`.
    fn encode_cell(&mut self, point: &Point, cell: Cell);
}
