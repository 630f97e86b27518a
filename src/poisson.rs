//! Blue-noise point scattering by dart throwing, with a coarse lookup grid to keep the overlap
//! test local.

use crate::{
    error::{check_area, Error, Result},
    sampling::{PlanePoint, PlaneUniformDist},
};

use rand::Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};
use std::mem;

/// How many acceleration cells to search on each side of a candidate. Cells are `radius / √2`
/// wide, so 3 cells always cover the `2 * radius` exclusion distance.
const SEARCH_CELLS: usize = 3;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PoissonSpec {
    /// Every point owns a disk of this radius; disks never touch.
    pub radius: f32,
    pub plane_width: f32,
    pub plane_height: f32,
    /// Consecutive rejected darts before giving up.
    pub max_fails: usize,
    pub max_points: Option<usize>,
}

impl Default for PoissonSpec {
    fn default() -> Self {
        PoissonSpec {
            radius: 1.0,
            plane_width: 10.0,
            plane_height: 10.0,
            max_fails: 30,
            max_points: None,
        }
    }
}

impl PoissonSpec {
    pub fn validate(&self) -> Result<()> {
        check_positive("radius", self.radius)?;
        check_positive("plane_width", self.plane_width)?;
        check_positive("plane_height", self.plane_height)?;

        let (x, y) = AccelerationGrid::resolution(self.radius, self.plane_width, self.plane_height);
        let max_cells = isize::MAX as usize / mem::size_of::<Option<PlanePoint>>();

        check_area("radius", x, y, max_cells).map(|_| ())
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Result<Vec<PlanePoint>> {
        let points: Vec<PlanePoint> = self.points(rng)?.collect();
        log::debug!(
            "Scattered {} points with radius {} over {}x{}",
            points.len(),
            self.radius,
            self.plane_width,
            self.plane_height
        );

        Ok(points)
    }

    /// Lazily yields each accepted point.
    pub fn points<'r, R: Rng>(&self, rng: &'r mut R) -> Result<PoissonPoints<'r, R>> {
        self.validate()?;

        Ok(PoissonPoints {
            dist: PlaneUniformDist::new(self.plane_width, self.plane_height),
            accel: AccelerationGrid::new(self.radius, self.plane_width, self.plane_height),
            radius: self.radius,
            max_fails: self.max_fails,
            max_points: self.max_points,
            fails: 0,
            accepted: 0,
            rng,
        })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(
            name,
            format!("{} must be positive and finite", value),
        ))
    }
}

/// Coarse lattice over the plane; each cell holds at most one accepted point.
struct AccelerationGrid {
    cell_size: f32,
    resolution: (usize, usize),
    cells: Vec<Option<PlanePoint>>,
}

impl AccelerationGrid {
    fn cell_size(radius: f32) -> f32 {
        radius / 2f32.sqrt()
    }

    /// Cells along each axis. Float-to-int casts saturate, so huge ratios come out as
    /// `usize::MAX`.
    fn resolution(radius: f32, width: f32, height: f32) -> (usize, usize) {
        let cell_size = Self::cell_size(radius);

        (
            ((width / cell_size).ceil() as usize).max(1),
            ((height / cell_size).ceil() as usize).max(1),
        )
    }

    fn new(radius: f32, width: f32, height: f32) -> Self {
        let resolution = Self::resolution(radius, width, height);

        AccelerationGrid {
            cell_size: Self::cell_size(radius),
            resolution,
            cells: vec![None; resolution.0 * resolution.1],
        }
    }

    fn cell_of(&self, p: &PlanePoint) -> (usize, usize) {
        let x = (p.x / self.cell_size) as usize;
        let y = (p.y / self.cell_size) as usize;

        (x.min(self.resolution.0 - 1), y.min(self.resolution.1 - 1))
    }

    /// True iff some stored point lies within `2 * radius` (inclusive) of `p`.
    fn overlaps(&self, p: &PlanePoint, radius: f32) -> bool {
        let (cx, cy) = self.cell_of(p);
        let (max_x, max_y) = (self.resolution.0 - 1, self.resolution.1 - 1);
        let x_range = cx.saturating_sub(SEARCH_CELLS)..=(cx + SEARCH_CELLS).min(max_x);
        let y_range = cy.saturating_sub(SEARCH_CELLS)..=(cy + SEARCH_CELLS).min(max_y);
        let min_dist = radius + radius;

        for y in y_range {
            for x in x_range.clone() {
                if let Some(other) = self.cells[y * self.resolution.0 + x] {
                    if other.distance_squared(p) <= min_dist * min_dist {
                        return true;
                    }
                }
            }
        }

        false
    }

    fn insert(&mut self, p: PlanePoint) {
        let (x, y) = self.cell_of(&p);
        debug_assert!(self.cells[y * self.resolution.0 + x].is_none());
        self.cells[y * self.resolution.0 + x] = Some(p);
    }
}

/// Dart thrower. Ends after `max_fails` consecutive rejections or once `max_points` points were
/// accepted, whichever happens first.
pub struct PoissonPoints<'r, R> {
    dist: PlaneUniformDist,
    accel: AccelerationGrid,
    radius: f32,
    max_fails: usize,
    max_points: Option<usize>,
    fails: usize,
    accepted: usize,
    rng: &'r mut R,
}

impl<'r, R> PoissonPoints<'r, R> {
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Consecutive rejections since the last accepted point.
    pub fn consecutive_fails(&self) -> usize {
        self.fails
    }
}

impl<'r, R: Rng> Iterator for PoissonPoints<'r, R> {
    type Item = PlanePoint;

    fn next(&mut self) -> Option<PlanePoint> {
        loop {
            if self.fails >= self.max_fails || Some(self.accepted) == self.max_points {
                return None;
            }

            let p = self.dist.sample(&mut *self.rng);
            if self.accel.overlaps(&p, self.radius) {
                self.fails += 1;
                continue;
            }

            self.accel.insert(p);
            self.fails = 0;
            self.accepted += 1;

            return Some(p);
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
