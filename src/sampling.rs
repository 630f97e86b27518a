use crate::{extent::Extent, point::Point};

use fnv::FnvHasher;
use rand::{prelude::*, rngs::SmallRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// The seeded generator every pipeline in this crate draws from.
pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Turns a seed phrase into a numeric seed. FNV-1a is used rather than the std hasher so the
/// result does not change between runs or platforms.
pub fn seed_from_str(phrase: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(phrase.as_bytes());

    hasher.finish()
}

/// Uniformly samples lattice points. X is drawn before Y.
pub struct LatticeUniformDist {
    pub x: Uniform<i32>,
    pub y: Uniform<i32>,
}

impl LatticeUniformDist {
    /// Panics if `extent` is empty.
    pub fn over_extent(extent: &Extent) -> Self {
        let min = extent.get_minimum();
        let sup = extent.get_world_supremum();

        LatticeUniformDist {
            x: Uniform::new(min.x, sup.x),
            y: Uniform::new(min.y, sup.y),
        }
    }
}

impl Distribution<Point> for LatticeUniformDist {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = rng.sample(self.x);
        let y = rng.sample(self.y);

        [x, y].into()
    }
}

/// A point on the continuous plane.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PlanePoint {
    pub x: f32,
    pub y: f32,
}

impl PlanePoint {
    pub fn new(x: f32, y: f32) -> Self {
        PlanePoint { x, y }
    }

    pub fn distance_squared(&self, other: &PlanePoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;

        dx * dx + dy * dy
    }
}

/// Uniformly samples `[0, width) x [0, height)`. X is drawn before Y.
pub struct PlaneUniformDist {
    pub x: Uniform<f32>,
    pub y: Uniform<f32>,
}

impl PlaneUniformDist {
    /// Panics unless both dimensions are positive.
    pub fn new(width: f32, height: f32) -> Self {
        PlaneUniformDist {
            x: Uniform::new(0.0, width),
            y: Uniform::new(0.0, height),
        }
    }
}

impl Distribution<PlanePoint> for PlaneUniformDist {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PlanePoint {
        let x = rng.sample(self.x);
        let y = rng.sample(self.y);

        PlanePoint::new(x, y)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
