use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// An integer cell coordinate on the 2D lattice.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// The orthogonal neighbors in a fixed order: -X, +X, -Y, +Y.
    pub fn von_neumann_neighbors(&self) -> [Point; 4] {
        [
            *self + Direction::NegX.vector(),
            *self + Direction::PosX.vector(),
            *self + Direction::NegY.vector(),
            *self + Direction::PosY.vector(),
        ]
    }

    pub fn dot(&self, other: &Point) -> i32 {
        self.x * other.x + self.y * other.y
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// One of the 4 axis-aligned unit headings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    NegX,
    PosX,
    NegY,
    PosY,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::NegX,
    Direction::PosX,
    Direction::NegY,
    Direction::PosY,
];

impl Direction {
    pub fn vector(self) -> Point {
        match self {
            Direction::NegX => Point::new(-1, 0),
            Direction::PosX => Point::new(1, 0),
            Direction::NegY => Point::new(0, -1),
            Direction::PosY => Point::new(0, 1),
        }
    }

    pub fn negate(self) -> Direction {
        match self {
            Direction::NegX => Direction::PosX,
            Direction::PosX => Direction::NegX,
            Direction::NegY => Direction::PosY,
            Direction::PosY => Direction::NegY,
        }
    }

    /// Counter-clockwise quarter turn, with +Y pointing "up".
    pub fn rotate_ccw(self) -> Direction {
        match self {
            Direction::PosX => Direction::PosY,
            Direction::PosY => Direction::NegX,
            Direction::NegX => Direction::NegY,
            Direction::NegY => Direction::PosX,
        }
    }

    pub fn rotate_cw(self) -> Direction {
        self.rotate_ccw().negate()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
