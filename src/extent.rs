use crate::point::Point;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle of lattice points, stored as a minimum corner and a "local
/// supremum" (the size along each axis).
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Extent {
    minimum: Point,
    local_supremum: Point,
}

impl Extent {
    pub fn from_min_and_local_supremum(minimum: Point, local_supremum: Point) -> Self {
        Extent {
            minimum,
            local_supremum: Point::new(local_supremum.x.max(0), local_supremum.y.max(0)),
        }
    }

    pub fn get_minimum(&self) -> &Point {
        &self.minimum
    }

    pub fn get_local_supremum(&self) -> &Point {
        &self.local_supremum
    }

    /// One past the maximum point on each axis.
    pub fn get_world_supremum(&self) -> Point {
        self.minimum + self.local_supremum
    }

    pub fn num_points(&self) -> usize {
        self.local_supremum.x as usize * self.local_supremum.y as usize
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    pub fn contains_world(&self, p: &Point) -> bool {
        let sup = self.get_world_supremum();

        p.x >= self.minimum.x && p.x < sup.x && p.y >= self.minimum.y && p.y < sup.y
    }

    /// Grows (or shrinks, for negative `amount`) every side by `amount`.
    pub fn radial_grow(&self, amount: i32) -> Extent {
        Extent::from_min_and_local_supremum(
            self.minimum - Point::new(amount, amount),
            self.local_supremum + Point::new(2 * amount, 2 * amount),
        )
    }

    /// Points in row-major order: X varies fastest.
    pub fn iter(&self) -> ExtentIter {
        ExtentIter {
            extent: *self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Extent {
    type Item = Point;
    type IntoIter = ExtentIter;

    fn into_iter(self) -> ExtentIter {
        self.iter()
    }
}

pub struct ExtentIter {
    extent: Extent,
    next: usize,
}

impl Iterator for ExtentIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.extent.num_points() {
            return None;
        }

        let width = self.extent.local_supremum.x as usize;
        let local = Point::new((self.next % width) as i32, (self.next / width) as i32);
        self.next += 1;

        Some(self.extent.minimum + local)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.extent.num_points().saturating_sub(self.next);

        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ExtentIter {}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iteration_is_row_major() {
        let e = Extent::from_min_and_local_supremum([1, 1].into(), [2, 2].into());
        let points: Vec<Point> = e.iter().collect();

        assert_eq!(
            points,
            vec![
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn test_radial_shrink_to_interior() {
        let e = Extent::from_min_and_local_supremum([0, 0].into(), [5, 4].into());
        let interior = e.radial_grow(-1);

        assert_eq!(
            interior,
            Extent::from_min_and_local_supremum([1, 1].into(), [3, 2].into())
        );
        assert!(interior.contains_world(&[3, 2].into()));
        assert!(!interior.contains_world(&[4, 2].into()));
    }

    #[test]
    fn test_degenerate_extent_is_empty() {
        let e = Extent::from_min_and_local_supremum([0, 0].into(), [2, 2].into());

        assert!(e.radial_grow(-1).is_empty());
        assert_eq!(e.radial_grow(-1).iter().count(), 0);
    }
}
