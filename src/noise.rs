//! Seeded white noise, optionally shaped by response curves.
//!
//! Each candidate cell consumes exactly one uniform draw, in row-major order, so a given seed
//! produces the same grid no matter how the shaping is configured.

use crate::{
    curve::{PiecewiseCurve, ResponseCurve},
    error::{check_area, check_range, Error, Result},
    grid::{Cell, Grid},
    point::Point,
};

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AxialShapeSpec {
    pub x: PiecewiseCurve,
    pub y: PiecewiseCurve,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RadialShapeSpec {
    /// Normalized `[0, 1]` center of the falloff.
    pub center: (f32, f32),
    /// Evaluated at the normalized distance from `center`; a distance of 1 is half the grid
    /// away.
    pub curve: PiecewiseCurve,
}

impl Default for RadialShapeSpec {
    fn default() -> Self {
        RadialShapeSpec {
            center: (0.5, 0.5),
            curve: PiecewiseCurve::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ShapeSpec {
    pub axial: Option<AxialShapeSpec>,
    pub radial: Option<RadialShapeSpec>,
}

impl ShapeSpec {
    pub fn validate(&self) -> Result<()> {
        if let Some(axial) = self.axial.as_ref() {
            axial.x.validate()?;
            axial.y.validate()?;
        }
        if let Some(radial) = self.radial.as_ref() {
            check_range("radial.center.x", radial.center.0, 0.0, 1.0)?;
            check_range("radial.center.y", radial.center.1, 0.0, 1.0)?;
            radial.curve.validate()?;
        }

        Ok(())
    }

    pub fn shaping(&self) -> Shaping<'_> {
        Shaping {
            axial: self
                .axial
                .as_ref()
                .map(|a| (&a.x as &dyn ResponseCurve, &a.y as &dyn ResponseCurve)),
            radial: self
                .radial
                .as_ref()
                .map(|r| (r.center, &r.curve as &dyn ResponseCurve)),
        }
    }
}

/// Borrowed, curve-agnostic view of the shaping factors. Lets callers plug in any
/// `ResponseCurve`, not just the serializable ones.
#[derive(Clone, Copy, Default)]
pub struct Shaping<'a> {
    pub axial: Option<(&'a dyn ResponseCurve, &'a dyn ResponseCurve)>,
    pub radial: Option<((f32, f32), &'a dyn ResponseCurve)>,
}

impl<'a> Shaping<'a> {
    pub fn none() -> Self {
        Shaping::default()
    }

    /// The multiplier applied to the fill probability at `p`.
    pub fn factor(&self, p: &Point, width: usize, height: usize) -> f32 {
        let u = p.x as f32 / width as f32;
        let v = p.y as f32 / height as f32;

        let mut factor = 1.0;
        if let Some((curve_x, curve_y)) = self.axial {
            factor *= curve_x.evaluate(clamp01(u)) * curve_y.evaluate(clamp01(v));
        }
        if let Some(((cx, cy), curve)) = self.radial {
            let dx = (u - cx) * 2.0;
            let dy = (v - cy) * 2.0;
            factor *= curve.evaluate(clamp01((dx * dx + dy * dy).sqrt()));
        }

        factor
    }
}

fn clamp01(t: f32) -> f32 {
    t.max(0.0).min(1.0)
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NoiseSpec {
    /// Chance of a cell starting as floor, before shaping.
    pub fill_probability: f32,
    /// When false, the one-cell border is left as wall and consumes no random draws.
    pub include_border: bool,
    pub shape: ShapeSpec,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        NoiseSpec {
            fill_probability: 0.5,
            include_border: true,
            shape: ShapeSpec::default(),
        }
    }
}

impl NoiseSpec {
    pub fn validate(&self) -> Result<()> {
        check_range("fill_probability", self.fill_probability, 0.0, 1.0)?;

        self.shape.validate()
    }

    pub fn generate(&self, width: usize, height: usize, rng: &mut impl Rng) -> Result<Grid> {
        self.validate()?;

        sample_noise(
            width,
            height,
            self.fill_probability,
            self.include_border,
            &self.shape.shaping(),
            rng,
        )
    }
}

/// Fills a fresh `width x height` grid with floor cells at random. A cell becomes floor iff its
/// draw is below `fill_probability * shaping.factor(..)`.
pub fn sample_noise(
    width: usize,
    height: usize,
    fill_probability: f32,
    include_border: bool,
    shaping: &Shaping<'_>,
    rng: &mut impl Rng,
) -> Result<Grid> {
    if width == 0 || height == 0 {
        return Err(Error::invalid(
            "dimensions",
            format!("{}x{} grid has no cells", width, height),
        ));
    }
    check_area("dimensions", width, height, Grid::MAX_CELLS)?;
    check_range("fill_probability", fill_probability, 0.0, 1.0)?;

    let mut grid = Grid::new(width, height);
    let candidates = if include_border {
        grid.extent()
    } else {
        grid.interior()
    };

    for p in candidates.iter() {
        let chance = fill_probability * shaping.factor(&p, width, height);
        if rng.gen::<f32>() < chance {
            grid.put(&p, Cell::Floor);
        }
    }
    log::debug!(
        "Sampled {}x{} noise with {} floor cells",
        width,
        height,
        grid.floor_count()
    );

    Ok(grid)
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
    use crate::sampling::small_rng;

    #[test]
    fn test_same_seed_same_noise() {
        let spec = NoiseSpec {
            fill_probability: 0.45,
            ..Default::default()
        };
        let a = spec.generate(20, 20, &mut small_rng(42)).unwrap();
        let b = spec.generate(20, 20, &mut small_rng(42)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, spec.generate(20, 20, &mut small_rng(43)).unwrap());
    }

    #[test]
    fn test_probability_extremes() {
        let mut rng = small_rng(0);
        let none = sample_noise(8, 8, 0.0, true, &Shaping::none(), &mut rng).unwrap();
        let all = sample_noise(8, 8, 1.0, true, &Shaping::none(), &mut rng).unwrap();

        assert_eq!(none.floor_count(), 0);
        assert_eq!(all.floor_count(), 64);
    }

    #[test]
    fn test_border_excluded() {
        let grid = sample_noise(6, 5, 1.0, false, &Shaping::none(), &mut small_rng(0)).unwrap();

        assert_eq!(grid.floor_count(), 4 * 3);
        for p in grid.extent().iter() {
            assert_eq!(grid.is_floor(&p), grid.interior().contains_world(&p));
        }
    }

    #[test]
    fn test_axial_curve_masks_left_half() {
        let left_off = |t: f32| -> f32 {
            if t < 0.5 {
                0.0
            } else {
                1.0
            }
        };
        let one = |_: f32| -> f32 { 1.0 };
        let shaping = Shaping {
            axial: Some((
                &left_off as &dyn ResponseCurve,
                &one as &dyn ResponseCurve,
            )),
            radial: None,
        };
        let grid = sample_noise(10, 10, 1.0, true, &shaping, &mut small_rng(5)).unwrap();

        for p in grid.extent().iter() {
            assert_eq!(grid.is_floor(&p), p.x >= 5);
        }
    }

    #[test]
    fn test_radial_curve_keeps_center() {
        let spec = NoiseSpec {
            fill_probability: 1.0,
            include_border: true,
            shape: ShapeSpec {
                axial: None,
                radial: Some(RadialShapeSpec {
                    center: (0.5, 0.5),
                    curve: PiecewiseCurve::new(vec![
                        crate::curve::Keyframe { t: 0.0, value: 1.0 },
                        crate::curve::Keyframe { t: 0.5, value: 1.0 },
                        crate::curve::Keyframe {
                            t: 0.51,
                            value: 0.0,
                        },
                    ])
                    .unwrap(),
                }),
            },
        };
        let grid = spec.generate(20, 20, &mut small_rng(9)).unwrap();

        assert!(grid.is_floor(&[10, 10].into()));
        assert!(!grid.is_floor(&[0, 0].into()));
        assert!(!grid.is_floor(&[19, 10].into()));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut rng = small_rng(0);

        assert!(sample_noise(0, 4, 0.5, true, &Shaping::none(), &mut rng).is_err());
        assert!(sample_noise(4, 4, 1.5, true, &Shaping::none(), &mut rng).is_err());
        assert!(sample_noise(4, 4, f32::NAN, true, &Shaping::none(), &mut rng).is_err());
        assert!(
            sample_noise(usize::MAX, 3, 0.5, true, &Shaping::none(), &mut rng).is_err()
        );
    }
}
