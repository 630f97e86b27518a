use crate::error::{check_range, Error, Result};

use serde::{Deserialize, Serialize};

/// A 1D response `f(t) -> [0, 1]` evaluated for `t` in `[0, 1]`. Used to shape noise
/// probabilities.
pub trait ResponseCurve {
    fn evaluate(&self, t: f32) -> f32;
}

impl<F> ResponseCurve for F
where
    F: Fn(f32) -> f32,
{
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Keyframe {
    pub t: f32,
    pub value: f32,
}

/// Piecewise linear curve through sorted keyframes. Constant before the first and after the last
/// keyframe.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PiecewiseCurve {
    keys: Vec<Keyframe>,
}

impl PiecewiseCurve {
    /// Keyframes must be non-empty with strictly increasing `t`.
    pub fn new(keys: Vec<Keyframe>) -> Result<Self> {
        let curve = PiecewiseCurve { keys };
        curve.validate()?;

        Ok(curve)
    }

    pub fn constant(value: f32) -> Self {
        PiecewiseCurve {
            keys: vec![Keyframe { t: 0.0, value }],
        }
    }

    pub fn linear(from: f32, to: f32) -> Self {
        PiecewiseCurve {
            keys: vec![
                Keyframe {
                    t: 0.0,
                    value: from,
                },
                Keyframe { t: 1.0, value: to },
            ],
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Curves deserialized from a spec bypass `new`, so pipelines call this before use.
    pub fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(Error::invalid("curve", "needs at least one keyframe"));
        }
        for k in self.keys.iter() {
            check_range("curve.value", k.value, 0.0, 1.0)?;
            if !k.t.is_finite() {
                return Err(Error::invalid("curve.t", "must be finite"));
            }
        }
        if self.keys.windows(2).any(|w| w[0].t >= w[1].t) {
            return Err(Error::invalid("curve.t", "keyframes must be strictly increasing"));
        }

        Ok(())
    }
}

impl Default for PiecewiseCurve {
    fn default() -> Self {
        PiecewiseCurve::constant(1.0)
    }
}

impl ResponseCurve for PiecewiseCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let first = match self.keys.first() {
            Some(k) => k,
            None => return 1.0,
        };
        if t <= first.t {
            return first.value;
        }
        for w in self.keys.windows(2) {
            let (a, b) = (w[0], w[1]);
            if t <= b.t {
                let s = (t - a.t) / (b.t - a.t);
                return a.value + (b.value - a.value) * s;
            }
        }

        self.keys.last().map_or(first.value, |k| k.value)
    }
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

    #[test]
    fn test_piecewise_interpolates_and_clamps() {
        let curve = PiecewiseCurve::new(vec![
            Keyframe { t: 0.0, value: 0.0 },
            Keyframe { t: 0.5, value: 1.0 },
            Keyframe { t: 1.0, value: 0.5 },
        ])
        .unwrap();

        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert!((curve.evaluate(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(curve.evaluate(0.5), 1.0);
        assert!((curve.evaluate(0.75) - 0.75).abs() < 1e-6);
        assert_eq!(curve.evaluate(2.0), 0.5);
    }

    #[test]
    fn test_bad_keyframes_rejected() {
        assert!(PiecewiseCurve::new(Vec::new()).is_err());
        assert!(PiecewiseCurve::new(vec![
            Keyframe { t: 0.5, value: 0.2 },
            Keyframe { t: 0.5, value: 0.3 },
        ])
        .is_err());
        assert!(PiecewiseCurve::new(vec![Keyframe { t: 0.0, value: 1.5 }]).is_err());
    }

    #[test]
    fn test_closures_are_curves() {
        let half = |t: f32| t * 0.5;

        assert_eq!(half.evaluate(1.0), 0.5);
    }
}
