use crate::point::Point;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A generator parameter is outside of its accepted range. Raised before any generation work
    /// happens.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// Zoning must start from a floor cell.
    #[error("zoning start {0:?} is not a floor cell")]
    StartNotFloor(Point),

    #[error("point {0:?} is outside of the grid")]
    OutOfBounds(Point),

    #[error("bad spec: {0}")]
    Config(#[from] ron::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Fails with `InvalidArgument` unless `value` lies in `[min, max]`.
pub(crate) fn check_range<T>(name: &'static str, value: T, min: T, max: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Debug,
{
    // Written so that NaN is rejected too.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(Error::invalid(
            name,
            format!("{:?} is not in [{:?}, {:?}]", value, min, max),
        ))
    }
}

/// Fails with `InvalidArgument` unless a `width x height` lattice has at most `max_cells` cells
/// and both sides fit in a `Point` coordinate. Returns the cell count.
pub(crate) fn check_area(
    name: &'static str,
    width: usize,
    height: usize,
    max_cells: usize,
) -> Result<usize> {
    let too_large = || {
        Error::invalid(
            name,
            format!("{}x{} exceeds the {} cell limit", width, height, max_cells),
        )
    };
    if width > i32::MAX as usize || height > i32::MAX as usize {
        return Err(too_large());
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= max_cells => Ok(cells),
        _ => Err(too_large()),
    }
}
