//! Grid error type.

use thiserror::Error;

use wh_core::GridPos;

/// Errors produced by `wh-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid {width}x{height} is too small (minimum {min}x{min})")]
    TooSmall { width: u32, height: u32, min: u32 },

    #[error("position {0} is outside the grid")]
    OutOfBounds(GridPos),

    #[error("cell {0} already holds a robot")]
    Occupied(GridPos),

    #[error("cell {0} already holds a fixture")]
    FixtureConflict(GridPos),
}

pub type GridResult<T> = Result<T, GridError>;
