use thiserror::Error;

use wh_core::RobotId;
use wh_dispatch::DispatchError;
use wh_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("placed only {placed} of {requested} robots: no free cell found in {attempts} random draws")]
    PlacementExhausted {
        placed:    usize,
        requested: usize,
        attempts:  u32,
    },

    #[error("{got} start positions given for {expected} robots")]
    RobotCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("no such robot: {0}")]
    UnknownRobot(RobotId),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type SimResult<T> = Result<T, SimError>;
