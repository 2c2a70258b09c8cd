use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown coordination mechanism {0:?} (expected cnp, greedy, or centralized)")]
    UnknownMechanism(String),

    #[error("order generation rate {0} is outside [0, 1]")]
    InvalidRate(f64),

    #[error("layout has no {0}; orders cannot be generated")]
    MissingFixtures(&'static str),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
