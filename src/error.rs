//! Error types for parameter validation, loading and IRR solving

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

/// Why an IRR could not be computed
///
/// Kept separate from [`Error`]: an unsolvable IRR is reported as an undefined
/// value in the results, not as a failed simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IrrError {
    #[error("no cash flows")]
    Empty,

    #[error("all cash flows are zero")]
    AllZero,

    #[error("cash flows never change sign")]
    NoSignChange,

    #[error("IRR did not converge after {iterations} iterations")]
    NonConvergent { iterations: u32 },
}
