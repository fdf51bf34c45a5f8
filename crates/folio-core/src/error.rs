use thiserror::Error;

/// Errors raised by scene setup. Per-tick updates never fail.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("smoothing factor {0} outside (0, 1)")]
    InvalidSmoothingFactor(f32),

    #[error("invalid terrain parameters: {0}")]
    InvalidTerrain(&'static str),

    #[error("malformed project list: {0}")]
    ProjectList(#[from] serde_json::Error),

    #[error("visualization is already active")]
    AlreadyActive,
}

pub type Result<T> = std::result::Result<T, CoreError>;
