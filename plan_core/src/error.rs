//! Error types for the plan_core library.

use crate::input::ValidationError;
use crate::types::{ExerciseId, PlanId};
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for plan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Form input was rejected
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No plan with this id in the collection
    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),

    /// No exercise with this id in the plan
    #[error("Exercise not found: {0}")]
    ExerciseNotFound(ExerciseId),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
