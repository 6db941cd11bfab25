#![forbid(unsafe_code)]

//! Core domain model for the Trainingsplan workout tracker.
//!
//! This crate provides:
//! - Domain types (plans, exercises, logged entries)
//! - The plan collection and its mutation interface
//! - Form input validation
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod input;
pub mod book;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use input::{EntryForm, ExerciseForm, Field, ValidationError};
pub use book::PlanBook;
pub use config::{Config, DisplayConfig, InputConfig};
