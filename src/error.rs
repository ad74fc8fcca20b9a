//! Error types for the Mechanica engine.
//!
//! Only configuration mistakes surface to the caller. Transient geometric
//! degeneracies (coincident bodies, zero-length arms) are recovered locally by
//! skipping the affected resolution for that tick.

use crate::utils::BodyId;
use std::fmt;

/// Rejection raised at the configuration boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A body was described with zero or negative mass.
    NonPositiveMass(f32),
    /// A body was described with zero or negative radius or extent.
    NonPositiveRadius(f32),
    /// An applied force was given a negative magnitude.
    NegativeForceMagnitude(f32),
    /// A kinematic override does not match the body's motion variant.
    KinematicsMismatch,
    /// The referenced body does not exist (or was removed).
    UnknownBody(BodyId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NonPositiveMass(mass) => write!(f, "mass must be positive, got {mass}"),
            Self::NonPositiveRadius(radius) => {
                write!(f, "radius must be positive, got {radius}")
            }
            Self::NegativeForceMagnitude(magnitude) => {
                write!(f, "force magnitude must be non-negative, got {magnitude}")
            }
            Self::KinematicsMismatch => {
                write!(f, "kinematic override does not match the body's motion")
            }
            Self::UnknownBody(id) => write!(f, "no body with id {id:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Convenient result alias used across the engine API.
pub type Result<T> = std::result::Result<T, ConfigError>;
