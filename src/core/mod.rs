//! Core types describing simulated entities and shared environment data.

pub mod body;
pub mod types;

pub use body::{Body, BodySpec, Kinematics, Motion};
pub use types::{
    AppliedForce, BoundaryResponse, Bounds, ConstraintAxis, ContactState, Environment,
    FrictionState, RollingShape,
};
