//! Collision handling: pair detection and impulse-based resolution.

pub mod narrowphase;
pub mod resolver;

pub use narrowphase::{Contact, NarrowPhase};
pub use resolver::CollisionResolver;
