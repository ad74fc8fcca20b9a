//! Simulation dynamics: force accumulation, stick/slip friction, integration.

pub mod forces;
pub mod friction;
pub mod integrator;

pub use forces::{DragForce, ForceGenerator, ForceRegistry, Load, SpringForce};
pub use integrator::Integrator;
