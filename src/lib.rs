//! Mechanica – deterministic simulation core for interactive physics demos.
//!
//! This crate is the numerical heart shared by a family of classroom demos
//! (incline, pendulum, collisions, springs, rolling races): fixed-timestep
//! semi-implicit integration, stick/slip friction, and impulse-based
//! collision response. Rendering, input, and scheduling live entirely in the
//! embedding layer; the engine exposes one `step(dt)` call and a small query
//! surface and never schedules itself.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{CollisionResolver, Contact, NarrowPhase};
pub use crate::core::{
    AppliedForce, Body, BodySpec, BoundaryResponse, Bounds, ConstraintAxis, ContactState,
    Environment, FrictionState, Kinematics, Motion, RollingShape,
};
pub use dynamics::{DragForce, ForceGenerator, ForceRegistry, Integrator, Load, SpringForce};
pub use error::{ConfigError, Result};
pub use utils::{Arena, BodyId};
pub use world::{observables, SimulationWorld, StepMetrics};

/// High-level convenience wrapper that owns a [`SimulationWorld`].
pub struct SimulationEngine {
    world: SimulationWorld,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine {
    /// Creates an engine with default environment constants.
    pub fn new() -> Self {
        Self {
            world: SimulationWorld::new(),
        }
    }

    /// Creates an engine with scene-specific constants.
    pub fn with_environment(environment: Environment) -> Self {
        Self {
            world: SimulationWorld::with_environment(environment),
        }
    }

    /// Adds a body to the world and returns its generated [`BodyId`].
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId> {
        self.world.add_body(spec)
    }

    /// Removes a body; its id is never reused for a later body.
    pub fn remove_body(&mut self, id: BodyId) -> Result<()> {
        self.world.remove_body(id)
    }

    /// Advances the simulation by the provided delta time, bounded by the
    /// environment's maximum timestep.
    pub fn step(&mut self, dt: f32) {
        self.world.step(dt);
    }

    /// Immutable access to a body by id.
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.world.body(id)
    }

    pub fn world(&self) -> &SimulationWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut SimulationWorld {
        &mut self.world
    }
}
