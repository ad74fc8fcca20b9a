use std::collections::HashMap;

use crate::{
    collision::{CollisionResolver, NarrowPhase},
    core::{Body, BodySpec, Bounds, ContactState, Environment, Kinematics},
    dynamics::{
        forces::{self, ForceRegistry, Load},
        friction::{self, FrictionEvent},
        Integrator,
    },
    error::{ConfigError, Result},
    utils::{logging::ScopedTimer, Arena, BodyId},
};
use log::warn;

pub mod observables;

/// Counters describing what the last step actually did.
///
/// Cheap to keep every frame and handy for demo overlays and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepMetrics {
    pub bodies_stepped: usize,
    pub contacts_resolved: usize,
    pub boundary_hits: usize,
    pub held_static: usize,
    pub broke_loose: usize,
    pub came_to_rest: usize,
    pub normal_impulse_sum: f32,
}

impl StepMetrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_friction(&mut self, event: FrictionEvent) {
        match event {
            FrictionEvent::Held => self.held_static += 1,
            FrictionEvent::BrokeLoose => self.broke_loose += 1,
            FrictionEvent::CameToRest => self.came_to_rest += 1,
            FrictionEvent::Sliding | FrictionEvent::NotApplicable => {}
        }
    }
}

/// Central simulation container owning all body and environment state.
///
/// One call to [`SimulationWorld::step`] advances every body by exactly one
/// bounded timestep: force accumulation, stick/slip friction, semi-implicit
/// integration, then pair and boundary collision resolution. The world never
/// schedules itself; the embedding layer owns the frame loop.
pub struct SimulationWorld {
    bodies: Arena<Body>,
    environment: Environment,
    integrator: Integrator,
    force_registry: ForceRegistry,
    bounds: Option<Bounds>,
    metrics: StepMetrics,
}

impl Default for SimulationWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationWorld {
    pub fn new() -> Self {
        Self::with_environment(Environment::default())
    }

    pub fn with_environment(environment: Environment) -> Self {
        Self {
            bodies: Arena::new(),
            integrator: Integrator::new(environment.max_time_step),
            environment,
            force_registry: ForceRegistry::new(),
            bounds: None,
            metrics: StepMetrics::default(),
        }
    }

    /// Registers a body after validating its description.
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId> {
        spec.validate()?;
        let id = self.bodies.insert(spec.into_body(BodyId::default()));
        if let Some(stored) = self.bodies.get_mut(id) {
            stored.id = id;
        }
        Ok(id)
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<()> {
        self.bodies
            .remove(id)
            .map(|_| ())
            .ok_or(ConfigError::UnknownBody(id))
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Creates or updates a user force on a body.
    pub fn set_applied_force(
        &mut self,
        id: BodyId,
        force_id: u32,
        magnitude: f32,
        angle: f32,
    ) -> Result<()> {
        if magnitude < 0.0 {
            return Err(ConfigError::NegativeForceMagnitude(magnitude));
        }
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(ConfigError::UnknownBody(id))?;

        if let Some(force) = body.applied_forces.iter_mut().find(|f| f.id == force_id) {
            force.magnitude = magnitude;
            force.angle = angle;
        } else {
            body.applied_forces.push(crate::core::AppliedForce {
                id: force_id,
                magnitude,
                angle,
            });
        }
        Ok(())
    }

    pub fn remove_applied_force(&mut self, id: BodyId, force_id: u32) -> Result<()> {
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(ConfigError::UnknownBody(id))?;
        body.applied_forces.retain(|f| f.id != force_id);
        Ok(())
    }

    pub fn clear_applied_forces(&mut self, id: BodyId) -> Result<()> {
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(ConfigError::UnknownBody(id))?;
        body.applied_forces.clear();
        Ok(())
    }

    /// Swaps the scene constants; takes effect on the next step.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
        self.integrator.set_max_dt(environment.max_time_step);
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Container walls for free-moving bodies, or `None` for an open scene.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    /// Direct kinematic override for drag interactions. Only call while the
    /// frame loop is paused; the engine owns body state during a step.
    pub fn set_body_kinematics(&mut self, id: BodyId, kinematics: Kinematics) -> Result<()> {
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(ConfigError::UnknownBody(id))?;
        body.set_kinematics(kinematics)
    }

    /// Registry of spring/drag style force generators.
    pub fn force_registry_mut(&mut self) -> &mut ForceRegistry {
        &mut self.force_registry
    }

    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// Net load currently acting on a body, friction excluded. Read-only
    /// recomputation for force readouts and overlays.
    pub fn load_profile(&self, id: BodyId) -> Option<Load> {
        self.bodies
            .get(id)
            .map(|body| forces::accumulate(body, &self.environment, &self.force_registry))
    }

    /// Advances all bodies by one bounded step.
    ///
    /// A zero or negative `dt` leaves every body untouched. The call never
    /// loops internally to catch up lost frames.
    pub fn step(&mut self, dt: f32) {
        let dt = self.integrator.clamp_dt(dt);
        if dt <= 0.0 {
            return;
        }
        self.metrics.reset();

        let ids: Vec<BodyId> = self.bodies.ids().collect();

        {
            let _timer = ScopedTimer::new("dynamics");
            self.advance_bodies(&ids, dt);
        }
        {
            let _timer = ScopedTimer::new("collisions");
            self.resolve_pairs(&ids);
        }
        {
            let _timer = ScopedTimer::new("boundaries");
            for &id in &ids {
                if let Some(body) = self.bodies.get_mut(id) {
                    self.metrics.boundary_hits += CollisionResolver::resolve_boundaries(
                        body,
                        self.bounds.as_ref(),
                        &self.environment,
                    ) as usize;
                }
            }
        }

        self.audit_finiteness();
    }

    /// Forces, friction, and integration. Per-body loads are independent of
    /// other bodies' positions, so a single in-place pass is safe; pivoted
    /// bodies are the exception and are advanced per shared-pivot assembly.
    fn advance_bodies(&mut self, ids: &[BodyId], dt: f32) {
        // Shared-pivot assemblies rotate as one rigid system.
        let mut assemblies: HashMap<(u32, u32), (f32, f32, Vec<BodyId>)> = HashMap::new();

        for &id in ids {
            let Some(body) = self.bodies.get(id) else {
                continue;
            };

            let load = forces::accumulate(body, &self.environment, &self.force_registry);
            match load {
                Load::Angular { torque, inertia } => {
                    let crate::core::Motion::Pivoted { pivot, .. } = &body.motion else {
                        continue;
                    };
                    let key = (pivot.x.to_bits(), pivot.y.to_bits());
                    let entry = assemblies.entry(key).or_insert((0.0, 0.0, Vec::new()));
                    entry.0 += torque;
                    entry.1 += inertia;
                    entry.2.push(id);
                }
                _ => {
                    let body = self.bodies.get_mut(id).expect("id collected above");
                    // Surface contact follows the reaction force: a dragged
                    // block re-sticks on its next step, a pulled-off block
                    // sheds friction until it presses down again.
                    if let Load::Axial { normal, .. } = load {
                        body.contact_state = if normal > 0.0 {
                            ContactState::Resting
                        } else {
                            ContactState::Free
                        };
                    }
                    let (load, event) = friction::resolve(body, load, &self.environment);
                    self.metrics.record_friction(event);
                    self.integrator.integrate(body, &load, dt);
                    self.metrics.bodies_stepped += 1;
                }
            }
        }

        for (torque, inertia, members) in assemblies.into_values() {
            // A zero-length arm with a force on it has no usable inertia;
            // skip the assembly for this tick rather than divide by zero.
            if inertia <= f32::EPSILON {
                continue;
            }
            let angular_accel = torque / inertia;
            for id in members {
                if let Some(body) = self.bodies.get_mut(id) {
                    self.integrator.integrate_pivoted(body, angular_accel, dt);
                    self.metrics.bodies_stepped += 1;
                }
            }
        }
    }

    /// Full pair scan over current positions. The handful of bodies a demo
    /// holds never justifies a broadphase.
    fn resolve_pairs(&mut self, ids: &[BodyId]) {
        for (index, &id_a) in ids.iter().enumerate() {
            for &id_b in &ids[index + 1..] {
                let Some((body_a, body_b)) = self.bodies.get2_mut(id_a, id_b) else {
                    continue;
                };
                let Some(contact) = NarrowPhase::collide(body_a, body_b) else {
                    continue;
                };
                if let Some(impulse) = CollisionResolver::resolve_contact(
                    body_a,
                    body_b,
                    &contact,
                    &self.environment,
                ) {
                    self.metrics.contacts_resolved += 1;
                    self.metrics.normal_impulse_sum += impulse.abs();
                }
            }
        }
    }

    /// Correct inputs cannot produce non-finite state under a clamped
    /// timestep; treat it as a programming error, not a runtime condition.
    fn audit_finiteness(&self) {
        for body in self.bodies.iter() {
            if !body.is_finite() {
                warn!("body {:?} has non-finite state after step", body.id);
                debug_assert!(false, "non-finite body state");
            }
        }
    }
}
