use glam::Vec2;

use crate::core::{Body, Environment, Motion};
use crate::utils::math::perp;
use crate::utils::BodyId;

/// Net load on one body for one step, friction excluded.
///
/// The variant mirrors the body's kinematic mode; the friction resolver only
/// touches `Axial`, and `Angular` loads of a shared pivot are summed before
/// integration.
#[derive(Debug, Clone, Copy)]
pub enum Load {
    /// World-frame net force on an unconstrained point mass.
    Free { force: Vec2 },
    /// Net force along a constraint axis, with the surface reaction split out.
    ///
    /// `normal` is already clamped at zero: a body being pulled off its
    /// surface gets no reaction and no friction for this step. `grip` is the
    /// static friction bound μ·normal.
    Axial { tangential: f32, normal: f32, grip: f32 },
    /// Net torque about a pivot and the member's own m·r² inertia.
    Angular { torque: f32, inertia: f32 },
    /// Closed-form acceleration of a body rolling without slipping.
    Rolling { accel: f32 },
}

/// External force source applied to translating bodies each step.
pub trait ForceGenerator: Send + Sync {
    fn force(&self, body: &Body, environment: &Environment) -> Vec2;
}

/// Hookean spring tying a body to a fixed anchor, with viscous damping.
pub struct SpringForce {
    pub anchor: Vec2,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl ForceGenerator for SpringForce {
    fn force(&self, body: &Body, _environment: &Environment) -> Vec2 {
        let Motion::Translating {
            position, velocity, ..
        } = &body.motion
        else {
            return Vec2::ZERO;
        };

        let displacement = *position - self.anchor;
        let distance = displacement.length();
        if distance < 1e-6 {
            return -self.damping * *velocity;
        }

        let extension = distance - self.rest_length;
        let spring = -self.stiffness * extension * (displacement / distance);
        spring - self.damping * *velocity
    }
}

/// Quadratic drag resisting the direction of motion.
pub struct DragForce {
    pub coefficient: f32,
}

impl ForceGenerator for DragForce {
    fn force(&self, body: &Body, _environment: &Environment) -> Vec2 {
        let Motion::Translating { velocity, .. } = &body.motion else {
            return Vec2::ZERO;
        };

        let speed = velocity.length();
        if speed < 1e-6 {
            return Vec2::ZERO;
        }

        -velocity.normalize() * speed * speed * self.coefficient
    }
}

/// Collection of force generators applied each step, globally or per body.
#[derive(Default)]
pub struct ForceRegistry {
    entries: Vec<(Option<BodyId>, Box<dyn ForceGenerator>)>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a generator affecting every translating body.
    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.entries.push((None, Box::new(force)));
    }

    /// Adds a generator affecting a single body, e.g. a spring on one mass.
    pub fn add_targeted<F: ForceGenerator + 'static>(&mut self, id: BodyId, force: F) {
        self.entries.push((Some(id), Box::new(force)));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn total_for(&self, body: &Body, environment: &Environment) -> Vec2 {
        self.entries
            .iter()
            .filter(|(target, _)| target.map_or(true, |id| id == body.id))
            .map(|(_, generator)| generator.force(body, environment))
            .sum()
    }
}

/// Resolves gravity, applied forces, and registry generators into the net
/// load on `body`, excluding friction.
pub fn accumulate(body: &Body, environment: &Environment, registry: &ForceRegistry) -> Load {
    let weight = Vec2::new(0.0, -body.mass * environment.gravity);
    let external: Vec2 = body
        .applied_forces
        .iter()
        .map(|force| force.vector())
        .sum::<Vec2>()
        + registry.total_for(body, environment);

    match &body.motion {
        Motion::Translating { axis: None, .. } => Load::Free {
            force: weight + external,
        },
        Motion::Translating {
            axis: Some(axis), ..
        } => {
            let direction = axis.direction();
            let surface_normal = perp(direction);
            let total = weight + external;

            let tangential = total.dot(direction);
            // Reaction pushes back only while the body presses into the
            // surface; a lift-off leaves zero normal and zero friction.
            let normal = (-total.dot(surface_normal)).max(0.0);

            Load::Axial {
                tangential,
                normal,
                grip: environment.friction * normal,
            }
        }
        Motion::Pivoted { angle, arm, .. } => {
            let tangent = Vec2::new(angle.cos(), angle.sin());
            let torque = *arm * (weight + external).dot(tangent);
            Load::Angular {
                torque,
                inertia: body.moment_of_inertia(),
            }
        }
        Motion::Rolling { shape, axis, .. } => Load::Rolling {
            accel: -environment.gravity * axis.angle.sin() / (1.0 + shape.factor()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AppliedForce, BodySpec, ConstraintAxis, RollingShape};
    use crate::utils::BodyId;
    use approx::assert_relative_eq;

    fn environment() -> Environment {
        Environment {
            gravity: 9.8,
            friction: 0.5,
            ..Environment::default()
        }
    }

    #[test]
    fn incline_load_decomposes_weight() {
        let angle = 30.0_f32.to_radians();
        let axis = ConstraintAxis::new(Vec2::ZERO, angle, 12.0);
        let body = BodySpec::on_axis(5.0, 0.5, axis, 2.0).into_body(BodyId::default());

        let load = accumulate(&body, &environment(), &ForceRegistry::new());
        let Load::Axial {
            tangential,
            normal,
            grip,
        } = load
        else {
            panic!("expected axial load");
        };

        assert_relative_eq!(tangential, -5.0 * 9.8 * angle.sin(), epsilon = 1e-4);
        assert_relative_eq!(normal, 5.0 * 9.8 * angle.cos(), epsilon = 1e-4);
        assert_relative_eq!(grip, 0.5 * normal, epsilon = 1e-4);
    }

    #[test]
    fn pull_off_force_zeroes_normal_and_grip() {
        let axis = ConstraintAxis::new(Vec2::ZERO, 0.0, 12.0);
        let mut body = BodySpec::on_axis(1.0, 0.5, axis, 2.0).into_body(BodyId::default());
        body.applied_forces.push(AppliedForce {
            id: 0,
            magnitude: 100.0,
            angle: std::f32::consts::FRAC_PI_2,
        });

        let load = accumulate(&body, &environment(), &ForceRegistry::new());
        let Load::Axial { normal, grip, .. } = load else {
            panic!("expected axial load");
        };

        assert_eq!(normal, 0.0);
        assert_eq!(grip, 0.0);
    }

    #[test]
    fn vertical_axis_has_no_normal_force() {
        let axis = ConstraintAxis::new(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 10.0);
        let body = BodySpec::on_axis(2.0, 0.5, axis, 1.0).into_body(BodyId::default());

        let Load::Axial {
            tangential, normal, ..
        } = accumulate(&body, &environment(), &ForceRegistry::new())
        else {
            panic!("expected axial load");
        };

        assert_relative_eq!(tangential, -2.0 * 9.8, epsilon = 1e-4);
        assert_relative_eq!(normal, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn hanging_pendulum_has_zero_torque() {
        let body =
            BodySpec::pivoted(1.0, Vec2::new(0.0, 4.0), 2.0, 0.0).into_body(BodyId::default());
        let Load::Angular { torque, inertia } =
            accumulate(&body, &environment(), &ForceRegistry::new())
        else {
            panic!("expected angular load");
        };

        assert_relative_eq!(torque, 0.0, epsilon = 1e-5);
        assert_relative_eq!(inertia, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn displaced_pendulum_torque_restores() {
        let angle = 0.3;
        let body =
            BodySpec::pivoted(2.0, Vec2::ZERO, 1.5, angle).into_body(BodyId::default());
        let Load::Angular { torque, .. } =
            accumulate(&body, &environment(), &ForceRegistry::new())
        else {
            panic!("expected angular load");
        };

        assert_relative_eq!(torque, -2.0 * 9.8 * 1.5 * angle.sin(), epsilon = 1e-4);
    }

    #[test]
    fn rolling_accel_uses_shape_factor() {
        let angle = -0.35;
        let axis = ConstraintAxis::new(Vec2::ZERO, angle, 10.0);
        let sphere = BodySpec::rolling(1.0, 0.2, RollingShape::SolidSphere, axis)
            .into_body(BodyId::default());

        let Load::Rolling { accel } = accumulate(&sphere, &environment(), &ForceRegistry::new())
        else {
            panic!("expected rolling load");
        };

        assert_relative_eq!(accel, 9.8 * 0.35_f32.sin() / 1.4, epsilon = 1e-3);
    }

    #[test]
    fn drag_opposes_motion_quadratically() {
        let mut body = BodySpec::free(1.0, 0.2, Vec2::ZERO).into_body(BodyId::default());
        if let crate::core::Motion::Translating { velocity, .. } = &mut body.motion {
            *velocity = Vec2::new(3.0, 0.0);
        }
        let drag = DragForce { coefficient: 0.5 };

        let force = drag.force(&body, &environment());
        assert_relative_eq!(force.x, -0.5 * 9.0, epsilon = 1e-4);
        assert_relative_eq!(force.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn targeted_spring_only_pulls_its_body() {
        let mut registry = ForceRegistry::new();
        let sprung_id = BodyId::new(0, 0);
        let other_id = BodyId::new(1, 0);
        let sprung = BodySpec::free(1.0, 0.2, Vec2::new(2.0, 0.0)).into_body(sprung_id);
        let free = BodySpec::free(1.0, 0.2, Vec2::new(2.0, 0.0)).into_body(other_id);

        registry.add_targeted(
            sprung_id,
            SpringForce {
                anchor: Vec2::ZERO,
                rest_length: 0.0,
                stiffness: 10.0,
                damping: 0.0,
            },
        );

        let env = environment();
        let pulled = registry.total_for(&sprung, &env);
        let untouched = registry.total_for(&free, &env);

        assert_relative_eq!(pulled.x, -20.0, epsilon = 1e-4);
        assert_eq!(untouched, Vec2::ZERO);
    }
}
