use glam::Vec2;

use crate::core::{Body, Motion};
use crate::dynamics::forces::Load;
use crate::utils::math::wrap_angle;

/// Advances body state with semi-implicit Euler under a clamped timestep.
///
/// Velocity is updated first and the position update uses the new velocity.
/// For the oscillatory systems this engine serves (pendulum, spring) that
/// ordering is markedly more stable than explicit Euler at the same cost.
#[derive(Debug, Clone)]
pub struct Integrator {
    max_dt: f32,
}

impl Integrator {
    pub fn new(max_dt: f32) -> Self {
        Self { max_dt }
    }

    /// Bounds the elapsed time consumed by one step. Slow frames and tab
    /// resumes hand in large dt values; integrating them raw would blow up.
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_dt)
    }

    pub fn set_max_dt(&mut self, max_dt: f32) {
        self.max_dt = max_dt;
    }

    /// Advances a translating or rolling body by `dt` under `load`.
    ///
    /// Pivoted bodies go through [`Integrator::integrate_pivoted`] instead,
    /// because their angular acceleration is shared across an assembly.
    pub fn integrate(&self, body: &mut Body, load: &Load, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let damping = body.damping;
        let inverse_mass = 1.0 / body.mass;

        match (&mut body.motion, load) {
            (
                Motion::Translating {
                    position,
                    velocity,
                    axis: None,
                    ..
                },
                Load::Free { force },
            ) => {
                *velocity += *force * inverse_mass * dt;
                *velocity *= damping;
                *position += *velocity * dt;
            }
            (
                Motion::Translating {
                    position,
                    velocity,
                    axis: Some(axis),
                    ..
                },
                Load::Axial { tangential, .. },
            ) => {
                let direction = axis.direction();
                let mut speed = velocity.dot(direction);
                speed += tangential * inverse_mass * dt;
                speed *= damping;

                if speed == 0.0 {
                    // A held body must stay put exactly; reprojecting its
                    // position would let rounding creep in step after step.
                    *velocity = Vec2::ZERO;
                } else {
                    let coord = (*position - axis.origin).dot(direction) + speed * dt;
                    *position = axis.origin + coord * direction;
                    *velocity = speed * direction;
                }
            }
            (
                Motion::Rolling {
                    distance,
                    speed,
                    rotation,
                    radius,
                    ..
                },
                Load::Rolling { accel },
            ) => {
                *speed += accel * dt;
                *speed *= damping;
                *distance += *speed * dt;
                // Rolling without slipping: angular velocity is derived from
                // the constraint every step, never integrated on its own.
                let angular_velocity = *speed / *radius;
                *rotation = wrap_angle(*rotation + angular_velocity * dt);
            }
            _ => debug_assert!(false, "load variant does not match body motion"),
        }
    }

    /// Advances one member of a pivot assembly given the assembly's shared
    /// angular acceleration.
    pub fn integrate_pivoted(&self, body: &mut Body, angular_accel: f32, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let damping = body.damping;
        if let Motion::Pivoted {
            angle,
            angular_velocity,
            ..
        } = &mut body.motion
        {
            *angular_velocity += angular_accel * dt;
            *angular_velocity *= damping;
            *angle = wrap_angle(*angle + *angular_velocity * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BodySpec, ConstraintAxis, RollingShape};
    use crate::utils::BodyId;
    use approx::assert_relative_eq;
    use glam::Vec2;

    #[test]
    fn free_fall_uses_updated_velocity_for_position() {
        let integrator = Integrator::new(1.0 / 30.0);
        let mut body = BodySpec::free(2.0, 0.2, Vec2::ZERO).into_body(BodyId::default());
        let load = Load::Free {
            force: Vec2::new(0.0, -2.0 * 9.8),
        };

        let dt = 0.01;
        integrator.integrate(&mut body, &load, dt);

        let Motion::Translating {
            position, velocity, ..
        } = &body.motion
        else {
            unreachable!()
        };
        // Semi-implicit: x picks up the full v(t+dt), not the average.
        assert_relative_eq!(velocity.y, -9.8 * dt, epsilon = 1e-5);
        assert_relative_eq!(position.y, -9.8 * dt * dt, epsilon = 1e-6);
    }

    #[test]
    fn dt_is_clamped_to_the_configured_bound() {
        let integrator = Integrator::new(1.0 / 30.0);
        assert_relative_eq!(integrator.clamp_dt(10.0), 1.0 / 30.0, epsilon = 1e-6);
        assert_eq!(integrator.clamp_dt(-1.0), 0.0);
    }

    #[test]
    fn rolling_angular_velocity_tracks_constraint() {
        let integrator = Integrator::new(1.0 / 30.0);
        let axis = ConstraintAxis::new(Vec2::ZERO, -0.3, 10.0);
        let mut body =
            BodySpec::rolling(1.0, 0.25, RollingShape::SolidDisk, axis).into_body(BodyId::default());

        integrator.integrate(&mut body, &Load::Rolling { accel: 2.0 }, 0.5);

        let Motion::Rolling {
            speed, rotation, ..
        } = &body.motion
        else {
            unreachable!()
        };
        assert_relative_eq!(*speed, 1.0, epsilon = 1e-5);
        assert_relative_eq!(*rotation, (1.0 / 0.25) * 0.5, epsilon = 1e-4);
    }

    #[test]
    fn pivot_angle_is_renormalized() {
        let integrator = Integrator::new(1.0 / 30.0);
        let mut body = BodySpec::pivoted(1.0, Vec2::ZERO, 1.0, 3.1).into_body(BodyId::default());

        // Large angular velocity pushes the angle past π within one step.
        if let Motion::Pivoted {
            angular_velocity, ..
        } = &mut body.motion
        {
            *angular_velocity = 10.0;
        }
        integrator.integrate_pivoted(&mut body, 0.0, 0.02);

        let Motion::Pivoted { angle, .. } = &body.motion else {
            unreachable!()
        };
        assert!(*angle > -std::f32::consts::PI && *angle <= std::f32::consts::PI);
        assert!(*angle < 0.0, "expected wrap past π to the negative side");
    }
}
