//! Read-only derived quantities for display panels.
//!
//! Closed-form evaluations over current body state: no simulation state of
//! their own, safe to call between steps at any time.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::core::{Body, Environment, Motion};

/// Kinetic energy, including the rotational share of a rolling body.
pub fn kinetic_energy(body: &Body) -> f32 {
    match &body.motion {
        Motion::Translating { velocity, .. } => 0.5 * body.mass * velocity.length_squared(),
        Motion::Pivoted {
            angular_velocity, ..
        } => 0.5 * body.moment_of_inertia() * angular_velocity * angular_velocity,
        Motion::Rolling { speed, shape, .. } => {
            0.5 * body.mass * speed * speed * (1.0 + shape.factor())
        }
    }
}

/// Gravitational potential energy relative to world height zero.
pub fn potential_energy(body: &Body, environment: &Environment) -> f32 {
    body.mass * environment.gravity * body.world_position().y
}

pub fn mechanical_energy(body: &Body, environment: &Environment) -> f32 {
    kinetic_energy(body) + potential_energy(body, environment)
}

/// Linear momentum of the body's center of mass.
pub fn momentum(body: &Body) -> Vec2 {
    match &body.motion {
        Motion::Translating { velocity, .. } => body.mass * *velocity,
        Motion::Pivoted {
            angle,
            angular_velocity,
            arm,
            ..
        } => {
            let tangent = Vec2::new(angle.cos(), angle.sin());
            body.mass * angular_velocity * arm * tangent
        }
        Motion::Rolling { speed, axis, .. } => body.mass * *speed * axis.direction(),
    }
}

/// Small-angle period of a pendulum of length `arm`.
pub fn pendulum_period(arm: f32, gravity: f32) -> f32 {
    TAU * (arm.abs() / gravity).sqrt()
}

/// Natural period of a mass on a Hookean spring.
pub fn spring_period(mass: f32, stiffness: f32) -> f32 {
    TAU * (mass / stiffness).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BodySpec, ConstraintAxis, RollingShape};
    use crate::utils::BodyId;
    use approx::assert_relative_eq;

    #[test]
    fn rolling_energy_includes_rotation() {
        let axis = ConstraintAxis::new(Vec2::ZERO, -0.3, 10.0);
        let mut body =
            BodySpec::rolling(2.0, 0.5, RollingShape::Hoop, axis).into_body(BodyId::default());
        if let Motion::Rolling { speed, .. } = &mut body.motion {
            *speed = 3.0;
        }

        // A hoop carries as much rotational as translational energy.
        assert_relative_eq!(kinetic_energy(&body), 2.0 * 0.5 * 2.0 * 9.0, epsilon = 1e-4);
    }

    #[test]
    fn two_second_pendulum_length() {
        // The classic one-meter pendulum swings close to two seconds.
        let period = pendulum_period(1.0, 9.8);
        assert_relative_eq!(period, 2.007, epsilon = 1e-3);
    }

    #[test]
    fn potential_energy_tracks_bob_height() {
        let body = BodySpec::pivoted(1.0, Vec2::new(0.0, 2.0), 1.0, 0.0)
            .into_body(BodyId::default());
        let environment = Environment::default();
        assert_relative_eq!(
            potential_energy(&body, &environment),
            9.8,
            epsilon = 1e-3
        );
    }
}
