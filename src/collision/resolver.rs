use glam::Vec2;

use crate::collision::narrowphase::Contact;
use crate::core::{Body, BoundaryResponse, Bounds, Environment, Motion};

/// Impulse-based velocity correction with positional de-penetration.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Resolves one overlapping pair. Returns the applied impulse magnitude,
    /// or `None` when the bodies were already separating.
    ///
    /// Velocities receive the restitution impulse; positions are pushed apart
    /// by the full overlap, split so the lighter body moves more. Without the
    /// positional term, repeated shallow penetrations accumulate and bodies
    /// slowly sink into each other.
    pub fn resolve_contact(
        a: &mut Body,
        b: &mut Body,
        contact: &Contact,
        environment: &Environment,
    ) -> Option<f32> {
        let normal = contact.normal;
        let relative = Self::velocity(b).dot(normal) - Self::velocity(a).dot(normal);
        if relative > 0.0 {
            return None;
        }

        let inverse_mass_sum = 1.0 / a.mass + 1.0 / b.mass;
        let impulse = -(1.0 + environment.restitution) * relative / inverse_mass_sum;

        Self::add_velocity(a, -impulse / a.mass * normal);
        Self::add_velocity(b, impulse / b.mass * normal);

        if environment.collision_damping < 1.0 {
            Self::scale_velocity(a, environment.collision_damping);
            Self::scale_velocity(b, environment.collision_damping);
        }

        let total_mass = a.mass + b.mass;
        Self::shift_position(a, -(contact.depth * b.mass / total_mass) * normal);
        Self::shift_position(b, (contact.depth * a.mass / total_mass) * normal);

        Some(impulse)
    }

    /// Applies end-stop and container-wall constraints to one body.
    /// Returns the number of boundary hits handled.
    pub fn resolve_boundaries(
        body: &mut Body,
        bounds: Option<&Bounds>,
        environment: &Environment,
    ) -> u32 {
        match &mut body.motion {
            Motion::Translating {
                position,
                velocity,
                axis: Some(axis),
                ..
            } => {
                let direction = axis.direction();
                let mut coord = (*position - axis.origin).dot(direction);
                let mut speed = velocity.dot(direction);
                let hits = Self::apply_end_stops(&mut coord, &mut speed, axis.length, axis);

                if hits > 0 {
                    *position = axis.origin + coord * direction;
                    *velocity = speed * direction;
                }
                hits
            }
            Motion::Rolling {
                distance,
                speed,
                axis,
                ..
            } => {
                let axis = *axis;
                Self::apply_end_stops(distance, speed, axis.length, &axis)
            }
            Motion::Translating {
                position,
                velocity,
                radius,
                axis: None,
            } => {
                let Some(bounds) = bounds else {
                    return 0;
                };
                let restitution = environment.wall_restitution();
                let mut hits = 0;

                if position.x - *radius < bounds.min.x {
                    position.x = bounds.min.x + *radius;
                    velocity.x = velocity.x.abs() * restitution;
                    hits += 1;
                } else if position.x + *radius > bounds.max.x {
                    position.x = bounds.max.x - *radius;
                    velocity.x = -velocity.x.abs() * restitution;
                    hits += 1;
                }

                if position.y - *radius < bounds.min.y {
                    position.y = bounds.min.y + *radius;
                    velocity.y = velocity.y.abs() * restitution;
                    hits += 1;
                } else if position.y + *radius > bounds.max.y {
                    position.y = bounds.max.y - *radius;
                    velocity.y = -velocity.y.abs() * restitution;
                    hits += 1;
                }

                hits
            }
            Motion::Pivoted { .. } => 0,
        }
    }

    fn apply_end_stops(
        coord: &mut f32,
        speed: &mut f32,
        length: f32,
        axis: &crate::core::ConstraintAxis,
    ) -> u32 {
        if *coord < 0.0 {
            *coord = 0.0;
            Self::apply_stop(speed, axis.min_stop, -1.0);
            1
        } else if *coord > length {
            *coord = length;
            Self::apply_stop(speed, axis.max_stop, 1.0);
            1
        } else {
            0
        }
    }

    fn apply_stop(speed: &mut f32, response: BoundaryResponse, outward: f32) {
        match response {
            BoundaryResponse::Bounce { damping } => {
                // Only reflect motion heading into the stop.
                if *speed * outward > 0.0 {
                    *speed = -*speed * damping;
                }
            }
            BoundaryResponse::Absorb => *speed = 0.0,
        }
    }

    fn velocity(body: &Body) -> Vec2 {
        match &body.motion {
            Motion::Translating { velocity, .. } => *velocity,
            Motion::Rolling { speed, axis, .. } => *speed * axis.direction(),
            Motion::Pivoted { .. } => Vec2::ZERO,
        }
    }

    fn add_velocity(body: &mut Body, delta: Vec2) {
        match &mut body.motion {
            Motion::Translating {
                velocity,
                axis: Some(axis),
                ..
            } => {
                let direction = axis.direction();
                *velocity += delta.dot(direction) * direction;
            }
            Motion::Translating {
                velocity,
                axis: None,
                ..
            } => *velocity += delta,
            Motion::Rolling { speed, axis, .. } => {
                *speed += delta.dot(axis.direction());
            }
            Motion::Pivoted { .. } => {}
        }
    }

    fn scale_velocity(body: &mut Body, factor: f32) {
        match &mut body.motion {
            Motion::Translating { velocity, .. } => *velocity *= factor,
            Motion::Rolling { speed, .. } => *speed *= factor,
            Motion::Pivoted { .. } => {}
        }
    }

    fn shift_position(body: &mut Body, delta: Vec2) {
        match &mut body.motion {
            Motion::Translating {
                position,
                axis: Some(axis),
                ..
            } => {
                let direction = axis.direction();
                *position += delta.dot(direction) * direction;
            }
            Motion::Translating {
                position,
                axis: None,
                ..
            } => *position += delta,
            Motion::Rolling { distance, axis, .. } => {
                *distance += delta.dot(axis.direction());
            }
            Motion::Pivoted { .. } => {}
        }
    }
}
