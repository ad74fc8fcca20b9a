use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::types::{AppliedForce, ConstraintAxis, ContactState, FrictionState, RollingShape};
use crate::error::ConfigError;
use crate::utils::BodyId;

/// Kinematic mode of a body, carrying the state that mode actually needs.
///
/// The variant is fixed for a body's lifetime; dispatching on it replaces the
/// field-sniffing the reference demos did on loose records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Motion {
    /// Point mass moving in the plane, optionally restricted to a line.
    Translating {
        position: Vec2,
        velocity: Vec2,
        /// Collision radius, or half-extent along a constraint axis.
        radius: f32,
        axis: Option<ConstraintAxis>,
    },
    /// Rigid body swinging about a fixed pivot.
    ///
    /// `angle` is measured counterclockwise from the hanging rest direction
    /// (straight down) and is renormalized into (-π, π] after every step.
    /// Bodies sharing a pivot point rotate as one assembly.
    Pivoted {
        angle: f32,
        angular_velocity: f32,
        pivot: Vec2,
        /// Signed lever distance from the pivot.
        arm: f32,
    },
    /// Body rolling without slipping down a ramp.
    ///
    /// Angular velocity is not independent state: it is recomputed from the
    /// rolling constraint ω = v/r every step.
    Rolling {
        distance: f32,
        speed: f32,
        rotation: f32,
        radius: f32,
        shape: RollingShape,
        axis: ConstraintAxis,
    },
}

impl Motion {
    /// Collision extent: radius for round bodies, half-extent on an axis.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Translating { radius, .. } | Self::Rolling { radius, .. } => *radius,
            Self::Pivoted { .. } => 0.0,
        }
    }

    /// Scalar coordinate along the constraint axis, when one exists.
    pub fn axis_coord(&self) -> Option<f32> {
        match self {
            Self::Translating {
                position,
                axis: Some(axis),
                ..
            } => Some((*position - axis.origin).dot(axis.direction())),
            Self::Rolling { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    /// Scalar speed along the constraint axis, when one exists.
    pub fn axis_speed(&self) -> Option<f32> {
        match self {
            Self::Translating {
                velocity,
                axis: Some(axis),
                ..
            } => Some(velocity.dot(axis.direction())),
            Self::Rolling { speed, .. } => Some(*speed),
            _ => None,
        }
    }
}

/// Direct kinematic override, used when the embedding layer drags a body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Kinematics {
    Linear { position: Vec2, velocity: Vec2 },
    OnAxis { coord: f32, speed: f32 },
    Angular { angle: f32, angular_velocity: f32 },
    Rolling { distance: f32, speed: f32 },
}

/// The core simulated entity.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Mass in kilograms, strictly positive.
    pub mass: f32,
    pub motion: Motion,
    pub applied_forces: Vec<AppliedForce>,
    pub contact_state: ContactState,
    pub friction_state: FrictionState,
    /// Per-step velocity multiplier in (0, 1]; 1.0 means undamped.
    pub damping: f32,
}

impl Body {
    /// Moment of inertia of this body alone about its pivot or contact point.
    pub fn moment_of_inertia(&self) -> f32 {
        match &self.motion {
            Motion::Pivoted { arm, .. } => self.mass * arm * arm,
            Motion::Rolling { radius, shape, .. } => shape.factor() * self.mass * radius * radius,
            Motion::Translating { .. } => 0.0,
        }
    }

    /// World position of the body's center, for queries and rendering.
    pub fn world_position(&self) -> Vec2 {
        match &self.motion {
            Motion::Translating { position, .. } => *position,
            Motion::Pivoted {
                angle, pivot, arm, ..
            } => *pivot + *arm * Vec2::new(angle.sin(), -angle.cos()),
            Motion::Rolling { distance, axis, .. } => axis.origin + *distance * axis.direction(),
        }
    }

    /// Applies a drag-style override and clears contact so the next step
    /// cannot manufacture impulses from stale state.
    pub fn set_kinematics(&mut self, kinematics: Kinematics) -> Result<(), ConfigError> {
        match (&mut self.motion, kinematics) {
            (
                Motion::Translating {
                    position,
                    velocity,
                    axis: None,
                    ..
                },
                Kinematics::Linear {
                    position: p,
                    velocity: v,
                },
            ) => {
                *position = p;
                *velocity = v;
            }
            (
                Motion::Translating {
                    position,
                    velocity,
                    axis: Some(axis),
                    ..
                },
                Kinematics::OnAxis { coord, speed },
            ) => {
                let dir = axis.direction();
                *position = axis.origin + coord.clamp(0.0, axis.length) * dir;
                *velocity = speed * dir;
            }
            (
                Motion::Pivoted {
                    angle,
                    angular_velocity,
                    ..
                },
                Kinematics::Angular {
                    angle: a,
                    angular_velocity: w,
                },
            ) => {
                *angle = crate::utils::math::wrap_angle(a);
                *angular_velocity = w;
            }
            (
                Motion::Rolling {
                    distance, speed, ..
                },
                Kinematics::Rolling {
                    distance: d,
                    speed: s,
                },
            ) => {
                *distance = d;
                *speed = s;
            }
            _ => return Err(ConfigError::KinematicsMismatch),
        }
        self.contact_state = ContactState::Free;
        self.friction_state = FrictionState::Static;
        Ok(())
    }

    /// True when every kinematic component is finite.
    pub fn is_finite(&self) -> bool {
        match &self.motion {
            Motion::Translating {
                position, velocity, ..
            } => position.is_finite() && velocity.is_finite(),
            Motion::Pivoted {
                angle,
                angular_velocity,
                ..
            } => angle.is_finite() && angular_velocity.is_finite(),
            Motion::Rolling {
                distance,
                speed,
                rotation,
                ..
            } => distance.is_finite() && speed.is_finite() && rotation.is_finite(),
        }
    }
}

/// Description of a body handed to `add_body`, validated at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub mass: f32,
    pub motion: Motion,
    pub damping: f32,
    pub contact_state: ContactState,
}

impl BodySpec {
    /// Free point mass at `position`.
    pub fn free(mass: f32, radius: f32, position: Vec2) -> Self {
        Self {
            mass,
            motion: Motion::Translating {
                position,
                velocity: Vec2::ZERO,
                radius,
                axis: None,
            },
            damping: 1.0,
            contact_state: ContactState::Free,
        }
    }

    /// Block resting on an incline, `coord` units up from its foot.
    pub fn on_axis(mass: f32, half_extent: f32, axis: ConstraintAxis, coord: f32) -> Self {
        let dir = axis.direction();
        Self {
            mass,
            motion: Motion::Translating {
                position: axis.origin + coord * dir,
                velocity: Vec2::ZERO,
                radius: half_extent,
                axis: Some(axis),
            },
            damping: 1.0,
            contact_state: ContactState::Resting,
        }
    }

    /// Bob or beam weight swinging about `pivot` at signed lever `arm`.
    pub fn pivoted(mass: f32, pivot: Vec2, arm: f32, angle: f32) -> Self {
        Self {
            mass,
            motion: Motion::Pivoted {
                angle,
                angular_velocity: 0.0,
                pivot,
                arm,
            },
            damping: 1.0,
            contact_state: ContactState::Free,
        }
    }

    /// Round body released on a ramp, rolling without slipping.
    pub fn rolling(mass: f32, radius: f32, shape: RollingShape, axis: ConstraintAxis) -> Self {
        Self {
            mass,
            motion: Motion::Rolling {
                distance: 0.0,
                speed: 0.0,
                rotation: 0.0,
                radius,
                shape,
                axis,
            },
            damping: 1.0,
            contact_state: ContactState::Resting,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        if let Motion::Translating { velocity: v, .. } = &mut self.motion {
            *v = velocity;
        }
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        match &self.motion {
            Motion::Translating { radius, .. } | Motion::Rolling { radius, .. } => {
                if !(*radius > 0.0) {
                    return Err(ConfigError::NonPositiveRadius(*radius));
                }
            }
            Motion::Pivoted { .. } => {}
        }
        Ok(())
    }

    pub(crate) fn into_body(self, id: BodyId) -> Body {
        Body {
            id,
            mass: self.mass,
            motion: self.motion,
            applied_forces: Vec::new(),
            contact_state: self.contact_state,
            friction_state: FrictionState::Static,
            damping: self.damping,
        }
    }
}
