use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::utils::math::unit_from_angle;

/// Process-wide simulation constants for one running scene.
///
/// Mutable between steps through the world API, never mid-step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Gravitational acceleration magnitude, directed along global -Y.
    pub gravity: f32,
    /// Coefficient of friction between resting bodies and their surface.
    pub friction: f32,
    /// Restitution for body-body impacts, in [0, 1].
    pub restitution: f32,
    /// Extra velocity multiplier applied to both bodies after an impact.
    pub collision_damping: f32,
    /// Restitution for container-wall bounces; falls back to `restitution`
    /// when unset.
    pub wall_restitution: Option<f32>,
    /// Speed below which stick/slip treats a body as at rest.
    pub stiction_speed: f32,
    /// Upper bound on the timestep consumed by one step.
    pub max_time_step: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: config::DEFAULT_GRAVITY,
            friction: config::DEFAULT_FRICTION,
            restitution: config::DEFAULT_RESTITUTION,
            collision_damping: config::DEFAULT_COLLISION_DAMPING,
            wall_restitution: None,
            stiction_speed: config::STICTION_SPEED,
            max_time_step: config::MAX_TIME_STEP,
        }
    }
}

impl Environment {
    pub fn wall_restitution(&self) -> f32 {
        self.wall_restitution.unwrap_or(self.restitution)
    }
}

/// Response of a constraint-axis end stop when a body reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryResponse {
    /// Reflect the velocity, scaled by a damping factor.
    Bounce { damping: f32 },
    /// Kill the velocity and park the body at the stop.
    Absorb,
}

/// A fixed line that restricts a body's motion, e.g. an incline or a ramp.
///
/// The scalar coordinate runs from `0` at `origin` to `length` along the unit
/// direction given by `angle` (inclination of the +direction above the
/// horizontal). Both ends carry their own stop response; the reference incline
/// bounces at the foot and parks at the crest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConstraintAxis {
    pub origin: Vec2,
    pub angle: f32,
    pub length: f32,
    pub min_stop: BoundaryResponse,
    pub max_stop: BoundaryResponse,
}

impl ConstraintAxis {
    pub fn new(origin: Vec2, angle: f32, length: f32) -> Self {
        Self {
            origin,
            angle,
            length,
            min_stop: BoundaryResponse::Bounce {
                damping: config::DEFAULT_BOUNCE_DAMPING,
            },
            max_stop: BoundaryResponse::Absorb,
        }
    }

    /// Unit direction of increasing coordinate. Derived by sin/cos only, so a
    /// vertical axis (±90°) is as legal as any other.
    pub fn direction(&self) -> Vec2 {
        unit_from_angle(self.angle)
    }

    /// Two axes are shared when bodies on them can interact in one dimension.
    pub fn same_surface(&self, other: &ConstraintAxis) -> bool {
        self.origin.x.to_bits() == other.origin.x.to_bits()
            && self.origin.y.to_bits() == other.origin.y.to_bits()
            && self.angle.to_bits() == other.angle.to_bits()
    }
}

/// Rectangular container limits for free-moving bodies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
}

/// Whether a body is pressed against a supporting surface.
///
/// Dragging a body out of the simulation must reset this to `Free` so the
/// next step does not manufacture friction or impulses from stale contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactState {
    #[default]
    Free,
    Resting,
}

/// Stick/slip phase of the per-body friction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrictionState {
    #[default]
    Static,
    Kinetic,
}

/// Moment-of-inertia profile of a rolling body, as the I/(m·r²) ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollingShape {
    SolidSphere,
    HollowSphere,
    SolidDisk,
    Hoop,
}

impl RollingShape {
    /// The dimensionless shape factor k with I = k·m·r².
    pub fn factor(&self) -> f32 {
        match self {
            Self::SolidSphere => 2.0 / 5.0,
            Self::HollowSphere => 2.0 / 3.0,
            Self::SolidDisk => 1.0 / 2.0,
            Self::Hoop => 1.0,
        }
    }
}

/// A user-specified force vector attached to a body.
///
/// Owned by the body; created and edited through the world API, consumed
/// read-only during force accumulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AppliedForce {
    pub id: u32,
    /// Magnitude in newtons, never negative.
    pub magnitude: f32,
    /// Direction in radians from the +X axis, counterclockwise.
    pub angle: f32,
}

impl AppliedForce {
    /// World-frame force vector.
    pub fn vector(&self) -> Vec2 {
        self.magnitude * unit_from_angle(self.angle)
    }
}
