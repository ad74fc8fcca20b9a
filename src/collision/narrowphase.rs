use glam::Vec2;

use crate::core::{Body, ConstraintAxis, Motion};
use crate::utils::BodyId;

/// Transient overlap record for one body pair, recomputed every step.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Unit normal pointing from body A toward body B.
    pub normal: Vec2,
    /// Penetration depth along the normal, strictly positive.
    pub depth: f32,
}

/// Pairwise overlap tests for the two geometries the engine supports.
pub struct NarrowPhase;

impl NarrowPhase {
    /// Tests a body pair for overlap.
    ///
    /// Free round bodies use a circle-circle test; bodies sharing a
    /// constraint axis overlap when their 1-D intervals along it do. Exactly
    /// coincident centers are a degenerate transient with no usable normal,
    /// so they produce no contact this step.
    pub fn collide(a: &Body, b: &Body) -> Option<Contact> {
        match (Self::surface(a), Self::surface(b)) {
            (None, None) => Self::circle_circle(a, b),
            (Some(axis_a), Some(axis_b)) if axis_a.same_surface(axis_b) => {
                Self::interval_overlap(a, b)
            }
            _ => None,
        }
    }

    fn surface(body: &Body) -> Option<&ConstraintAxis> {
        match &body.motion {
            Motion::Translating { axis, .. } => axis.as_ref(),
            Motion::Rolling { axis, .. } => Some(axis),
            Motion::Pivoted { .. } => None,
        }
    }

    fn circle_circle(a: &Body, b: &Body) -> Option<Contact> {
        let (Motion::Translating {
            position: pos_a,
            radius: radius_a,
            ..
        }, Motion::Translating {
            position: pos_b,
            radius: radius_b,
            ..
        }) = (&a.motion, &b.motion)
        else {
            return None;
        };

        let delta = *pos_b - *pos_a;
        let distance = delta.length();
        if distance <= 0.0 {
            return None;
        }

        let depth = radius_a + radius_b - distance;
        if depth <= 0.0 {
            return None;
        }

        Some(Contact {
            body_a: a.id,
            body_b: b.id,
            normal: delta / distance,
            depth,
        })
    }

    fn interval_overlap(a: &Body, b: &Body) -> Option<Contact> {
        let coord_a = a.motion.axis_coord()?;
        let coord_b = b.motion.axis_coord()?;
        let axis = Self::surface(a)?;

        let gap = coord_b - coord_a;
        if gap == 0.0 {
            return None;
        }

        let depth = a.motion.radius() + b.motion.radius() - gap.abs();
        if depth <= 0.0 {
            return None;
        }

        Some(Contact {
            body_a: a.id,
            body_b: b.id,
            normal: axis.direction() * gap.signum(),
            depth,
        })
    }
}
