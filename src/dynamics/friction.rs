use crate::core::{Body, ContactState, Environment, FrictionState, Motion};
use crate::dynamics::forces::Load;
use glam::Vec2;

/// What the stick/slip machine did to a body this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrictionEvent {
    /// Body not subject to surface friction (free, rolling, or pivoted).
    NotApplicable,
    /// Static friction cancelled the driving force; velocity stays pinned.
    Held,
    /// Driving force broke the static bound; the body starts sliding.
    BrokeLoose,
    /// Kinetic friction opposed the sliding velocity.
    Sliding,
    /// Sliding body slowed under the stiction threshold and came to rest.
    CameToRest,
}

/// Adjusts the tangential load of a resting body for stick/slip friction.
///
/// Static friction cancels the driving force exactly while it stays within
/// the grip bound, and the velocity is pinned to exactly zero; once the bound
/// is exceeded the body slides under classic Coulomb friction opposing its
/// velocity. A sliding body only re-sticks when it is both slow and within
/// the grip bound again. The hysteresis is what keeps friction from
/// flip-flopping every step on a body that is nearly at rest.
pub fn resolve(body: &mut Body, load: Load, environment: &Environment) -> (Load, FrictionEvent) {
    let Load::Axial {
        tangential,
        normal,
        grip,
    } = load
    else {
        return (load, FrictionEvent::NotApplicable);
    };

    if body.contact_state != ContactState::Resting {
        return (load, FrictionEvent::NotApplicable);
    }

    let speed = body.motion.axis_speed().unwrap_or(0.0);

    // The static state only means anything at rest. A body handed to the
    // engine already moving (a thrown drag, a collision kick) slides.
    if body.friction_state == FrictionState::Static && speed.abs() >= environment.stiction_speed {
        body.friction_state = FrictionState::Kinetic;
    }

    match body.friction_state {
        FrictionState::Static => {
            if tangential.abs() <= grip {
                pin_axis_velocity(body);
                (
                    Load::Axial {
                        tangential: 0.0,
                        normal,
                        grip,
                    },
                    FrictionEvent::Held,
                )
            } else {
                body.friction_state = FrictionState::Kinetic;
                (
                    Load::Axial {
                        tangential: tangential - grip * tangential.signum(),
                        normal,
                        grip,
                    },
                    FrictionEvent::BrokeLoose,
                )
            }
        }
        FrictionState::Kinetic => {
            if speed.abs() < environment.stiction_speed && tangential.abs() <= grip {
                pin_axis_velocity(body);
                body.friction_state = FrictionState::Static;
                (
                    Load::Axial {
                        tangential: 0.0,
                        normal,
                        grip,
                    },
                    FrictionEvent::CameToRest,
                )
            } else {
                // Coulomb friction opposes the sliding direction; fall back
                // to opposing the drive when the speed is exactly zero.
                let reference = if speed != 0.0 { speed } else { tangential };
                (
                    Load::Axial {
                        tangential: tangential - grip * reference.signum(),
                        normal,
                        grip,
                    },
                    FrictionEvent::Sliding,
                )
            }
        }
    }
}

fn pin_axis_velocity(body: &mut Body) {
    if let Motion::Translating { velocity, .. } = &mut body.motion {
        *velocity = Vec2::ZERO;
    }
}
