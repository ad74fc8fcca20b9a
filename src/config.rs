//! Global configuration constants for the Mechanica engine.

/// Default gravitational acceleration magnitude (m/s², Y-up world).
pub const DEFAULT_GRAVITY: f32 = 9.8;

/// Default coefficient of friction between a body and its supporting surface.
pub const DEFAULT_FRICTION: f32 = 0.2;

/// Default restitution for body-body impacts.
pub const DEFAULT_RESTITUTION: f32 = 1.0;

/// Upper bound on the timestep accepted by a single step (seconds).
///
/// Elapsed wall time beyond this is discarded rather than integrated, which
/// keeps a slow frame or a tab resume from destabilizing the simulation.
pub const MAX_TIME_STEP: f32 = 1.0 / 30.0;

/// Speed below which a body counts as at rest for stick/slip purposes (unit/s).
pub const STICTION_SPEED: f32 = 0.01;

/// Post-impact velocity multiplier applied to both bodies of a resolved pair.
///
/// 1.0 leaves the restitution model alone. Several demos drop this to 0.8 so
/// stacked impacts visibly settle; that figure is a tuning choice, not a
/// derived quantity.
pub const DEFAULT_COLLISION_DAMPING: f32 = 1.0;

/// Velocity multiplier for a bounce off a surface end stop.
pub const DEFAULT_BOUNCE_DAMPING: f32 = 0.5;
