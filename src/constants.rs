//! Climbing physics constants shared across systems.
//!
//! These are the defaults baked into [`ClimbConfig`](crate::ClimbConfig);
//! a loaded config may override every value except the tracked-point count.

/// Points at or below this height count as touching the ground plane.
pub const GROUND_CONTACT_THRESHOLD: f32 = 0.12;
/// Slack added to every body's scaled bounding radius in contact checks.
pub const CONTACT_MARGIN: f32 = 0.12;
/// Upper bound on a single frame's timestep, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.032;
/// Smallest timestep used when turning a grab displacement into a velocity.
pub const MIN_VELOCITY_DELTA: f32 = 0.001;
/// Update rate the friction coefficient is normalised against.
pub const FRICTION_REFERENCE_RATE: f32 = 60.0;
/// Default downward acceleration, in units per second squared.
pub const DEFAULT_GRAVITY: f32 = -9.8;
/// Default ground friction coefficient.
pub const DEFAULT_FRICTION: f32 = 0.05;
/// Number of anchored frames averaged into a release velocity.
pub const DEFAULT_RELEASE_SMOOTHING_FRAMES: usize = 1;
/// Maximum number of concurrently tracked input points.
pub const TRACKED_POINT_COUNT: usize = 2;
