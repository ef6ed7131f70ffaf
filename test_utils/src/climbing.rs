//! Convenience constructors for climbing scenarios used in tests.

use approx::abs_diff_eq;
use clamber::{ClimbConfig, Climber, CollidableBody, Hand};
use glam::Vec3;

/// Default absolute tolerance for vector comparisons.
pub const TOLERANCE: f32 = 1e-4;

/// Create a unit-scale collidable sphere.
///
/// # Examples
/// ```
/// use test_utils::body;
/// let b = body((0.0, 2.0, 0.0), 0.5);
/// assert_eq!(b.bounding_radius(), Some(0.5));
/// ```
pub fn body(position: (f32, f32, f32), radius: f32) -> CollidableBody {
    let (x, y, z) = position;
    CollidableBody::new(Vec3::new(x, y, z), Some(radius))
}

/// Build a core with the given tunables, the carrier at `carrier`, and its
/// clock already seeded at `t = 0`.
///
/// # Examples
/// ```
/// use test_utils::climber_at;
/// use glam::Vec3;
/// let climber = climber_at(Vec3::new(0.0, 5.0, 0.0), -9.8, 0.5);
/// assert_eq!(climber.viewpoint_carrier_position().y, 5.0);
/// ```
pub fn climber_at(carrier: Vec3, gravity: f32, friction: f32) -> Climber {
    let config = ClimbConfig {
        gravity,
        friction,
        ..ClimbConfig::default()
    };
    let mut climber = Climber::from_config(&config).with_carrier_position(carrier);
    climber.tick(0.0);
    climber
}

/// Engage `hand` at `from`, move it to `to` and advance one tick at `now_ms`.
pub fn grab_and_move(climber: &mut Climber, hand: Hand, from: Vec3, to: Vec3, now_ms: f64) {
    climber.set_tracked_point_position(hand, from);
    climber.set_tracked_point_engaged(hand, true);
    climber.set_tracked_point_position(hand, to);
    climber.tick(now_ms);
}

/// Assert two vectors match component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors in the message when any component differs.
pub fn assert_vec3_eq(actual: Vec3, expected: Vec3, epsilon: f32) {
    let close = abs_diff_eq!(actual.x, expected.x, epsilon = epsilon)
        && abs_diff_eq!(actual.y, expected.y, epsilon = epsilon)
        && abs_diff_eq!(actual.z, expected.z, epsilon = epsilon);
    assert!(close, "expected {expected}, got {actual} (epsilon {epsilon})");
}
