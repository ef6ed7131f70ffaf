//! Helpers for working with the horizontal (x/z) plane of a velocity.

use glam::{Vec2, Vec3};

/// Returns the magnitude of the horizontal (x, z) part of `vector`.
///
/// # Examples
/// ```
/// use clamber::vector_math::horizontal_speed;
/// use glam::Vec3;
/// let speed = horizontal_speed(Vec3::new(3.0, -50.0, 4.0));
/// assert!((speed - 5.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn horizontal_speed(vector: Vec3) -> f32 {
    Vec2::new(vector.x, vector.z).length()
}

/// Returns `vector` with its x and z components multiplied by `factor`.
///
/// The vertical component is left untouched.
///
/// # Examples
///
/// ```
/// use clamber::vector_math::scale_horizontal;
/// use glam::Vec3;
/// let scaled = scale_horizontal(Vec3::new(2.0, -1.0, 4.0), 0.5);
/// assert_eq!(scaled, Vec3::new(1.0, -1.0, 2.0));
/// ```
#[must_use]
pub fn scale_horizontal(vector: Vec3, factor: f32) -> Vec3 {
    Vec3::new(vector.x * factor, vector.y, vector.z * factor)
}

