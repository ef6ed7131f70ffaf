//! Gravity integration, ground clamping and ground friction.
//!
//! Explicit Euler on both velocity and position. The ground is the plane
//! `y = 0`; landing on it is fully inelastic and only then does friction
//! bleed off horizontal speed.

use glam::Vec3;
use log::trace;

use crate::params::TunableParameters;
use crate::vector_math::{horizontal_speed, scale_horizontal};
use crate::FRICTION_REFERENCE_RATE;

/// Reduces horizontal speed linearly by `friction * reference_rate * delta_time`.
///
/// Speed never drops below zero and direction is preserved. A momentum with
/// no horizontal component is returned unchanged.
///
/// # Examples
///
/// ```
/// use clamber::apply_ground_friction;
/// use glam::Vec3;
/// let slowed = apply_ground_friction(Vec3::new(2.0, 0.0, 0.0), 0.3, 60.0, 0.05);
/// assert!((slowed.x - 1.1).abs() < 1e-5);
/// ```
#[must_use]
pub fn apply_ground_friction(
    momentum: Vec3,
    friction: f32,
    reference_rate: f32,
    delta_time: f32,
) -> Vec3 {
    let speed = horizontal_speed(momentum);
    if speed <= 0.0 {
        return momentum;
    }
    let drop = speed.min(friction * reference_rate * delta_time);
    scale_horizontal(momentum, (speed - drop) / speed)
}

/// Result of integrating one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// The carrier ended the frame above the ground.
    Airborne,
    /// The carrier was clamped onto the ground this frame.
    Grounded,
}

/// Integrates gravity into `momentum` and `momentum` into `carrier`.
///
/// When the carrier falls below the ground it is clamped to `y = 0`, any
/// downward velocity is removed and ground friction is applied using the
/// default reference rate.
pub fn apply_physics(
    carrier: &mut Vec3,
    momentum: &mut Vec3,
    params: &TunableParameters,
    delta_time: f32,
) -> Contact {
    integrate(
        carrier,
        momentum,
        params,
        FRICTION_REFERENCE_RATE,
        delta_time,
    )
}

/// [`apply_physics`] with an explicit friction reference rate.
pub fn integrate(
    carrier: &mut Vec3,
    momentum: &mut Vec3,
    params: &TunableParameters,
    reference_rate: f32,
    delta_time: f32,
) -> Contact {
    momentum.y += params.gravity() * delta_time;
    *carrier += *momentum * delta_time;

    if carrier.y >= 0.0 {
        return Contact::Airborne;
    }

    carrier.y = 0.0;
    if momentum.y < 0.0 {
        momentum.y = 0.0;
    }
    *momentum = apply_ground_friction(*momentum, params.friction(), reference_rate, delta_time);
    trace!("carrier grounded at {carrier}; momentum now {momentum}");
    Contact::Grounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn free_fall_from_height() {
        let params = TunableParameters::new(-9.8, 0.5);
        let mut carrier = Vec3::new(0.0, 5.0, 0.0);
        let mut momentum = Vec3::ZERO;

        let contact = apply_physics(&mut carrier, &mut momentum, &params, 0.1);

        assert_eq!(contact, Contact::Airborne);
        assert_relative_eq!(momentum.y, -0.98, epsilon = 1e-5);
        assert_relative_eq!(carrier.y, 4.902, epsilon = 1e-5);
    }

    #[rstest]
    fn landing_stops_fall_and_applies_friction() {
        let params = TunableParameters::new(-9.8, 0.3);
        let mut carrier = Vec3::new(0.0, 0.05, 0.0);
        let mut momentum = Vec3::new(2.0, -3.0, 0.0);

        let contact = apply_physics(&mut carrier, &mut momentum, &params, 0.05);

        assert_eq!(contact, Contact::Grounded);
        assert_eq!(carrier.y, 0.0);
        assert_eq!(momentum.y, 0.0);
        assert_relative_eq!(momentum.x, 1.1, epsilon = 1e-5);
        assert_relative_eq!(carrier.x, 0.1, epsilon = 1e-6);
    }

    #[rstest]
    fn airborne_frames_skip_friction() {
        let params = TunableParameters::new(0.0, 1.0);
        let mut carrier = Vec3::new(0.0, 3.0, 0.0);
        let mut momentum = Vec3::new(4.0, 0.0, -2.0);
        apply_physics(&mut carrier, &mut momentum, &params, 0.016);
        assert_eq!(momentum, Vec3::new(4.0, 0.0, -2.0));
    }

    #[rstest]
    fn upward_momentum_survives_clamp() {
        let params = TunableParameters::new(0.0, 0.0);
        let mut carrier = Vec3::new(0.0, -1.0, 0.0);
        let mut momentum = Vec3::new(0.0, 2.0, 0.0);
        let contact = apply_physics(&mut carrier, &mut momentum, &params, 0.1);
        assert_eq!(contact, Contact::Grounded);
        assert_eq!(carrier.y, 0.0);
        assert_relative_eq!(momentum.y, 2.0);
    }

    #[rstest]
    #[case::partial_drop(Vec3::new(3.0, 0.0, 4.0), 0.1, 0.1, 4.4)]
    #[case::drop_exceeds_speed(Vec3::new(0.3, 0.0, 0.4), 0.5, 0.1, 0.0)]
    #[case::exact_stop(Vec3::new(0.0, 0.0, 3.0), 0.5, 0.1, 0.0)]
    #[case::frictionless(Vec3::new(1.0, 0.0, 0.0), 0.0, 0.1, 1.0)]
    fn friction_cases(
        #[case] momentum: Vec3,
        #[case] friction: f32,
        #[case] delta_time: f32,
        #[case] expected_speed: f32,
    ) {
        let slowed = apply_ground_friction(momentum, friction, FRICTION_REFERENCE_RATE, delta_time);
        let speed = horizontal_speed(slowed);
        assert_relative_eq!(speed, expected_speed, epsilon = 1e-5);
        assert!(speed <= horizontal_speed(momentum));
        assert!(slowed.x * momentum.x >= 0.0 && slowed.z * momentum.z >= 0.0);
    }

    #[rstest]
    fn zero_horizontal_speed_is_untouched() {
        let momentum = Vec3::new(0.0, -1.0, 0.0);
        assert_eq!(
            apply_ground_friction(momentum, 1.0, FRICTION_REFERENCE_RATE, 0.1),
            momentum
        );
    }
}
