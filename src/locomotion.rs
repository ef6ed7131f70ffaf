//! Grab-pull displacement of the viewpoint carrier.
//!
//! While a hand is anchored on a surface, any motion of that hand moves the
//! carrier by the opposite amount: the user pulls the world toward them.
//! Hands grabbing empty air transmit nothing.

use glam::Vec3;
use log::trace;

use crate::grab::GrabTracker;
use crate::surface::SurfaceRegistry;

/// Applies one frame of grab-driven movement to `carrier`.
///
/// For each grabbing hand the anchor is refreshed to the hand's current
/// position. When the hand touches a surface and has moved, the carrier is
/// displaced by the negated motion and the hand's release velocity is
/// updated, using `delta_time` floored at `min_velocity_delta`. A hand that
/// has left every surface has its anchor moved without displacing the
/// carrier, and its release velocity is cleared.
///
/// # Examples
///
/// ```
/// use clamber::{apply_grab_movement, GrabTracker, Hand, SurfaceRegistry};
/// use glam::Vec3;
///
/// let surfaces = SurfaceRegistry::default();
/// let mut tracker = GrabTracker::default();
/// tracker.set_world_position(Hand::Primary, Vec3::new(0.0, 0.05, 0.0));
/// tracker.engage(Hand::Primary);
/// tracker.set_world_position(Hand::Primary, Vec3::new(0.1, 0.05, 0.0));
///
/// let mut carrier = Vec3::ZERO;
/// apply_grab_movement(&mut tracker, &surfaces, &mut carrier, 0.02, 0.001);
/// assert!((carrier.x + 0.1).abs() < 1e-6);
/// ```
pub fn apply_grab_movement(
    tracker: &mut GrabTracker,
    surfaces: &SurfaceRegistry,
    carrier: &mut Vec3,
    delta_time: f32,
    min_velocity_delta: f32,
) {
    for point in tracker.grabbing_mut() {
        let world = point.world_position();
        let grab = point.grab_mut();

        if !surfaces.is_touching_surface(world) {
            grab.reset_anchor(world);
            continue;
        }

        let delta = world - grab.previous_world_position();
        if delta.length_squared() > 0.0 {
            *carrier -= delta;
            grab.record_motion(delta, delta_time.max(min_velocity_delta));
            trace!("grab pull moved carrier by {} to {carrier}", -delta);
        }
        grab.set_previous_world_position(world);
    }
}
