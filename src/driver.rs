//! Frame driver and the state it owns.
//!
//! [`Climber`] holds every piece of mutable climbing state (surfaces, hands,
//! tunables, carrier position and momentum) and advances it one frame per
//! [`Climber::tick`]. Input callbacks such as engage, disengage and slider
//! changes are plain method calls made between ticks.

use glam::Vec3;
use log::{debug, trace};

use crate::error::ClimbError;
use crate::grab::{GrabTracker, Hand};
use crate::integrator::{integrate, Contact};
use crate::locomotion::apply_grab_movement;
use crate::numeric::elapsed_secs;
use crate::params::{ClimbConfig, TunableParameters};
use crate::surface::{CollidableBody, SurfaceId, SurfaceRegistry};

/// Turns monotonic millisecond timestamps into clamped frame deltas.
///
/// The first timestamp only seeds the clock and yields a zero delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_frame_ms: Option<f64>,
    max_frame_delta: f32,
}

impl FrameClock {
    /// Creates an unseeded clock clamping deltas to `max_frame_delta` seconds.
    #[must_use]
    pub const fn new(max_frame_delta: f32) -> Self {
        Self {
            last_frame_ms: None,
            max_frame_delta,
        }
    }

    /// Records `now_ms` and returns the seconds elapsed since the last call.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let delta = self
            .last_frame_ms
            .map_or(0.0, |last| elapsed_secs(last, now_ms, self.max_frame_delta));
        self.last_frame_ms = Some(now_ms);
        delta
    }

    /// Timestamp of the most recent frame, if any.
    #[must_use]
    pub const fn last_frame_ms(&self) -> Option<f64> {
        self.last_frame_ms
    }
}

/// Summary of one advanced frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Timestep the frame was integrated with, in seconds.
    pub delta_time: f32,
    /// Whether the carrier ended the frame on the ground.
    pub contact: Contact,
}

/// The climbing core: owns all state and runs the per-frame pipeline.
#[derive(Debug, Clone)]
pub struct Climber {
    surfaces: SurfaceRegistry,
    tracker: GrabTracker,
    params: TunableParameters,
    carrier: Vec3,
    momentum: Vec3,
    clock: FrameClock,
    min_velocity_delta: f32,
    friction_reference_rate: f32,
}

impl Default for Climber {
    fn default() -> Self {
        Self::from_config(&ClimbConfig::default())
    }
}

impl Climber {
    /// Builds a core at the origin, at rest, using `config`.
    #[must_use]
    pub fn from_config(config: &ClimbConfig) -> Self {
        Self {
            surfaces: SurfaceRegistry::new(config.ground_contact_threshold, config.contact_margin),
            tracker: GrabTracker::with_smoothing(config.release_smoothing_frames),
            params: config.tunables(),
            carrier: Vec3::ZERO,
            momentum: Vec3::ZERO,
            clock: FrameClock::new(config.max_frame_delta),
            min_velocity_delta: config.min_velocity_delta,
            friction_reference_rate: config.friction_reference_rate,
        }
    }

    /// Places the carrier at `position`.
    #[must_use]
    pub fn with_carrier_position(mut self, position: Vec3) -> Self {
        self.carrier = position;
        self
    }

    /// Starts the carrier with `momentum`.
    #[must_use]
    pub fn with_momentum(mut self, momentum: Vec3) -> Self {
        self.momentum = momentum;
        self
    }

    /// Registers a unit-scale collidable body.
    pub fn register_collidable(&mut self, position: Vec3, bounding_radius: f32) -> SurfaceId {
        self.surfaces.register_collidable(position, bounding_radius)
    }

    /// Registers a pre-built body, e.g. one produced by [`crate::scene`].
    pub fn register_body(&mut self, body: CollidableBody) -> SurfaceId {
        self.surfaces.register(body)
    }

    /// Moves a registered body.
    ///
    /// # Errors
    /// Returns [`ClimbError::UnknownSurface`] for ids this core never issued.
    pub fn set_surface_position(&mut self, id: SurfaceId, position: Vec3) -> Result<(), ClimbError> {
        self.surfaces.set_position(id, position)
    }

    /// Collidable bodies known to the core.
    #[must_use]
    pub const fn surfaces(&self) -> &SurfaceRegistry {
        &self.surfaces
    }

    /// Engages or disengages `hand`.
    ///
    /// Disengaging a grabbing hand adds its release velocity to the
    /// carrier's momentum. Repeating a transition does nothing.
    pub fn set_tracked_point_engaged(&mut self, hand: Hand, engaged: bool) {
        if engaged {
            self.tracker.engage(hand);
        } else if let Some(velocity) = self.tracker.disengage(hand) {
            self.momentum += velocity;
            debug!("momentum after release: {}", self.momentum);
        }
    }

    /// [`Climber::set_tracked_point_engaged`] addressed by raw index.
    ///
    /// # Errors
    /// Returns [`ClimbError::UnknownHand`] for indices other than 0 and 1.
    pub fn set_tracked_point_engaged_by_index(
        &mut self,
        index: usize,
        engaged: bool,
    ) -> Result<(), ClimbError> {
        let hand = Hand::try_from(index)?;
        self.set_tracked_point_engaged(hand, engaged);
        Ok(())
    }

    /// Feeds the latest tracked world position for `hand`.
    pub fn set_tracked_point_position(&mut self, hand: Hand, position: Vec3) {
        self.tracker.set_world_position(hand, position);
    }

    /// Last world position reported for `hand`.
    #[must_use]
    pub const fn tracked_point_world_position(&self, hand: Hand) -> Vec3 {
        self.tracker.point(hand).world_position()
    }

    /// Both hands' grab state.
    #[must_use]
    pub const fn tracker(&self) -> &GrabTracker {
        &self.tracker
    }

    /// Changes gravity for subsequent frames.
    pub fn set_gravity(&mut self, gravity: f32) {
        self.params.set_gravity(gravity);
    }

    /// Changes ground friction for subsequent frames.
    pub fn set_friction(&mut self, friction: f32) {
        self.params.set_friction(friction);
    }

    /// Current tunable parameters.
    #[must_use]
    pub const fn params(&self) -> &TunableParameters {
        &self.params
    }

    /// Where the user's body origin currently is.
    #[must_use]
    pub const fn viewpoint_carrier_position(&self) -> Vec3 {
        self.carrier
    }

    /// The carrier's current velocity.
    #[must_use]
    pub const fn momentum(&self) -> Vec3 {
        self.momentum
    }

    /// Advances one rendered frame stamped `now_ms` milliseconds.
    ///
    /// The timestep is the gap since the previous tick, clamped to the
    /// configured maximum. The very first tick uses a zero timestep.
    pub fn tick(&mut self, now_ms: f64) -> FrameReport {
        let delta_time = self.clock.advance(now_ms);
        let contact = self.step(delta_time);
        FrameReport {
            delta_time,
            contact,
        }
    }

    /// Runs grab movement then physics with an explicit timestep.
    pub fn step(&mut self, delta_time: f32) -> Contact {
        apply_grab_movement(
            &mut self.tracker,
            &self.surfaces,
            &mut self.carrier,
            delta_time,
            self.min_velocity_delta,
        );
        let contact = integrate(
            &mut self.carrier,
            &mut self.momentum,
            &self.params,
            self.friction_reference_rate,
            delta_time,
        );
        trace!(
            "frame dt={delta_time:.4} carrier={} momentum={} {contact:?}",
            self.carrier,
            self.momentum
        );
        contact
    }
}
