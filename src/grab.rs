//! Per-hand grab state machine.
//!
//! Each tracked point is either idle or grabbing. Engaging captures the
//! point's current position as the anchor; disengaging hands back the
//! release velocity so the caller can fold it into the carrier's momentum.
//! Both transitions are idempotent: repeating one is a no-op.

use std::collections::VecDeque;

use glam::Vec3;
use log::{debug, warn};

use crate::error::ClimbError;
use crate::{DEFAULT_RELEASE_SMOOTHING_FRAMES, TRACKED_POINT_COUNT};

/// One of the two tracked input points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    /// Tracked point 0.
    Primary,
    /// Tracked point 1.
    Secondary,
}

impl Hand {
    /// Both hands in index order.
    pub const ALL: [Self; TRACKED_POINT_COUNT] = [Self::Primary, Self::Secondary];

    /// The raw tracked-point index of this hand.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

impl TryFrom<usize> for Hand {
    type Error = ClimbError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Primary),
            1 => Ok(Self::Secondary),
            other => Err(ClimbError::UnknownHand(other)),
        }
    }
}

/// Anchor and velocity bookkeeping for a single hand.
///
/// `previous_world_position` is only meaningful while grabbing.
#[derive(Debug, Clone, PartialEq)]
pub struct GrabState {
    selecting: bool,
    previous_world_position: Vec3,
    release_velocity: Vec3,
    samples: VecDeque<(Vec3, f32)>,
    window: usize,
}

impl Default for GrabState {
    fn default() -> Self {
        Self::with_window(DEFAULT_RELEASE_SMOOTHING_FRAMES)
    }
}

impl GrabState {
    /// Creates an idle state averaging release velocity over `window` frames.
    #[must_use]
    pub fn with_window(window: usize) -> Self {
        let frames = window.max(1);
        Self {
            selecting: false,
            previous_world_position: Vec3::ZERO,
            release_velocity: Vec3::ZERO,
            samples: VecDeque::with_capacity(frames),
            window: frames,
        }
    }

    /// Whether the hand is currently grabbing.
    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Position the hand held on the previous frame.
    #[must_use]
    pub const fn previous_world_position(&self) -> Vec3 {
        self.previous_world_position
    }

    /// Current release velocity estimate, in units per second.
    #[must_use]
    pub const fn release_velocity(&self) -> Vec3 {
        self.release_velocity
    }

    /// Moves the anchor to `position` and forgets any velocity estimate.
    pub(crate) fn reset_anchor(&mut self, position: Vec3) {
        self.previous_world_position = position;
        self.release_velocity = Vec3::ZERO;
        self.samples.clear();
    }

    /// Records an anchored displacement over `delta_time` seconds.
    ///
    /// The release velocity becomes total displacement over total time for
    /// the retained frames.
    pub(crate) fn record_motion(&mut self, displacement: Vec3, delta_time: f32) {
        self.samples.push_back((displacement, delta_time));
        while self.samples.len() > self.window {
            self.samples.pop_front();
        }
        let (distance, elapsed) = self
            .samples
            .iter()
            .fold((Vec3::ZERO, 0.0_f32), |(d, t), &(ds, dt)| (d + ds, t + dt));
        self.release_velocity = distance / elapsed;
    }

    pub(crate) fn set_previous_world_position(&mut self, position: Vec3) {
        self.previous_world_position = position;
    }

    fn begin(&mut self, position: Vec3) -> bool {
        if self.selecting {
            return false;
        }
        self.selecting = true;
        self.reset_anchor(position);
        true
    }

    fn end(&mut self) -> Option<Vec3> {
        if !self.selecting {
            return None;
        }
        self.selecting = false;
        self.samples.clear();
        Some(std::mem::take(&mut self.release_velocity))
    }
}

/// A tracked hand: its latest world position plus its grab state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackedPoint {
    world_position: Vec3,
    grab: GrabState,
}

impl TrackedPoint {
    /// Latest reported world position.
    #[must_use]
    pub const fn world_position(&self) -> Vec3 {
        self.world_position
    }

    /// Whether the hand is engaged.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.grab.is_selecting()
    }

    /// Grab bookkeeping for this hand.
    #[must_use]
    pub const fn grab(&self) -> &GrabState {
        &self.grab
    }

    pub(crate) fn grab_mut(&mut self) -> &mut GrabState {
        &mut self.grab
    }
}

/// Owns both tracked points and their state machines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrabTracker {
    primary: TrackedPoint,
    secondary: TrackedPoint,
}

impl GrabTracker {
    /// Creates a tracker whose release velocities average `window` frames.
    #[must_use]
    pub fn with_smoothing(window: usize) -> Self {
        let point = || TrackedPoint {
            world_position: Vec3::ZERO,
            grab: GrabState::with_window(window),
        };
        Self {
            primary: point(),
            secondary: point(),
        }
    }

    /// Read access to one hand.
    #[must_use]
    pub const fn point(&self, hand: Hand) -> &TrackedPoint {
        match hand {
            Hand::Primary => &self.primary,
            Hand::Secondary => &self.secondary,
        }
    }

    fn point_mut(&mut self, hand: Hand) -> &mut TrackedPoint {
        match hand {
            Hand::Primary => &mut self.primary,
            Hand::Secondary => &mut self.secondary,
        }
    }

    /// Iterates mutably over hands that are currently grabbing.
    pub(crate) fn grabbing_mut(&mut self) -> impl Iterator<Item = &mut TrackedPoint> {
        [&mut self.primary, &mut self.secondary]
            .into_iter()
            .filter(|point| point.is_engaged())
    }

    /// Stores the latest world position reported for `hand`.
    ///
    /// Non-finite positions are dropped and the previous one is kept.
    pub fn set_world_position(&mut self, hand: Hand, position: Vec3) {
        if !position.is_finite() {
            warn!("ignoring non-finite position {position} for {hand:?}");
            return;
        }
        self.point_mut(hand).world_position = position;
    }

    /// Idle to grabbing. Returns `false` if the hand was already grabbing.
    pub fn engage(&mut self, hand: Hand) -> bool {
        let point = self.point_mut(hand);
        let started = point.grab.begin(point.world_position);
        if started {
            debug!("{hand:?} grabbed at {}", point.world_position);
        }
        started
    }

    /// Grabbing to idle. Returns the release velocity to impart, or `None`
    /// if the hand was already idle.
    pub fn disengage(&mut self, hand: Hand) -> Option<Vec3> {
        let released = self.point_mut(hand).grab.end();
        if let Some(velocity) = released {
            debug!("{hand:?} released with velocity {velocity}");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, Ok(Hand::Primary))]
    #[case(1, Ok(Hand::Secondary))]
    #[case(2, Err(ClimbError::UnknownHand(2)))]
    fn hand_from_index(#[case] index: usize, #[case] expected: Result<Hand, ClimbError>) {
        assert_eq!(Hand::try_from(index), expected);
    }

    #[rstest]
    fn index_round_trips_for_every_hand() {
        for hand in Hand::ALL {
            assert_eq!(Hand::try_from(hand.index()), Ok(hand));
        }
    }

    #[rstest]
    fn engage_captures_anchor_and_clears_velocity() {
        let mut tracker = GrabTracker::default();
        tracker.set_world_position(Hand::Primary, Vec3::new(1.0, 2.0, 3.0));
        assert!(tracker.engage(Hand::Primary));
        let grab = tracker.point(Hand::Primary).grab();
        assert!(grab.is_selecting());
        assert_eq!(grab.previous_world_position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(grab.release_velocity(), Vec3::ZERO);
        assert!(!tracker.point(Hand::Secondary).is_engaged());
    }

    #[rstest]
    fn engage_twice_keeps_original_anchor() {
        let mut tracker = GrabTracker::default();
        tracker.set_world_position(Hand::Primary, Vec3::X);
        tracker.engage(Hand::Primary);
        tracker.set_world_position(Hand::Primary, Vec3::Y);
        assert!(!tracker.engage(Hand::Primary));
        assert_eq!(
            tracker.point(Hand::Primary).grab().previous_world_position(),
            Vec3::X
        );
    }

    #[rstest]
    fn disengage_returns_velocity_once() {
        let mut tracker = GrabTracker::default();
        tracker.engage(Hand::Secondary);
        tracker
            .point_mut(Hand::Secondary)
            .grab_mut()
            .record_motion(Vec3::new(0.0, 0.1, 0.0), 0.01);
        let first = tracker.disengage(Hand::Secondary).expect("hand was grabbing");
        assert_relative_eq!(first.y, 10.0, epsilon = 1e-4);
        assert_eq!(tracker.disengage(Hand::Secondary), None);
    }

    #[rstest]
    fn non_finite_positions_are_ignored() {
        let mut tracker = GrabTracker::default();
        tracker.set_world_position(Hand::Primary, Vec3::ONE);
        tracker.set_world_position(Hand::Primary, Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(tracker.point(Hand::Primary).world_position(), Vec3::ONE);
    }

    #[rstest]
    fn single_frame_window_uses_latest_sample() {
        let mut grab = GrabState::with_window(1);
        grab.record_motion(Vec3::new(1.0, 0.0, 0.0), 0.5);
        grab.record_motion(Vec3::new(0.0, 0.0, 0.3), 0.1);
        assert_relative_eq!(grab.release_velocity().x, 0.0);
        assert_relative_eq!(grab.release_velocity().z, 3.0, epsilon = 1e-5);
    }

    #[rstest]
    fn wider_window_averages_displacement_over_time() {
        let mut grab = GrabState::with_window(3);
        grab.record_motion(Vec3::new(0.2, 0.0, 0.0), 0.1);
        grab.record_motion(Vec3::new(0.4, 0.0, 0.0), 0.1);
        grab.record_motion(Vec3::new(0.0, 0.0, 0.0), 0.1);
        grab.record_motion(Vec3::new(0.3, 0.0, 0.0), 0.1);
        // Oldest sample dropped: (0.4 + 0.0 + 0.3) / 0.3
        assert_relative_eq!(grab.release_velocity().x, 7.0 / 3.0, epsilon = 1e-5);
    }

    #[rstest]
    fn reset_anchor_forgets_history() {
        let mut grab = GrabState::with_window(4);
        grab.record_motion(Vec3::X, 0.1);
        grab.reset_anchor(Vec3::Y);
        grab.record_motion(Vec3::new(0.0, 0.0, 0.5), 0.5);
        assert_eq!(grab.release_velocity(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(grab.previous_world_position(), Vec3::Y);
    }
}
