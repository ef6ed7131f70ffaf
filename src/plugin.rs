//! Bevy plugin wiring the climbing core into the ECS schedule.
//!
//! Scene entities carrying [`SurfaceBody`] are registered as collidables,
//! [`TrackedHand`] world positions feed the hands, and the [`PlayerRig`]
//! transform mirrors the carrier after every frame. Hands may be children
//! of the rig; their positions are resolved through the hierarchy.
//! Engage, disengage and slider changes arrive as triggered [`GrabInput`]
//! and [`TuningInput`] events.

use bevy::prelude::*;
use bevy::transform::helper::TransformHelper;
use log::{debug, error, warn};

use crate::grab::Hand;
use crate::params::ClimbConfig;
use crate::surface::{CollidableBody, SurfaceId};
use crate::Climber;

/// The climbing core as a Bevy resource.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct ClimbState(pub Climber);

/// Marks the entity whose translation follows the viewpoint carrier.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerRig;

/// A tracked input point, usually parented to the [`PlayerRig`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedHand(pub Hand);

/// A scene entity the hands can anchor against.
///
/// `None` marks geometry without a bounding sphere; it is registered but
/// never reports contact.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBody {
    /// Unscaled bounding-sphere radius.
    pub bounding_radius: Option<f32>,
}

/// Added once a [`SurfaceBody`] has been handed to the core.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredSurface(pub SurfaceId);

/// Engage or disengage signal for one hand.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrabInput {
    /// Hand the signal belongs to.
    pub hand: Hand,
    /// `true` on grab start, `false` on grab end.
    pub engaged: bool,
}

/// A live change to one of the tunable parameters.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum TuningInput {
    /// New gravity value.
    Gravity(f32),
    /// New friction coefficient.
    Friction(f32),
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn apply_grab_input(event: On<GrabInput>, mut state: ResMut<ClimbState>) {
    let GrabInput { hand, engaged } = *event.event();
    debug!("grab input {hand:?} engaged={engaged}");
    state.set_tracked_point_engaged(hand, engaged);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn apply_tuning_input(event: On<TuningInput>, mut state: ResMut<ClimbState>) {
    match *event.event() {
        TuningInput::Gravity(gravity) => state.set_gravity(gravity),
        TuningInput::Friction(friction) => state.set_friction(friction),
    }
}

/// Hands newly spawned [`SurfaceBody`] entities to the core.
pub fn register_surfaces_system(
    mut commands: Commands,
    mut state: ResMut<ClimbState>,
    bodies: Query<(Entity, &SurfaceBody, &Transform), Without<RegisteredSurface>>,
) {
    for (entity, body, transform) in &bodies {
        let collidable = CollidableBody::new(transform.translation, body.bounding_radius)
            .with_scale(transform.scale);
        let id = state.register_body(collidable);
        commands.entity(entity).insert(RegisteredSurface(id));
    }
}

/// Pushes moved surface transforms into the core.
pub fn sync_surface_positions_system(
    mut state: ResMut<ClimbState>,
    moved: Query<(&RegisteredSurface, &Transform), Changed<Transform>>,
) {
    for (RegisteredSurface(id), transform) in &moved {
        if let Err(e) = state.set_surface_position(*id, transform.translation) {
            error!("failed to move surface: {e}");
        }
    }
}

/// Feeds each [`TrackedHand`]'s world position to the core.
///
/// Positions are computed from the current hierarchy rather than the
/// propagated `GlobalTransform`, which lags one frame behind `Update`.
pub fn feed_tracked_hands_system(
    mut state: ResMut<ClimbState>,
    hands: Query<(Entity, &TrackedHand)>,
    transforms: TransformHelper,
) {
    for (entity, TrackedHand(hand)) in &hands {
        match transforms.compute_global_transform(entity) {
            Ok(global) => state.set_tracked_point_position(*hand, global.translation()),
            Err(e) => warn!("cannot resolve world position of {hand:?}: {e}"),
        }
    }
}

/// Runs one climbing frame and writes the carrier back to the rig.
pub fn climb_frame_system(
    time: Res<Time>,
    mut state: ResMut<ClimbState>,
    mut rigs: Query<&mut Transform, With<PlayerRig>>,
) {
    state.tick(time.elapsed().as_secs_f64() * 1000.0);
    let carrier = state.viewpoint_carrier_position();
    for mut rig in &mut rigs {
        rig.translation = carrier;
    }
}

/// Bevy plugin installing the climbing resource, observers and systems.
#[derive(Debug, Default, Clone)]
pub struct ClimbPlugin {
    /// Physics configuration for the core.
    pub config: ClimbConfig,
}

impl Plugin for ClimbPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClimbState(Climber::from_config(&self.config)));
        app.add_observer(apply_grab_input);
        app.add_observer(apply_tuning_input);
        app.add_systems(
            Update,
            (
                register_surfaces_system,
                sync_surface_positions_system,
                feed_tracked_hands_system,
                climb_frame_system,
            )
                .chain(),
        );
    }
}
