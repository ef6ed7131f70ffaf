//! Hand-over-hand climbing locomotion core.
//!
//! Tracked hands grab nearby surfaces and pull the user's viewpoint through
//! space; letting go throws the viewpoint with the hand's last velocity, and
//! gravity plus ground friction take over from there. [`Climber`] owns the
//! whole state and advances it once per rendered frame via
//! [`Climber::tick`]. [`ClimbPlugin`] wires the same core into a Bevy app.
pub mod constants;
pub mod driver;
pub mod error;
pub mod grab;
pub mod integrator;
pub mod locomotion;
pub mod logging;
pub mod numeric;
pub mod params;
pub mod plugin;
pub mod scene;
pub mod surface;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use driver::{Climber, FrameClock, FrameReport};
pub use error::ClimbError;
pub use grab::{GrabState, GrabTracker, Hand, TrackedPoint};
pub use integrator::{apply_ground_friction, apply_physics, Contact};
pub use locomotion::apply_grab_movement;
pub use logging::init as init_logging;
pub use params::{ClimbConfig, ConfigError, TunableParameters};
pub use plugin::{ClimbPlugin, ClimbState, GrabInput, PlayerRig, SurfaceBody, TrackedHand, TuningInput};
pub use scene::{playground, BodySpec, SceneLayout, Shape};
pub use surface::{CollidableBody, SurfaceId, SurfaceRegistry};
pub use vector_math::{horizontal_speed, scale_horizontal};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use clamber::prelude::*;
    //! ```

    pub use crate::ClimbConfig;
    pub use crate::ClimbPlugin;
    pub use crate::Climber;
    pub use crate::Contact;
    pub use crate::GrabInput;
    pub use crate::Hand;
    pub use glam::Vec3;
}
