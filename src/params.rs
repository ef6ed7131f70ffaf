//! Live-tunable parameters and the loadable climbing configuration.
//!
//! [`TunableParameters`] are the two scalars an input handler may rewrite
//! between frames. [`ClimbConfig`] is the full set of physics knobs and can
//! be read from a JSON file; anything missing from the file keeps its
//! default from [`crate::constants`].

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    CONTACT_MARGIN, DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_RELEASE_SMOOTHING_FRAMES,
    FRICTION_REFERENCE_RATE, GROUND_CONTACT_THRESHOLD, MAX_FRAME_DELTA, MIN_VELOCITY_DELTA,
};

/// Gravity and friction as read by the integrator every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunableParameters {
    gravity: f32,
    friction: f32,
}

impl Default for TunableParameters {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl TunableParameters {
    /// Builds a parameter set, applying the same checks as the setters.
    #[must_use]
    pub fn new(gravity: f32, friction: f32) -> Self {
        let mut params = Self::default();
        params.set_gravity(gravity);
        params.set_friction(friction);
        params
    }

    /// Vertical acceleration in units per second squared.
    #[must_use]
    pub const fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Ground friction coefficient in `[0, 1]`.
    #[must_use]
    pub const fn friction(&self) -> f32 {
        self.friction
    }

    /// Replaces the gravity value. Non-finite values are ignored.
    pub fn set_gravity(&mut self, gravity: f32) {
        if !gravity.is_finite() {
            warn!("ignoring non-finite gravity {gravity}");
            return;
        }
        self.gravity = gravity;
    }

    /// Replaces the friction coefficient, clamping it into `[0, 1]`.
    /// Non-finite values are ignored.
    pub fn set_friction(&mut self, friction: f32) {
        if !friction.is_finite() {
            warn!("ignoring non-finite friction {friction}");
            return;
        }
        let clamped = friction.clamp(0.0, 1.0);
        if (clamped - friction).abs() > f32::EPSILON {
            warn!("friction {friction} outside [0, 1]; clamped to {clamped}");
        }
        self.friction = clamped;
    }
}

/// Problems encountered while loading or validating a [`ClimbConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid JSON for [`ClimbConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Every physics knob the climbing core reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimbConfig {
    /// Initial vertical acceleration.
    pub gravity: f32,
    /// Initial ground friction coefficient.
    pub friction: f32,
    /// Height at or below which a point touches the ground.
    pub ground_contact_threshold: f32,
    /// Slack added to each body's scaled radius.
    pub contact_margin: f32,
    /// Longest timestep a single frame may integrate, in seconds.
    pub max_frame_delta: f32,
    /// Floor on the timestep used to derive release velocities.
    pub min_velocity_delta: f32,
    /// Update rate the friction coefficient is expressed against.
    pub friction_reference_rate: f32,
    /// Anchored frames averaged into a release velocity.
    pub release_smoothing_frames: usize,
}

impl Default for ClimbConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            ground_contact_threshold: GROUND_CONTACT_THRESHOLD,
            contact_margin: CONTACT_MARGIN,
            max_frame_delta: MAX_FRAME_DELTA,
            min_velocity_delta: MIN_VELOCITY_DELTA,
            friction_reference_rate: FRICTION_REFERENCE_RATE,
            release_smoothing_frames: DEFAULT_RELEASE_SMOOTHING_FRAMES,
        }
    }
}

impl ClimbConfig {
    /// Parses and validates a config from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    ///
    /// # Examples
    /// ```
    /// use clamber::ClimbConfig;
    /// let config = ClimbConfig::from_json_str(r#"{ "gravity": -3.7 }"#).unwrap();
    /// assert!((config.gravity + 3.7).abs() < f32::EPSILON);
    /// assert_eq!(config.release_smoothing_frames, 1);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`ClimbConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that every field is usable by the simulation.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("ground_contact_threshold", self.ground_contact_threshold),
            ("contact_margin", self.contact_margin),
            ("max_frame_delta", self.max_frame_delta),
            ("min_velocity_delta", self.min_velocity_delta),
            ("friction_reference_rate", self.friction_reference_rate),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(field, "must be finite"));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(invalid("friction", "must lie in [0, 1]"));
        }
        if self.contact_margin < 0.0 {
            return Err(invalid("contact_margin", "must not be negative"));
        }
        if self.max_frame_delta <= 0.0 {
            return Err(invalid("max_frame_delta", "must be positive"));
        }
        if self.min_velocity_delta <= 0.0 {
            return Err(invalid("min_velocity_delta", "must be positive"));
        }
        if self.friction_reference_rate < 0.0 {
            return Err(invalid("friction_reference_rate", "must not be negative"));
        }
        if self.release_smoothing_frames == 0 {
            return Err(invalid("release_smoothing_frames", "must be at least 1"));
        }
        Ok(())
    }

    /// The tunable subset of this config.
    #[must_use]
    pub fn tunables(&self) -> TunableParameters {
        TunableParameters::new(self.gravity, self.friction)
    }
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
