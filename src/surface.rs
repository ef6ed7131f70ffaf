//! Surface registry and contact queries.
//!
//! The registry holds every collidable body as a point with an approximate
//! bounding sphere. Contact checks are discrete point-versus-sphere tests
//! plus a flat ground plane at `y = 0`; there is no swept collision.

use std::fmt;

use glam::Vec3;
use log::warn;

use crate::error::ClimbError;
use crate::{CONTACT_MARGIN, GROUND_CONTACT_THRESHOLD};

/// Identifier handed out when a body is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A body the tracked points can anchor against.
///
/// The bounding radius is fixed at construction. Bodies without one never
/// report contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollidableBody {
    /// World-space centre of the bounding sphere.
    pub position: Vec3,
    bounding_radius: Option<f32>,
    scale_factor: f32,
}

impl CollidableBody {
    /// Creates a body with unit scale, i.e. a scale factor of `sqrt(3)`.
    ///
    /// Negative radii are clamped to zero and non-finite radii are treated as
    /// missing, both with a warning.
    #[must_use]
    pub fn new(position: Vec3, bounding_radius: Option<f32>) -> Self {
        Self {
            position,
            bounding_radius: bounding_radius.and_then(sanitise_radius),
            scale_factor: Vec3::ONE.length(),
        }
    }

    /// Applies a scale vector to the bounding radius.
    ///
    /// The radius is multiplied by the length of `scale`, so a unit-scale
    /// body reaches `sqrt(3)` times its bounding radius. A non-finite length
    /// falls back to 1.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        let factor = scale.length();
        self.scale_factor = if factor.is_finite() { factor } else { 1.0 };
        self
    }

    /// Radius of the unscaled bounding sphere, if one was supplied.
    #[must_use]
    pub const fn bounding_radius(&self) -> Option<f32> {
        self.bounding_radius
    }

    /// Uniform scale applied to the bounding radius.
    #[must_use]
    pub const fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Returns whether `point` lies within the scaled radius plus `margin`.
    #[must_use]
    pub fn touches(&self, point: Vec3, margin: f32) -> bool {
        self.bounding_radius.is_some_and(|radius| {
            point.distance(self.position) <= radius * self.scale_factor + margin
        })
    }
}

fn sanitise_radius(radius: f32) -> Option<f32> {
    if !radius.is_finite() {
        warn!("bounding radius {radius} is not finite; body will not collide");
        return None;
    }
    if radius < 0.0 {
        warn!("bounding radius {radius} is negative; clamping to zero");
        return Some(0.0);
    }
    Some(radius)
}

/// Owns every collidable body and answers contact queries.
#[derive(Debug, Clone)]
pub struct SurfaceRegistry {
    bodies: Vec<CollidableBody>,
    ground_contact_threshold: f32,
    contact_margin: f32,
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new(GROUND_CONTACT_THRESHOLD, CONTACT_MARGIN)
    }
}

impl SurfaceRegistry {
    /// Creates an empty registry with explicit contact tolerances.
    #[must_use]
    pub const fn new(ground_contact_threshold: f32, contact_margin: f32) -> Self {
        Self {
            bodies: Vec::new(),
            ground_contact_threshold,
            contact_margin,
        }
    }

    /// Adds a fully constructed body.
    pub fn register(&mut self, body: CollidableBody) -> SurfaceId {
        let id = SurfaceId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Adds a unit-scale body at `position`.
    pub fn register_collidable(&mut self, position: Vec3, bounding_radius: f32) -> SurfaceId {
        self.register(CollidableBody::new(position, Some(bounding_radius)))
    }

    /// Moves a registered body.
    ///
    /// # Errors
    /// Returns [`ClimbError::UnknownSurface`] when `id` was not issued by
    /// this registry.
    pub fn set_position(&mut self, id: SurfaceId, position: Vec3) -> Result<(), ClimbError> {
        let body = self
            .bodies
            .get_mut(id.0)
            .ok_or(ClimbError::UnknownSurface(id))?;
        body.position = position;
        Ok(())
    }

    /// Looks up a registered body.
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&CollidableBody> {
        self.bodies.get(id.0)
    }

    /// Number of registered bodies, including non-collidable ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` when no bodies have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Returns whether `point` touches the ground plane or any body.
    ///
    /// Stops at the first body in contact.
    #[must_use]
    pub fn is_touching_surface(&self, point: Vec3) -> bool {
        point.y <= self.ground_contact_threshold
            || self
                .bodies
                .iter()
                .any(|body| body.touches(point, self.contact_margin))
    }
}
