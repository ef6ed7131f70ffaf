//! Collidable scene descriptions.
//!
//! Scenes are lists of primitive shapes. Each shape knows the radius of the
//! sphere centred on its origin that encloses it, which is all the contact
//! query needs. [`playground`] builds the default climbing room.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::surface::CollidableBody;

/// A primitive centred on its local origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Flat rectangle of the given extents.
    Plane {
        /// Extent along the first axis.
        width: f32,
        /// Extent along the second axis.
        depth: f32,
    },
    /// Axis-aligned box.
    Cuboid {
        /// Full edge lengths.
        size: Vec3,
    },
    /// Sphere of the given radius.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Upright cylinder.
    Cylinder {
        /// Cap radius.
        radius: f32,
        /// Full height.
        height: f32,
    },
    /// Regular dodecahedron with vertices on the given circumradius.
    Dodecahedron {
        /// Circumradius.
        radius: f32,
    },
}

impl Shape {
    /// Radius of the smallest origin-centred sphere enclosing the shape.
    ///
    /// # Examples
    /// ```
    /// use clamber::scene::Shape;
    /// let cylinder = Shape::Cylinder { radius: 3.0, height: 8.0 };
    /// assert!((cylinder.bounding_radius() - 5.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Self::Plane { width, depth } => 0.5 * width.hypot(depth),
            Self::Cuboid { size } => 0.5 * size.length(),
            Self::Sphere { radius } | Self::Dodecahedron { radius } => radius,
            Self::Cylinder { radius, height } => radius.hypot(0.5 * height),
        }
    }
}

/// A shape placed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// What the body looks like.
    pub shape: Shape,
    /// World-space centre.
    pub position: Vec3,
    /// Per-axis scale; contact multiplies the radius by its length.
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

const fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl BodySpec {
    /// A unit-scale body at `position`.
    #[must_use]
    pub const fn new(shape: Shape, position: Vec3) -> Self {
        Self {
            shape,
            position,
            scale: Vec3::ONE,
        }
    }

    /// The collidable the registry stores for this body.
    #[must_use]
    pub fn to_collidable(&self) -> CollidableBody {
        CollidableBody::new(self.position, Some(self.shape.bounding_radius())).with_scale(self.scale)
    }
}

/// A serialisable list of bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Bodies in registration order.
    pub bodies: Vec<BodySpec>,
}

impl SceneLayout {
    /// Collidables for every body, in order.
    pub fn collidables(&self) -> impl Iterator<Item = CollidableBody> + '_ {
        self.bodies.iter().map(BodySpec::to_collidable)
    }
}

const PLAYGROUND_SHAPES: [Shape; 4] = [
    Shape::Cuboid {
        size: Vec3::splat(1.5),
    },
    Shape::Sphere { radius: 1.0 },
    Shape::Cylinder {
        radius: 0.9,
        height: 2.0,
    },
    Shape::Dodecahedron { radius: 1.1 },
];

const PLAYGROUND_FLOOR: Shape = Shape::Plane {
    width: 50.0,
    depth: 50.0,
};
const PLAYGROUND_BODY_COUNT: u8 = 16;
const PLAYGROUND_HALF_EXTENT: f32 = 8.0;
const GOLDEN_ANGLE: f32 = PI * 0.763_932;

/// The default room: a 50 by 50 floor plus sixteen climbable shapes.
///
/// The floor comes first and sits at the origin. Its bounding sphere
/// (about 61 units of reach at unit scale) covers the whole room, so with
/// this layout a grab anchors wherever the hand is. The shapes are spread
/// over a disc of radius 8 on a golden-angle spiral, at heights cycling
/// between 1 and 5, so every run sees the same layout.
#[must_use]
pub fn playground() -> SceneLayout {
    let count = f32::from(PLAYGROUND_BODY_COUNT);
    let shapes = (0..PLAYGROUND_BODY_COUNT)
        .zip(PLAYGROUND_SHAPES.iter().cycle())
        .map(|(i, shape)| {
            let step = f32::from(i);
            let radius = PLAYGROUND_HALF_EXTENT * ((step + 0.5) / count).sqrt();
            let angle = step * GOLDEN_ANGLE;
            let height = 1.0 + (step * 1.7) % 4.0;
            BodySpec::new(
                *shape,
                Vec3::new(radius * angle.cos(), height, radius * angle.sin()),
            )
        });
    let bodies = std::iter::once(BodySpec::new(PLAYGROUND_FLOOR, Vec3::ZERO))
        .chain(shapes)
        .collect();
    SceneLayout { bodies }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plane(Shape::Plane { width: 6.0, depth: 8.0 }, 5.0)]
    #[case::cube(Shape::Cuboid { size: Vec3::splat(2.0) }, 3.0_f32.sqrt())]
    #[case::sphere(Shape::Sphere { radius: 1.0 }, 1.0)]
    #[case::cylinder(Shape::Cylinder { radius: 0.9, height: 2.0 }, 1.81_f32.sqrt())]
    #[case::dodecahedron(Shape::Dodecahedron { radius: 1.1 }, 1.1)]
    fn bounding_radii(#[case] shape: Shape, #[case] expected: f32) {
        assert_relative_eq!(shape.bounding_radius(), expected, epsilon = 1e-5);
    }

    #[rstest]
    fn playground_starts_with_the_floor() {
        let layout = playground();
        assert_eq!(layout.bodies.len(), 17);
        let floor = layout.bodies.first().expect("floor body");
        assert_eq!(floor.shape, PLAYGROUND_FLOOR);
        assert_eq!(floor.position, Vec3::ZERO);
    }

    #[rstest]
    fn playground_shapes_stay_inside_the_room() {
        let layout = playground();
        for body in layout.bodies.iter().skip(1) {
            assert!(body.position.x.abs() <= PLAYGROUND_HALF_EXTENT);
            assert!(body.position.z.abs() <= PLAYGROUND_HALF_EXTENT);
            assert!((1.0..=5.0).contains(&body.position.y));
        }
    }

    #[rstest]
    fn playground_cycles_shapes() {
        let layout = playground();
        let kinds: Vec<Shape> = layout.bodies.iter().skip(1).take(5).map(|b| b.shape).collect();
        assert_eq!(kinds.first(), PLAYGROUND_SHAPES.first());
        assert_eq!(kinds.get(4), PLAYGROUND_SHAPES.first());
    }

    #[rstest]
    fn floor_makes_mid_air_grabs_anchor() {
        let mut registry = crate::surface::SurfaceRegistry::default();
        for body in playground().collidables() {
            registry.register(body);
        }
        assert!(registry.is_touching_surface(Vec3::new(20.0, 15.0, -20.0)));
        assert!(!registry.is_touching_surface(Vec3::new(60.0, 30.0, 0.0)));
    }

    #[rstest]
    fn layouts_deserialise_from_json() {
        let json = r#"{
            "bodies": [
                { "shape": { "kind": "sphere", "radius": 2.0 }, "position": [0.0, 4.0, 0.0] },
                { "shape": { "kind": "cuboid", "size": [1.0, 1.0, 1.0] },
                  "position": [3.0, 1.0, 0.0], "scale": [2.0, 2.0, 2.0] }
            ]
        }"#;
        let layout: SceneLayout = serde_json::from_str(json).expect("valid layout");
        let bodies: Vec<CollidableBody> = layout.collidables().collect();
        assert_eq!(bodies.len(), 2);
        let scaled = bodies.get(1).expect("second body");
        assert_relative_eq!(scaled.scale_factor(), 2.0 * 3.0_f32.sqrt(), epsilon = 1e-5);
        let unit = bodies.first().expect("first body");
        assert_relative_eq!(unit.scale_factor(), 3.0_f32.sqrt(), epsilon = 1e-5);
    }
}
