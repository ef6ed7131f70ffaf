//! Behavioural tests for grab-pull locomotion and thrown motion.
//!
//! Each suite rebuilds its core in `before_each`, so examples never see
//! state left behind by a sibling.

use clamber::{Climber, Contact, Hand};
use glam::Vec3;
use test_utils::{assert_vec3_eq, climber_at, grab_and_move, TOLERANCE};

#[derive(Debug, Clone)]
struct Scene {
    climber: Climber,
    contact: Option<Contact>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            climber: climber_at(Vec3::new(0.0, 2.0, 0.0), 0.0, 0.5),
            contact: None,
        }
    }
}

impl Scene {
    fn with_hold() -> Self {
        let mut scene = Self::default();
        scene
            .climber
            .register_collidable(Vec3::new(0.0, 1.0, 0.0), 0.5);
        scene
    }
}

#[test]
fn pulling_on_a_hold_moves_the_carrier_the_other_way() {
    rspec::run(&rspec::given("a hand gripping a hold", Scene::default(), |ctx| {
        ctx.before_each(|scene| {
            *scene = Scene::with_hold();
            scene
                .climber
                .set_tracked_point_position(Hand::Primary, Vec3::new(0.0, 1.0, 0.0));
            scene.climber.set_tracked_point_engaged(Hand::Primary, true);
            scene
                .climber
                .set_tracked_point_position(Hand::Primary, Vec3::new(0.0, 1.2, 0.0));
            scene.contact = Some(scene.climber.step(0.02));
        });

        ctx.then("the carrier moves against the hand", |scene| {
            assert_vec3_eq(
                scene.climber.viewpoint_carrier_position(),
                Vec3::new(0.0, 1.8, 0.0),
                TOLERANCE,
            );
            assert_eq!(scene.contact, Some(Contact::Airborne));
        });

        ctx.then("the hand carries a release velocity", |scene| {
            let grab = scene.climber.tracker().point(Hand::Primary).grab();
            assert!(grab.is_selecting());
            assert_vec3_eq(grab.release_velocity(), Vec3::new(0.0, 10.0, 0.0), 1e-3);
        });

        ctx.when("the hand lets go", |ctx| {
            ctx.before_each(|scene| {
                scene.climber.set_tracked_point_engaged(Hand::Primary, false);
            });

            ctx.then("momentum receives the release velocity", |scene| {
                assert_vec3_eq(scene.climber.momentum(), Vec3::new(0.0, 10.0, 0.0), 1e-3);
            });
        });

        ctx.when("the hand lets go twice", |ctx| {
            ctx.before_each(|scene| {
                scene.climber.set_tracked_point_engaged(Hand::Primary, false);
                scene.climber.set_tracked_point_engaged(Hand::Primary, false);
            });

            ctx.then("the velocity is imparted only once", |scene| {
                assert_vec3_eq(scene.climber.momentum(), Vec3::new(0.0, 10.0, 0.0), 1e-3);
            });
        });
    }));
}

#[test]
fn grabbing_thin_air_does_nothing() {
    rspec::run(&rspec::given("a hand closed in mid-air", Scene::default(), |ctx| {
        ctx.before_each(|scene| {
            *scene = Scene::with_hold();
            grab_and_move(
                &mut scene.climber,
                Hand::Secondary,
                Vec3::new(3.0, 3.0, 3.0),
                Vec3::new(3.0, 3.5, 3.0),
                16.0,
            );
        });

        ctx.then("the carrier stays put", |scene| {
            assert_vec3_eq(
                scene.climber.viewpoint_carrier_position(),
                Vec3::new(0.0, 2.0, 0.0),
                TOLERANCE,
            );
        });

        ctx.then("the anchor follows the hand", |scene| {
            let grab = scene.climber.tracker().point(Hand::Secondary).grab();
            assert_eq!(grab.previous_world_position(), Vec3::new(3.0, 3.5, 3.0));
            assert_eq!(grab.release_velocity(), Vec3::ZERO);
        });

        ctx.when("the hand opens", |ctx| {
            ctx.before_each(|scene| {
                scene.climber.set_tracked_point_engaged(Hand::Secondary, false);
            });

            ctx.then("no momentum is added", |scene| {
                assert_eq!(scene.climber.momentum(), Vec3::ZERO);
            });
        });
    }));
}

#[test]
fn falling_climber_lands_and_slides_to_rest() {
    rspec::run(&rspec::given("a climber dropped from height", Scene::default(), |ctx| {
        ctx.before_each(|scene| {
            let mut climber = climber_at(Vec3::new(0.0, 1.0, 0.0), -9.8, 0.5)
                .with_momentum(Vec3::new(1.0, 0.0, 0.0));
            let mut now = 0.0;
            for _ in 0..120 {
                now += 16.0;
                scene.contact = Some(climber.tick(now).contact);
            }
            scene.climber = climber;
        });

        ctx.then("it ends on the ground", |scene| {
            assert_eq!(scene.contact, Some(Contact::Grounded));
            let carrier = scene.climber.viewpoint_carrier_position();
            assert!(carrier.y.abs() < f32::EPSILON);
            assert!(carrier.x > 0.0);
        });

        ctx.then("friction has stopped the slide", |scene| {
            assert_eq!(scene.climber.momentum(), Vec3::ZERO);
        });
    }));
}
