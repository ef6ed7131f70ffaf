//! Demo binary: drops the viewpoint onto the playground floor, pulls along
//! the ground with one hand, lets go and reports where the glide ends.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;
use log::{info, warn};

use clamber::{init_logging, playground, ClimbConfig, Climber, Contact, Hand};

const MAX_FALL_FRAMES: u32 = 10_000;

/// Headless climbing session on the default playground
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON physics config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate after the throw
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// Milliseconds between frames
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,
    /// Height the carrier starts falling from
    #[arg(long, default_value_t = 3.0)]
    start_height: f32,
}

/// Drives frames with synthetic timestamps.
struct Session {
    climber: Climber,
    now_ms: f64,
    frame_ms: f64,
}

impl Session {
    fn frame(&mut self) -> Contact {
        self.now_ms += self.frame_ms;
        self.climber.tick(self.now_ms).contact
    }

    /// Drags `hand` along `path` one point per frame while engaged.
    fn drag(&mut self, hand: Hand, path: &[Vec3]) {
        let Some((first, rest)) = path.split_first() else {
            return;
        };
        self.climber.set_tracked_point_position(hand, *first);
        self.climber.set_tracked_point_engaged(hand, true);
        for point in rest {
            self.climber.set_tracked_point_position(hand, *point);
            self.frame();
        }
        self.climber.set_tracked_point_engaged(hand, false);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ClimbConfig> {
    path.map_or_else(
        || Ok(ClimbConfig::default()),
        |p| ClimbConfig::load(p).with_context(|| format!("loading {}", p.display())),
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_ref())?;
    let mut climber =
        Climber::from_config(&config).with_carrier_position(Vec3::new(0.0, args.start_height, 0.0));
    for body in playground().collidables() {
        climber.register_body(body);
    }
    info!("registered {} surfaces", climber.surfaces().len());

    let mut session = Session {
        climber,
        now_ms: 0.0,
        frame_ms: args.frame_ms,
    };
    session.climber.tick(session.now_ms);

    match (1..=MAX_FALL_FRAMES).find(|_| session.frame() == Contact::Grounded) {
        Some(frames) => info!(
            "landed after {frames} frames at {}",
            session.climber.viewpoint_carrier_position()
        ),
        None => warn!(
            "still airborne after {MAX_FALL_FRAMES} frames at {}",
            session.climber.viewpoint_carrier_position()
        ),
    }

    // Pull along the floor with the primary hand, then let go.
    let stroke: Vec<Vec3> = (0_u8..=10)
        .map(|i| Vec3::new(0.0, 0.05, -0.04 * f32::from(i)))
        .collect();
    session.drag(Hand::Primary, &stroke);
    info!(
        "released with momentum {} at {}",
        session.climber.momentum(),
        session.climber.viewpoint_carrier_position()
    );

    for _ in 0..args.frames {
        session.frame();
    }
    info!(
        "after {} frames: carrier {} momentum {}",
        args.frames,
        session.climber.viewpoint_carrier_position(),
        session.climber.momentum()
    );
    Ok(())
}
