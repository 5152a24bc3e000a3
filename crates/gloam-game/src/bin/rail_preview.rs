//! Runs a rail follower headless and prints the pose every tick.

use std::path::PathBuf;

use clap::Parser;
use gloam_core::{GameClock, Result};
use gloam_curve::tessellate::polyline_length;
use gloam_curve::{CurveRenderer, PlaybackMode, RailFollower};
use gloam_game::GameConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rail-preview")]
#[command(about = "Step a camera rail along its Bezier curve and print the poses")]
struct Cli {
    /// Game config TOML. Defaults are used when the file does not exist.
    #[arg(long, default_value = "gloam.toml")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Stop at the end of the curve instead of looping.
    #[arg(long)]
    clamp: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)?;
    if cli.clamp {
        config.rail.mode = PlaybackMode::Clamp;
    }

    let renderer = CurveRenderer::new(&config.renderer);
    info!(
        points = renderer.positions().len(),
        length = polyline_length(renderer.positions()),
        "rendered curve"
    );

    let mut follower = RailFollower::from_config(&config.rail)?;
    info!(
        samples = follower.rail().sample_count(),
        length = follower.rail().total_length(),
        "rail ready"
    );
    if !follower.is_playing() {
        follower.play();
    }

    let mut clock = GameClock::new();
    for _ in 0..cli.ticks {
        let frame = clock.advance(cli.dt);
        match follower.tick(frame.dt) {
            Some(pose) => {
                let f = pose.forward();
                println!(
                    "{:>5} t={:>7.3} s={:>9.3} pos=({:.3}, {:.3}, {:.3}) fwd=({:.3}, {:.3}, {:.3})",
                    clock.frames(),
                    frame.now,
                    follower.distance(),
                    pose.position.x,
                    pose.position.y,
                    pose.position.z,
                    f.x,
                    f.y,
                    f.z,
                );
            }
            None => {
                warn!("rail has no length, nothing to follow");
                break;
            }
        }
    }
    Ok(())
}
