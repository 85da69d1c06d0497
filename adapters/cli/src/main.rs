#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted round of the tactics engine.

mod scenario;
mod viewport;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use tactics_core::DEFAULT_STEP_DURATION;
use tactics_rendering::{Scene, Theme};
use tactics_session::Session;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tactics", about = "Headless driver for the turn-based tactics engine")]
struct Args {
    /// TOML theme with player colours and labels.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Dwell time per tile of move animations in milliseconds; 0 moves instantly.
    #[arg(long, default_value_t = DEFAULT_STEP_DURATION.as_millis() as u64)]
    animation_speed: u64,

    /// Canvas size as WIDTHxHEIGHT.
    #[arg(long, default_value = "1280x800", value_parser = viewport::parse_viewport)]
    viewport: Vec2,

    /// Print the final engine state as JSON.
    #[arg(long)]
    dump_state: bool,
}

/// Entry point for the tactics command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let theme = match &args.theme {
        Some(path) => Theme::load(path)?,
        None => Theme::default(),
    };

    let mut session = Session::new(args.viewport);
    session.set_animation_speed(args.animation_speed);
    info!(
        width = args.viewport.x,
        height = args.viewport.y,
        step_ms = args.animation_speed,
        "session ready"
    );

    let report = scenario::run(&mut session);
    info!(
        moves = report.moves,
        engagements = report.engagements,
        rejections = report.rejections,
        "scenario finished"
    );

    print_scene(&Scene::capture(&session, &theme));

    if args.dump_state {
        let json = serde_json::to_string_pretty(&session.state())
            .context("failed to serialise engine state")?;
        println!("{json}");
    }

    Ok(())
}

fn print_scene(scene: &Scene) {
    println!("{}", scene.status.turn_label());
    for player in &scene.status.players {
        println!(
            "  {}  IG {}  CT {}  units {}",
            player.player.phase_label(),
            player.ig,
            player.ct,
            player.unit_count
        );
    }
    for unit in &scene.units {
        let state = if unit.opacity < 1.0 { "moved" } else { "ready" };
        println!("  {} at {} ({state})", unit.name, unit.tile);
    }
    let button = if scene.end_turn.enabled {
        "enabled"
    } else {
        "disabled"
    };
    println!("[{}] {button}", scene.end_turn.label);
}
