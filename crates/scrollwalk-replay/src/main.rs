//! Scrollwalk Replay
//!
//! Runs the scene headless against a scripted scroll/click timeline and logs
//! what a renderer and overlay layer would receive.
//!
//! Usage: `scrollwalk-replay [timeline.json] [scene.json]`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use scrollwalk_core::SceneConfig;
use scrollwalk_core::bevy::{CommandQueue, FrameSnapshot, ScrollwalkHeadlessPlugin, StateStores};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::timeline::Timeline;

mod timeline;

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn log_snapshot(snapshot: &FrameSnapshot) {
    let grown = snapshot.prop_scales.iter().filter(|s| **s > 0.0).count();
    let revealed = snapshot
        .marker_factors
        .iter()
        .filter(|(_, f)| *f >= 1.0)
        .count();
    tracing::info!(
        "[frame {}] progress={:.3} walking={} clip={:?} character={:?} camera={:?} fov={:.1} props={}/{} markers={}/{}",
        snapshot.frame,
        snapshot.progress,
        snapshot.actively_scrolling,
        snapshot.clip,
        snapshot.character_position,
        snapshot.camera_position,
        snapshot.camera_fov,
        grown,
        snapshot.prop_scales.len(),
        revealed,
        snapshot.marker_factors.len()
    );
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);

    let timeline = match args.next() {
        Some(path) => Timeline::load(&path)?,
        None => Timeline::default_walk(),
    };
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read scene config {}", path.display()))?;
            SceneConfig::from_json(&json).context("invalid scene config")?
        }
        None => SceneConfig::default(),
    };

    let command_queue = CommandQueue::new();
    let state_stores = StateStores::new();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::state::app::StatesPlugin);
    app.add_plugins(ScrollwalkHeadlessPlugin {
        seed: 12345,
        config,
        command_queue: Some(command_queue.clone()),
        state_stores: Some(state_stores.clone()),
    });
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    tracing::info!(
        "[replay] {} frames, {} scripted events",
        timeline.frames,
        timeline.events.len()
    );

    let mut overlay_version = state_stores.overlay.get_version();
    for frame in 0..timeline.frames {
        for command in timeline.commands_at(frame) {
            tracing::debug!("[replay] frame {}: {:?}", frame, command);
            command_queue.push(command);
        }
        app.update();

        let version = state_stores.overlay.get_version();
        if version != overlay_version {
            overlay_version = version;
            tracing::info!("[overlay] {:?}", state_stores.overlay.get_summary());
        }
        if timeline.log_every > 0 && frame % timeline.log_every == 0 {
            log_snapshot(&state_stores.frame.get_snapshot());
        }
    }

    log_snapshot(&state_stores.frame.get_snapshot());
    tracing::info!("[replay] done");
    Ok(())
}
