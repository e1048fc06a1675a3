//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `ScrollwalkHeadlessPlugin` for testing scene logic
//! without a rendering or windowing backend.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::bevy::plugin::{ExperienceState, ScrollwalkHeadlessPlugin};
use crate::bevy::resources::{CommandQueue, SceneCommand};
use crate::bevy::state_store::StateStores;
use crate::config::SceneConfig;

/// Fixed frame length used by every test app.
pub const TEST_FRAME: Duration = Duration::from_nanos(16_666_667);

/// A headless Bevy app wrapper for testing.
///
/// Every `update` advances time by exactly one 60 Hz frame, so per-frame
/// smoothing and the intro timeline behave deterministically.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app that plays the default intro.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a test app with the intro skipped, ready for input after one frame.
    pub fn ready() -> Self {
        let mut config = SceneConfig::default();
        config.intro.skip = true;
        let mut test = Self::with_config(config);
        // Extra update to apply the Ready transition
        test.update();
        test
    }

    /// Create a new test app with a specific configuration.
    pub fn with_config(config: SceneConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::state::app::StatesPlugin);
        app.add_plugins(ScrollwalkHeadlessPlugin {
            seed: 12345,
            config,
            command_queue: None,
            state_stores: None,
        });
        app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));
        // Run one update to initialize all resources and spawn the scene
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Run `n` frame updates.
    pub fn step(&mut self, n: usize) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: SceneCommand) {
        self.app.world().resource::<CommandQueue>().push(cmd);
    }

    /// Scroll to `progress` and run one frame.
    pub fn scroll_to(&mut self, progress: f32) {
        self.push_command(SceneCommand::Scroll { progress });
        self.update();
    }

    pub fn experience_state(&self) -> ExperienceState {
        *self.app.world().resource::<State<ExperienceState>>().get()
    }

    pub fn stores(&self) -> StateStores {
        self.app.world().resource::<StateStores>().clone()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
