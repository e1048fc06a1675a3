//! ECS Resources for the scroll-driven scene.
//!
//! These resources hold the scene configuration, the immutable path and
//! layout, and the discrete input state every motion system reads.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::camera_rig::ViewportClass;
use crate::config::SceneConfig;
use crate::curve::PathCurve;
use crate::interaction::{InteractionState, MarkerId, SectionKey};
use crate::intro::IntroSequence;
use crate::layout::SceneLayout;
use crate::scroll::ScrollState;

/// Scene configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings(pub SceneConfig);

impl SceneSettings {
    pub fn new(config: SceneConfig) -> Self {
        Self(config)
    }
}

/// The walking path, built once at startup.
#[derive(Resource, Debug, Clone)]
pub struct ScenePath(pub PathCurve);

/// Procedural layout, generated once and never regenerated.
#[derive(Resource, Debug, Clone)]
pub struct SceneLayoutRes(pub SceneLayout);

/// Scroll progress and activity flag. Written only by input handling.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ScrollInput(pub ScrollState);

/// Open marker and active overlay.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InteractionRes(pub InteractionState);

/// Loading / intro timeline.
#[derive(Resource, Debug, Clone)]
pub struct IntroRes(pub IntroSequence);

/// Size of the drawing surface in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn class(&self, compact_below: f32) -> ViewportClass {
        ViewportClass::classify(self.width, compact_below)
    }
}

/// Number of frames the scene systems have run.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FrameCounter(pub u64);

/// Commands that can be sent from the host page to the Bevy app.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Scroll event with normalized progress.
    Scroll { progress: f32 },
    /// Scrolling stopped (external debounce).
    ScrollSettled,
    MarkerClick { id: MarkerId },
    SubLabelClick { id: MarkerId, section: SectionKey },
    NavClick { section: SectionKey },
    CloseClick,
    SetViewport { width: f32, height: f32 },
    /// Jump straight to visible content.
    SkipIntro,
}

impl SceneCommand {
    /// Commands that only make sense once content is visible.
    pub fn requires_content(&self) -> bool {
        !matches!(self, Self::SetViewport { .. } | Self::SkipIntro)
    }
}

/// Thread-safe command queue shared with the host page.
#[derive(Resource, Clone)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<SceneCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed on the next frame.
    pub fn push(&self, command: SceneCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain all pending commands in arrival order.
    pub fn drain(&self) -> Vec<SceneCommand> {
        self.inner.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
