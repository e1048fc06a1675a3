//! Shared state stores for communication with the host page.
//!
//! Each store holds one slice of scene state that the overlay/UI layer can
//! poll independently. The version counter lets pollers skip unchanged data.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::animation::ClipKind;
use crate::interaction::{MarkerId, SectionKey};

// ============================================================================
// Data Types
// ============================================================================

/// What the overlay/UI layer needs to render panels, nav and loading screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OverlaySummary {
    pub active_overlay: Option<SectionKey>,
    pub open_marker: Option<MarkerId>,
    pub content_visible: bool,
    pub loading_percent: f32,
    /// Scroll hint at the very start of the walk, hidden under overlays.
    pub intro_hint_visible: bool,
}

/// Per-frame output handed to the scene renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub progress: f32,
    pub actively_scrolling: bool,
    pub character_position: [f32; 3],
    pub character_yaw: f32,
    pub clip: Option<ClipKind>,
    pub clip_weights: Vec<(ClipKind, f32)>,
    pub camera_position: [f32; 3],
    pub camera_fov: f32,
    /// Current scale of each growing prop, by stagger index.
    pub prop_scales: Vec<f32>,
    pub marker_factors: Vec<(MarkerId, f32)>,
}

// ============================================================================
// Individual Stores
// ============================================================================

/// Store for overlay/UI state.
#[derive(Debug, Default)]
pub struct OverlayStore {
    summary: RwLock<OverlaySummary>,
    version: RwLock<u64>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_summary(&self) -> OverlaySummary {
        self.summary.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    /// Replaces the summary; the version only moves when something changed.
    pub fn update(&self, summary: OverlaySummary) {
        let mut current = self.summary.write();
        if *current != summary {
            *current = summary;
            *self.version.write() += 1;
        }
    }
}

/// Store for the latest frame snapshot.
#[derive(Debug, Default)]
pub struct FrameStore {
    snapshot: RwLock<FrameSnapshot>,
}

impl FrameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_snapshot(&self) -> FrameSnapshot {
        self.snapshot.read().clone()
    }

    pub fn get_frame(&self) -> u64 {
        self.snapshot.read().frame
    }

    pub fn update(&self, snapshot: FrameSnapshot) {
        *self.snapshot.write() = snapshot;
    }
}

// ============================================================================
// Combined Stores
// ============================================================================

/// All stores, shared between the Bevy app and its host.
#[derive(Resource, Clone)]
pub struct StateStores {
    pub overlay: Arc<OverlayStore>,
    pub frame: Arc<FrameStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self {
            overlay: Arc::new(OverlayStore::new()),
            frame: Arc::new(FrameStore::new()),
        }
    }
}

impl Default for StateStores {
    fn default() -> Self {
        Self::new()
    }
}
