//! ECS Components for the scroll-driven scene.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::{ClipMixer, ClipSelector};
use crate::camera_rig::RigPose;
use crate::interaction::MarkerId;
use crate::layout::PropKind;

/// The walking character.
#[derive(Component, Debug, Clone)]
pub struct Character {
    /// Last valid forward direction along the path.
    pub heading: Vec3,
}

impl Default for Character {
    fn default() -> Self {
        Self { heading: Vec3::Z }
    }
}

/// Clip state machine and crossfade weights of the character.
#[derive(Component, Debug, Clone)]
pub struct CharacterAnimation {
    pub selector: ClipSelector,
    pub mixer: ClipMixer,
}

/// Marker component for the main camera.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

/// Smoothed camera rig state.
#[derive(Component, Debug, Clone, Copy)]
pub struct RigCamera {
    pub pose: RigPose,
}

/// A prop of the final scene that pops into view near the end of the walk.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct GrowingProp {
    pub index: usize,
    pub kind: PropKind,
    pub species: String,
    pub max_scale: f32,
    pub threshold: f32,
    /// Current smoothed scale.
    pub scale: f32,
}

/// An interactive section marker along the path.
#[derive(Component, Debug, Clone)]
pub struct SectionMarker {
    pub id: MarkerId,
    pub target_progress: f32,
    /// Eased reveal factor in \[0, 1\].
    pub factor: f32,
    pub title_opacity: f32,
    pub open: bool,
}

/// Vegetation item in the ring around a section marker.
#[derive(Component, Debug, Clone)]
pub struct MarkerFauna {
    pub marker: MarkerId,
    pub slot: usize,
    pub label: Option<String>,
    pub scale: f32,
    /// The sub-label is shown (and clickable) only while the marker is open.
    pub label_visible: bool,
}
