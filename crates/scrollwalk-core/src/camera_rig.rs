//! Camera rig targets.
//!
//! The camera blends from a fixed intro viewpoint to a chase viewpoint that
//! follows the character, while the field of view widens as the walk goes on.
//! Everything here computes *targets*; the smoothing filter moves the actual
//! camera toward them.

use std::f32::consts::PI;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::easing::ramp;
use crate::smoothing::Smooth;

/// How the chase viewpoint is placed relative to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Fixed world-space offset from the character.
    #[default]
    Chase,
    /// Revolves around the character as progress advances.
    Orbit,
}

/// Binary viewport classification used to pick layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Compact,
    #[default]
    Spacious,
}

impl ViewportClass {
    pub fn classify(width: f32, compact_below: f32) -> Self {
        if width < compact_below {
            Self::Compact
        } else {
            Self::Spacious
        }
    }
}

/// Camera position and vertical field of view (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigPose {
    pub position: Vec3,
    pub fov_degrees: f32,
}

impl CameraConfig {
    pub fn intro_position(&self) -> Vec3 {
        Vec3::from_array(self.intro_position)
    }

    /// Intro-to-chase blend weight for `progress`.
    pub fn blend_weight(&self, progress: f32) -> f32 {
        ramp(progress, self.blend_start, self.blend_end)
    }

    /// Orbit angle in radians: half a turn at the start, sweeping one full turn.
    pub fn orbit_angle(progress: f32) -> f32 {
        PI - progress.clamp(0.0, 1.0) * 2.0 * PI
    }

    /// Chase viewpoint for a character standing at `character`.
    pub fn chase_position(&self, progress: f32, character: Vec3, viewport: ViewportClass) -> Vec3 {
        match self.mode {
            CameraMode::Chase => character + Vec3::from_array(self.chase_offset),
            CameraMode::Orbit => {
                let orbit = match viewport {
                    ViewportClass::Compact => self.orbit.compact,
                    ViewportClass::Spacious => self.orbit.spacious,
                };
                let angle = Self::orbit_angle(progress);
                character
                    + Vec3::new(
                        angle.cos() * orbit.radius,
                        orbit.height,
                        angle.sin() * orbit.radius,
                    )
            }
        }
    }

    /// Target camera position: intro pose blended into the chase pose.
    ///
    /// Returns the intro and chase poses exactly at the ends of the blend.
    pub fn target_position(&self, progress: f32, character: Vec3, viewport: ViewportClass) -> Vec3 {
        let intro = self.intro_position();
        let chase = self.chase_position(progress, character, viewport);
        let w = self.blend_weight(progress);
        if w <= 0.0 {
            intro
        } else if w >= 1.0 {
            chase
        } else {
            intro.lerp(chase, w)
        }
    }

    /// Target field of view: base until `fov_start`, then widening linearly.
    pub fn target_fov(&self, progress: f32) -> f32 {
        if progress.is_nan() || progress <= self.fov_start {
            return self.base_fov;
        }
        let t = ramp(progress, self.fov_start, self.fov_end);
        self.base_fov + (self.max_fov - self.base_fov) * t
    }

    /// Pose the camera starts in before any scrolling.
    pub fn initial_pose(&self) -> RigPose {
        RigPose {
            position: self.intro_position(),
            fov_degrees: self.base_fov,
        }
    }

    /// One smoothing step of the rig toward this frame's targets.
    ///
    /// At zero progress nothing is computed and the pose is returned as-is,
    /// so a camera at rest never drifts.
    pub fn step(
        &self,
        current: RigPose,
        progress: f32,
        character: Vec3,
        viewport: ViewportClass,
    ) -> RigPose {
        if progress.is_nan() || progress <= 0.0 {
            return current;
        }
        let progress = progress.min(1.0);
        let target = self.target_position(progress, character, viewport);
        RigPose {
            position: current.position.smooth(target, self.position_rate),
            fov_degrees: current
                .fov_degrees
                .smooth(self.target_fov(progress), self.fov_rate),
        }
    }
}
