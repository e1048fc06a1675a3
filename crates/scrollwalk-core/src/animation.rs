//! Character animation clip selection and crossfading.
//!
//! The selector is a three-state machine (wave, idle, walk) re-evaluated every
//! frame from the scroll state. The mixer turns its decisions into per-clip
//! blend weights that a renderer can feed to its animation player.

use serde::{Deserialize, Serialize};

/// Animation clips the character may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipKind {
    Wave,
    Idle,
    Walk,
}

impl ClipKind {
    pub const ALL: [ClipKind; 3] = [Self::Wave, Self::Idle, Self::Walk];

    fn index(self) -> usize {
        match self {
            Self::Wave => 0,
            Self::Idle => 1,
            Self::Walk => 2,
        }
    }
}

/// Which clips the loaded character model actually contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipSet {
    available: [bool; 3],
}

impl ClipSet {
    pub fn all() -> Self {
        Self {
            available: [true; 3],
        }
    }

    pub fn from_clips(clips: &[ClipKind]) -> Self {
        let mut set = Self::default();
        for clip in clips {
            set.available[clip.index()] = true;
        }
        set
    }

    pub fn contains(&self, clip: ClipKind) -> bool {
        self.available[clip.index()]
    }
}

/// The clip the character should play for the given scroll state.
pub fn target_clip(progress: f32, actively_scrolling: bool, wave_cutoff: f32) -> ClipKind {
    if progress < wave_cutoff {
        ClipKind::Wave
    } else if actively_scrolling {
        ClipKind::Walk
    } else {
        ClipKind::Idle
    }
}

/// A change of authoritative clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipTransition {
    pub from: ClipKind,
    pub to: ClipKind,
}

/// Finite-state machine choosing the authoritative clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSelector {
    current: ClipKind,
    clips: ClipSet,
}

impl ClipSelector {
    /// Starts waving if the model can, otherwise idles.
    pub fn new(clips: ClipSet) -> Self {
        let current = if clips.contains(ClipKind::Wave) {
            ClipKind::Wave
        } else {
            ClipKind::Idle
        };
        Self { current, clips }
    }

    pub fn current(&self) -> ClipKind {
        self.current
    }

    pub fn clips(&self) -> ClipSet {
        self.clips
    }

    /// Re-evaluates the rules and switches clip if needed.
    ///
    /// A missing wave clip falls back to idle; any other missing target holds
    /// the current clip. Idempotent for unchanged inputs.
    pub fn evaluate(
        &mut self,
        progress: f32,
        actively_scrolling: bool,
        wave_cutoff: f32,
    ) -> Option<ClipTransition> {
        let wanted = target_clip(progress, actively_scrolling, wave_cutoff);
        if wanted == self.current {
            return None;
        }

        let next = if self.clips.contains(wanted) {
            wanted
        } else if wanted == ClipKind::Wave && self.clips.contains(ClipKind::Idle) {
            ClipKind::Idle
        } else {
            return None;
        };

        if next == self.current {
            return None;
        }

        let transition = ClipTransition {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(transition)
    }
}

/// Linear crossfade between clips.
///
/// The active clip's weight ramps to 1 and every other clip's weight ramps to
/// 0 over `fade_secs`. Weights stay continuous when a new fade interrupts one
/// still in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipMixer {
    weights: [f32; 3],
    active: ClipKind,
    clips: ClipSet,
    playhead: f32,
    fade_secs: f32,
}

impl ClipMixer {
    /// Starts with `initial` fully weighted (if the model has it).
    pub fn new(initial: ClipKind, clips: ClipSet, fade_secs: f32) -> Self {
        let mut weights = [0.0; 3];
        if clips.contains(initial) {
            weights[initial.index()] = 1.0;
        }
        Self {
            weights,
            active: initial,
            clips,
            playhead: 0.0,
            fade_secs: fade_secs.max(0.0),
        }
    }

    pub fn active(&self) -> ClipKind {
        self.active
    }

    pub fn weight(&self, clip: ClipKind) -> f32 {
        self.weights[clip.index()]
    }

    /// Seconds the active clip has been playing since it was (re)started.
    pub fn playhead(&self) -> f32 {
        self.playhead
    }

    /// True once no fade is in progress.
    pub fn is_settled(&self) -> bool {
        ClipKind::ALL
            .into_iter()
            .all(|clip| self.weights[clip.index()] == self.settled_weight(clip))
    }

    /// Fades `clip` in from the start of its timeline and every other clip out.
    pub fn crossfade_to(&mut self, clip: ClipKind) {
        if clip == self.active {
            return;
        }
        self.active = clip;
        self.playhead = 0.0;
        if self.fade_secs <= 0.0 {
            self.snap();
        }
    }

    /// Advances playback and fades by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.playhead += dt;
        if self.fade_secs <= 0.0 {
            self.snap();
            return;
        }
        let step = dt / self.fade_secs;
        for clip in ClipKind::ALL {
            let target = self.settled_weight(clip);
            let weight = &mut self.weights[clip.index()];
            if *weight < target {
                *weight = (*weight + step).min(target);
            } else if *weight > target {
                *weight = (*weight - step).max(target);
            }
        }
    }

    fn settled_weight(&self, clip: ClipKind) -> f32 {
        if clip == self.active && self.clips.contains(clip) {
            1.0
        } else {
            0.0
        }
    }

    fn snap(&mut self) {
        for clip in ClipKind::ALL {
            self.weights[clip.index()] = self.settled_weight(clip);
        }
    }
}
