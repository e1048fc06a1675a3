//! ECS Messages for the scroll-driven scene.
//!
//! Input messages are written by the command system in arrival order; output
//! messages let in-ECS observers react to discrete changes.

use bevy::prelude::*;

use crate::animation::ClipKind;
use crate::interaction::{InteractionPhase, MarkerId, SectionKey};

/// One discrete scroll or click input, in the order it arrived.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum SceneInputEvent {
    Scroll { progress: f32 },
    ScrollSettled,
    MarkerClick { id: MarkerId },
    SubLabelClick { id: MarkerId, section: SectionKey },
    NavClick { section: SectionKey },
    Close,
}

/// Message to jump the intro to its end.
#[derive(Message, Debug, Clone, Default)]
pub struct SkipIntroEvent;

/// Message fired whenever the open marker or active overlay changes.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct OverlayChanged {
    pub phase: InteractionPhase,
    pub open_marker: Option<MarkerId>,
    pub active_overlay: Option<SectionKey>,
}

/// Message fired when the character's authoritative clip changes.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ClipChanged {
    pub from: ClipKind,
    pub to: ClipKind,
}

/// Message fired once content becomes visible.
#[derive(Message, Debug, Clone, Default)]
pub struct ContentShown;
