//! Scrollwalk Core Library
//!
//! Scroll-to-motion engine for a scroll-driven 3D walk: a single progress
//! value drives the character along a path, the camera rig, the animation
//! clip selection and the staggered growth of scene props, while clicks on
//! section markers open informational overlays.
//!
//! The pure math lives in the top-level modules; the `bevy` module wires it
//! into ECS systems that run once per frame.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod animation;
pub mod camera_rig;
pub mod config;
pub mod curve;
pub mod easing;
pub mod growth;
pub mod interaction;
pub mod intro;
pub mod layout;
pub mod scroll;
pub mod smoothing;

// Bevy integration
pub mod bevy;

pub use animation::{ClipKind, ClipMixer, ClipSelector, ClipSet, ClipTransition};
pub use camera_rig::{CameraMode, RigPose, ViewportClass};
pub use config::{ConfigError, MarkerConfig, SceneConfig};
pub use curve::PathCurve;
pub use easing::Easing;
pub use interaction::{InteractionPhase, InteractionState, MarkerId, SectionKey, SectionKeyError};
pub use intro::{IntroEffect, IntroSequence};
pub use layout::{FaunaSpec, PropKind, PropSpec, SceneLayout};
pub use scroll::ScrollState;
pub use smoothing::{Smooth, smooth};
