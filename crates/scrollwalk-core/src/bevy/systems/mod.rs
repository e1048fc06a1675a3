//! Systems for the scroll-driven scene.
//!
//! Organized by functionality:
//! - command: Command queue processing from the host page
//! - input: Scroll and click handling, scroll activity debounce
//! - intro: Loading / intro timeline
//! - character: Character movement along the path
//! - animation: Clip selection and crossfading
//! - camera: Camera rig
//! - growth: Staggered prop growth
//! - markers: Section marker reveal and vegetation rings
//! - setup: Scene spawning
//! - rendering: Camera3d / projection / window plumbing
//! - state_sync: Sync ECS state to shared stores for the UI

pub mod animation;
pub mod camera;
pub mod character;
pub mod command;
pub mod growth;
pub mod input;
pub mod intro;
pub mod markers;
pub mod rendering;
pub mod setup;
pub mod state_sync;

pub use animation::*;
pub use camera::*;
pub use character::*;
pub use command::*;
pub use growth::*;
pub use input::*;
pub use intro::*;
pub use markers::*;
pub use rendering::*;
pub use setup::*;
pub use state_sync::*;
