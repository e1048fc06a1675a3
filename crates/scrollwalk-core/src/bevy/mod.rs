//! Bevy-based runtime for the scroll-driven scene.
//!
//! This module wires the pure motion, growth and interaction logic into an
//! ECS app: components for the character, camera rig, props and markers,
//! resources fed by the host page through a command queue, and stores the
//! page polls for overlay and frame state.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(test)]
mod tests;

#[cfg(all(target_arch = "wasm32", feature = "windowed"))]
pub mod wasm_entry;

#[cfg(all(target_arch = "wasm32", feature = "windowed"))]
pub use wasm_entry::*;

pub use components::*;
pub use events::*;
pub use plugin::{ExperienceState, ScrollwalkHeadlessPlugin, ScrollwalkSet, ScrollwalkUnifiedPlugin};
pub use resources::*;
pub use state_store::{FrameSnapshot, FrameStore, OverlayStore, OverlaySummary, StateStores};
