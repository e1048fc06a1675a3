//! Scroll and click handling.
//!
//! Inputs are applied in arrival order. Any scroll event forcibly closes the
//! open marker and the active overlay.

use bevy::prelude::*;

use crate::bevy::{InteractionRes, OverlayChanged, SceneInputEvent, SceneSettings, ScrollInput};
use crate::interaction::InteractionState;

fn overlay_changed(state: &InteractionState) -> OverlayChanged {
    OverlayChanged {
        phase: state.phase(),
        open_marker: state.open_marker(),
        active_overlay: state.active_overlay(),
    }
}

/// System to apply scroll and click input to the scroll and interaction state.
pub fn apply_scene_input(
    mut inputs: MessageReader<SceneInputEvent>,
    settings: Res<SceneSettings>,
    mut scroll: ResMut<ScrollInput>,
    mut interaction: ResMut<InteractionRes>,
    mut changes: MessageWriter<OverlayChanged>,
) {
    for input in inputs.read() {
        let changed = match *input {
            SceneInputEvent::Scroll { progress } => {
                scroll.0.on_scroll(progress);
                interaction.0.scroll()
            }
            SceneInputEvent::ScrollSettled => {
                scroll.0.settle();
                false
            }
            SceneInputEvent::MarkerClick { id } => {
                if settings.0.marker(id).is_none() {
                    tracing::debug!("[interaction] click on unknown marker {}", id);
                    false
                } else {
                    interaction.0.marker_click(id)
                }
            }
            SceneInputEvent::SubLabelClick { id, section } => {
                match settings.0.marker(id).and_then(|m| m.section) {
                    Some(configured) => {
                        if configured != section {
                            tracing::warn!(
                                "[interaction] sub-label of marker {} reported {}, using {}",
                                id,
                                section,
                                configured
                            );
                        }
                        interaction.0.sub_label_click(id, configured)
                    }
                    None => {
                        tracing::debug!("[interaction] marker {} has no section content", id);
                        false
                    }
                }
            }
            SceneInputEvent::NavClick { section } => interaction.0.nav_click(section),
            SceneInputEvent::Close => interaction.0.close(),
        };

        if changed {
            tracing::info!("[interaction] -> {:?}", interaction.0.phase());
            changes.write(overlay_changed(&interaction.0));
        }
    }
}

/// System to clear the activity flag after the settle delay without scrolling.
pub fn tick_scroll_activity(time: Res<Time>, settings: Res<SceneSettings>, mut scroll: ResMut<ScrollInput>) {
    if scroll.0.tick(time.delta_secs(), settings.0.scroll.settle_secs) {
        tracing::debug!("[scroll] settled at {:.4}", scroll.0.progress());
    }
}
