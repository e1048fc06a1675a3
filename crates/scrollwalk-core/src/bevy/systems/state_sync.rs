//! State synchronization systems.
//!
//! Syncs ECS state to `StateStores` for the host page.

use bevy::prelude::*;

use crate::animation::ClipKind;
use crate::bevy::{
    Character, CharacterAnimation, FrameCounter, FrameSnapshot, GrowingProp, InteractionRes, IntroRes,
    MainCamera, OverlaySummary, RigCamera, SceneSettings, ScrollInput, SectionMarker, StateStores,
};
use crate::bevy::systems::character::heading_yaw;

/// System to sync overlay and loading state.
pub fn sync_overlay_store(
    scroll: Res<ScrollInput>,
    interaction: Res<InteractionRes>,
    intro: Res<IntroRes>,
    settings: Res<SceneSettings>,
    stores: Res<StateStores>,
) {
    let active_overlay = interaction.0.active_overlay();
    stores.overlay.update(OverlaySummary {
        active_overlay,
        open_marker: interaction.0.open_marker(),
        content_visible: intro.0.is_content_visible(),
        loading_percent: intro.0.loading_percent(),
        intro_hint_visible: scroll.0.progress() < settings.0.scroll.intro_hint_below
            && active_overlay.is_none(),
    });
}

/// System to publish the per-frame scene snapshot.
pub fn sync_frame_store(
    mut counter: ResMut<FrameCounter>,
    scroll: Res<ScrollInput>,
    stores: Res<StateStores>,
    characters: Query<(&Character, &CharacterAnimation, &Transform)>,
    cameras: Query<(&RigCamera, &Transform), With<MainCamera>>,
    props: Query<&GrowingProp>,
    markers: Query<&SectionMarker>,
) {
    counter.0 += 1;

    let mut snapshot = FrameSnapshot {
        frame: counter.0,
        progress: scroll.0.progress(),
        actively_scrolling: scroll.0.is_actively_scrolling(),
        ..FrameSnapshot::default()
    };

    if let Ok((character, animation, transform)) = characters.single() {
        snapshot.character_position = transform.translation.to_array();
        snapshot.character_yaw = heading_yaw(character.heading);
        snapshot.clip = Some(animation.mixer.active());
        snapshot.clip_weights = ClipKind::ALL
            .into_iter()
            .map(|clip| (clip, animation.mixer.weight(clip)))
            .collect();
    }

    if let Ok((rig, transform)) = cameras.single() {
        snapshot.camera_position = transform.translation.to_array();
        snapshot.camera_fov = rig.pose.fov_degrees;
    }

    let mut scales: Vec<(usize, f32)> = props.iter().map(|p| (p.index, p.scale)).collect();
    scales.sort_by_key(|(index, _)| *index);
    snapshot.prop_scales = scales.into_iter().map(|(_, scale)| scale).collect();

    let mut factors: Vec<_> = markers.iter().map(|m| (m.id, m.factor)).collect();
    factors.sort_by_key(|(id, _)| *id);
    snapshot.marker_factors = factors;

    stores.frame.update(snapshot);
}
