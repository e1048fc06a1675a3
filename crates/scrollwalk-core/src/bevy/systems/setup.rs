//! Scene spawning.
//!
//! Every entity is spawned once at startup from the memoised layout; the
//! motion systems only touch transforms afterwards.

use bevy::prelude::*;

use crate::animation::{ClipMixer, ClipSelector, ClipSet};
use crate::bevy::{
    Character, CharacterAnimation, GrowingProp, MainCamera, MarkerFauna, RigCamera, SceneLayoutRes,
    ScenePath, SceneSettings, SectionMarker,
};

/// System to spawn the character, the camera rig, the props and the markers.
pub fn spawn_scene(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    path: Res<ScenePath>,
    layout: Res<SceneLayoutRes>,
) {
    let config = &settings.0;
    let start = path.0.sample_position(0.0);

    let clips = ClipSet::from_clips(&config.character.clips);
    let selector = ClipSelector::new(clips);
    let mixer = ClipMixer::new(selector.current(), clips, config.character.crossfade_secs);
    commands.spawn((
        Name::new("character"),
        Character::default(),
        CharacterAnimation { selector, mixer },
        Transform::from_translation(start),
    ));

    let pose = config.camera.initial_pose();
    commands.spawn((
        Name::new("camera"),
        MainCamera,
        RigCamera { pose },
        Transform::from_translation(pose.position).looking_at(start, Vec3::Y),
    ));

    for prop in &layout.0.props {
        commands.spawn((
            Name::new(format!("{}#{}", prop.species, prop.index)),
            GrowingProp {
                index: prop.index,
                kind: prop.kind,
                species: prop.species.clone(),
                max_scale: prop.max_scale,
                threshold: prop.threshold,
                scale: 0.0,
            },
            Transform::from_translation(prop.position)
                .with_rotation(Quat::from_rotation_y(prop.yaw))
                .with_scale(Vec3::ZERO),
        ));
    }

    for marker in &config.markers {
        let position = Vec3::from_array(marker.position);
        commands.spawn((
            Name::new(format!("marker#{}", marker.id)),
            SectionMarker {
                id: marker.id,
                target_progress: marker.target_progress,
                factor: 0.0,
                title_opacity: 0.0,
                open: false,
            },
            Transform::from_translation(position).with_scale(Vec3::splat(config.reveal.min_scale)),
        ));

        for item in layout.0.fauna_for(marker.id) {
            commands.spawn((
                Name::new(format!("fauna#{}.{}", marker.id, item.slot)),
                MarkerFauna {
                    marker: marker.id,
                    slot: item.slot,
                    label: item.label.clone(),
                    scale: 0.0,
                    label_visible: false,
                },
                Transform::from_translation(position + item.offset)
                    .with_rotation(Quat::from_rotation_y(item.yaw))
                    .with_scale(Vec3::ZERO),
            ));
        }
    }

    tracing::info!(
        "[scene] spawned {} props, {} markers, {} fauna (layout seed {})",
        layout.0.props.len(),
        config.markers.len(),
        layout.0.fauna.len(),
        layout.0.seed
    );
}
