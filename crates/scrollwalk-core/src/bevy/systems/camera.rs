//! Camera rig system.

use bevy::prelude::*;

use crate::bevy::{Character, MainCamera, RigCamera, SceneSettings, ScrollInput, Viewport};

/// System to move the camera rig toward this frame's target pose.
///
/// Runs after the character has moved; the camera aims at the character's
/// position from this frame.
pub fn update_camera_rig(
    scroll: Res<ScrollInput>,
    settings: Res<SceneSettings>,
    viewport: Res<Viewport>,
    characters: Query<&Transform, (With<Character>, Without<MainCamera>)>,
    mut cameras: Query<(&mut RigCamera, &mut Transform), (With<MainCamera>, Without<Character>)>,
) {
    let progress = scroll.0.progress();
    if progress <= 0.0 {
        return;
    }
    let Ok(character) = characters.single() else {
        return;
    };

    let camera = &settings.0.camera;
    let class = viewport.class(camera.compact_width);
    for (mut rig, mut transform) in &mut cameras {
        rig.pose = camera.step(rig.pose, progress, character.translation, class);
        transform.translation = rig.pose.position;
        transform.look_at(character.translation, Vec3::Y);
        tracing::trace!(
            "[camera] pos={:?} fov={:.2}",
            rig.pose.position,
            rig.pose.fov_degrees
        );
    }
}
