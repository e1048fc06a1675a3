//! Character movement along the path.

use bevy::prelude::*;

use crate::bevy::{Character, SceneSettings, ScenePath, ScrollInput};

/// Yaw that turns a model facing +Z toward `heading`.
pub fn heading_yaw(heading: Vec3) -> f32 {
    heading.x.atan2(heading.z)
}

/// System to place the character on the path and face it forward.
///
/// Nothing moves before the first scroll. The character only turns once
/// progress passes `heading_min_progress`, so it faces the camera while waving.
pub fn move_character(
    scroll: Res<ScrollInput>,
    path: Res<ScenePath>,
    settings: Res<SceneSettings>,
    mut characters: Query<(&mut Character, &mut Transform)>,
) {
    let progress = scroll.0.progress();
    if progress <= 0.0 {
        return;
    }

    let position = path.0.sample_position(progress);
    for (mut character, mut transform) in &mut characters {
        transform.translation = position;
        if progress > settings.0.character.heading_min_progress {
            let heading = path.0.sample_heading(progress, character.heading);
            character.heading = heading;
            transform.rotation = Quat::from_rotation_y(heading_yaw(heading));
        }
    }
}
