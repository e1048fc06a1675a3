//! Render-facing systems.
//!
//! These need a real camera, projection and window, so only the unified
//! plugin adds them.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{MainCamera, RigCamera, Viewport};

/// System to turn a freshly spawned rig camera into a perspective 3D camera.
pub fn attach_camera3d(
    mut commands: Commands,
    cameras: Query<(Entity, &RigCamera), (Added<MainCamera>, Without<Camera3d>)>,
) {
    for (entity, rig) in &cameras {
        commands.entity(entity).insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: rig.pose.fov_degrees.to_radians(),
                ..default()
            }),
        ));
        tracing::info!("[camera] Camera3d attached (fov {}°)", rig.pose.fov_degrees);
    }
}

/// System to copy the rig's smoothed field of view into the projection.
pub fn apply_rig_projection(mut cameras: Query<(&RigCamera, &mut Projection), With<MainCamera>>) {
    for (rig, mut projection) in &mut cameras {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = rig.pose.fov_degrees.to_radians();
        }
    }
}

/// System to keep the viewport size in step with the primary window.
pub fn sync_viewport_from_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    viewport.set_if_neq(Viewport {
        width: window.width(),
        height: window.height(),
    });
}
