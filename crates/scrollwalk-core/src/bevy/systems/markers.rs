//! Section marker reveal and the vegetation rings around them.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::bevy::{InteractionRes, MarkerFauna, SceneSettings, ScrollInput, SectionMarker, Viewport};
use crate::interaction::MarkerId;
use crate::smoothing::Smooth;

/// System to reveal markers as the walk approaches them.
///
/// The body scale follows the eased reveal factor directly; only the
/// surrounding vegetation is smoothed.
pub fn reveal_markers(
    scroll: Res<ScrollInput>,
    settings: Res<SceneSettings>,
    viewport: Res<Viewport>,
    interaction: Res<InteractionRes>,
    mut markers: Query<(&mut SectionMarker, &mut Transform)>,
) {
    let progress = scroll.0.progress();
    let reveal = &settings.0.reveal;
    let class = viewport.class(settings.0.camera.compact_width);

    for (mut marker, mut transform) in &mut markers {
        let factor = reveal.factor(progress, marker.target_progress);
        marker.factor = factor;
        marker.title_opacity = factor;
        marker.open = interaction.0.is_marker_open(marker.id);
        transform.scale = Vec3::splat(reveal.body_scale(factor, class));
    }
}

/// System to grow each marker's vegetation ring with its reveal factor.
pub fn grow_marker_fauna(
    settings: Res<SceneSettings>,
    interaction: Res<InteractionRes>,
    markers: Query<&SectionMarker>,
    mut fauna: Query<(&mut MarkerFauna, &mut Transform), Without<SectionMarker>>,
) {
    let factors: HashMap<MarkerId, f32> = markers.iter().map(|m| (m.id, m.factor)).collect();
    let config = &settings.0.layout.fauna;

    for (mut item, mut transform) in &mut fauna {
        let factor = factors.get(&item.marker).copied().unwrap_or(0.0);
        item.scale = item.scale.smooth(factor * config.base_scale, config.rate);
        item.label_visible = item.label.is_some() && interaction.0.is_marker_open(item.marker);
        transform.scale = Vec3::splat(item.scale);
    }
}
