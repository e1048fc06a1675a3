//! Staggered growth of the final-scene props.

use bevy::prelude::*;

use crate::bevy::{GrowingProp, SceneSettings, ScrollInput};
use crate::growth::target_scale;
use crate::smoothing::Smooth;

/// System to chase every prop's eased target scale.
pub fn grow_props(
    scroll: Res<ScrollInput>,
    settings: Res<SceneSettings>,
    mut props: Query<(&mut GrowingProp, &mut Transform)>,
) {
    let progress = scroll.0.progress();
    let growth = &settings.0.growth;

    for (mut prop, mut transform) in &mut props {
        let target = target_scale(progress, prop.threshold, prop.max_scale, growth.easing);
        prop.scale = prop.scale.smooth(target, growth.rate);
        transform.scale = Vec3::splat(prop.scale);
    }
}
