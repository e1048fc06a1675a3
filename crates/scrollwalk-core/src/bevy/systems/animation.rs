//! Character clip selection and crossfading.

use bevy::prelude::*;

use crate::bevy::{CharacterAnimation, ClipChanged, SceneSettings, ScrollInput};

/// System to re-evaluate the clip state machine and start crossfades.
pub fn select_character_clip(
    scroll: Res<ScrollInput>,
    settings: Res<SceneSettings>,
    mut animations: Query<&mut CharacterAnimation>,
    mut changes: MessageWriter<ClipChanged>,
) {
    let progress = scroll.0.progress();
    let scrolling = scroll.0.is_actively_scrolling();
    let cutoff = settings.0.character.wave_cutoff;

    for mut animation in &mut animations {
        let Some(transition) = animation.selector.evaluate(progress, scrolling, cutoff) else {
            continue;
        };
        tracing::debug!("[clip] {:?} -> {:?}", transition.from, transition.to);
        animation.mixer.crossfade_to(transition.to);
        changes.write(ClipChanged {
            from: transition.from,
            to: transition.to,
        });
    }
}

/// System to advance clip playback and fade weights.
pub fn advance_clip_mixer(time: Res<Time>, mut animations: Query<&mut CharacterAnimation>) {
    let dt = time.delta_secs();
    for mut animation in &mut animations {
        animation.mixer.advance(dt);
    }
}
