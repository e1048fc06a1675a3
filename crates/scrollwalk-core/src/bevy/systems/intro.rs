//! Loading / intro timeline systems.

use bevy::prelude::*;

use crate::bevy::{ContentShown, ExperienceState, IntroRes, ScrollInput, SkipIntroEvent};
use crate::intro::IntroEffect;

fn apply_effects(
    effects: Vec<IntroEffect>,
    scroll: &mut ScrollInput,
    next_state: &mut NextState<ExperienceState>,
    shown: &mut MessageWriter<ContentShown>,
) {
    for effect in effects {
        match effect {
            IntroEffect::LoadingPercent(percent) => {
                tracing::debug!("[intro] loading {}%", percent);
            }
            IntroEffect::SetProgress(progress) => {
                tracing::debug!("[intro] warm-up progress {}", progress);
                scroll.0.set_progress(progress);
            }
            IntroEffect::FadeStarted => {
                tracing::info!("[intro] loading complete, fading out");
            }
            IntroEffect::ContentVisible => {
                tracing::info!("[intro] content visible");
                next_state.set(ExperienceState::Ready);
                shown.write(ContentShown);
            }
        }
    }
}

/// System to advance the intro timeline while loading.
pub fn advance_intro(
    time: Res<Time>,
    mut intro: ResMut<IntroRes>,
    mut skip: MessageReader<SkipIntroEvent>,
    mut scroll: ResMut<ScrollInput>,
    mut next_state: ResMut<NextState<ExperienceState>>,
    mut shown: MessageWriter<ContentShown>,
) {
    // Configured skip: visible from the start
    if intro.0.is_content_visible() {
        tracing::info!("[intro] skipped by configuration");
        next_state.set(ExperienceState::Ready);
        shown.write(ContentShown);
        return;
    }

    let effects = if skip.read().count() > 0 {
        intro.0.skip()
    } else {
        intro.0.advance(time.delta_secs())
    };
    apply_effects(effects, &mut scroll, &mut next_state, &mut shown);
}
