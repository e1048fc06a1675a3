//! Command processing system.
//!
//! Drains the host command queue once per frame, before any motion system.

use bevy::prelude::*;

use crate::bevy::{CommandQueue, ExperienceState, SceneCommand, SceneInputEvent, SkipIntroEvent, Viewport};

/// System to turn queued host commands into typed messages.
///
/// Scroll and click input is dropped while the loading screen covers the
/// scene; viewport changes and intro skips are always accepted.
pub fn process_commands(
    command_queue: Res<CommandQueue>,
    state: Res<State<ExperienceState>>,
    mut viewport: ResMut<Viewport>,
    mut inputs: MessageWriter<SceneInputEvent>,
    mut skip_intro: MessageWriter<SkipIntroEvent>,
) {
    let ready = *state.get() == ExperienceState::Ready;

    for command in command_queue.drain() {
        if command.requires_content() && !ready {
            tracing::debug!("[command] {:?} ignored while loading", command);
            continue;
        }
        match command {
            SceneCommand::Scroll { progress } => {
                tracing::trace!("[command] Scroll: {:.4}", progress);
                inputs.write(SceneInputEvent::Scroll { progress });
            }
            SceneCommand::ScrollSettled => {
                tracing::trace!("[command] ScrollSettled");
                inputs.write(SceneInputEvent::ScrollSettled);
            }
            SceneCommand::MarkerClick { id } => {
                tracing::info!("[command] MarkerClick: {}", id);
                inputs.write(SceneInputEvent::MarkerClick { id });
            }
            SceneCommand::SubLabelClick { id, section } => {
                tracing::info!("[command] SubLabelClick: {} -> {}", id, section);
                inputs.write(SceneInputEvent::SubLabelClick { id, section });
            }
            SceneCommand::NavClick { section } => {
                tracing::info!("[command] NavClick: {}", section);
                inputs.write(SceneInputEvent::NavClick { section });
            }
            SceneCommand::CloseClick => {
                tracing::info!("[command] CloseClick");
                inputs.write(SceneInputEvent::Close);
            }
            SceneCommand::SetViewport { width, height } => {
                tracing::info!("[command] SetViewport: {}x{}", width, height);
                viewport.width = width;
                viewport.height = height;
            }
            SceneCommand::SkipIntro => {
                tracing::info!("[command] SkipIntro");
                skip_intro.write(SkipIntroEvent);
            }
        }
    }
}
