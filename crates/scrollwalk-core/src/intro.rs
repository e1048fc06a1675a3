//! Loading / intro timeline.
//!
//! After an initial delay the loading percentage steps through the configured
//! phases, one per `phase_secs`. A phase may also nudge scroll progress so the
//! scene renders a first frame of motion while hidden. Once loading reaches
//! 100 % the loading screen fades and content becomes visible.

use crate::config::IntroConfig;

/// Something the intro wants applied to the rest of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntroEffect {
    LoadingPercent(f32),
    SetProgress(f32),
    FadeStarted,
    ContentVisible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntroSequence {
    config: IntroConfig,
    elapsed: f32,
    fired: usize,
    loading_percent: f32,
    forced_progress: Option<f32>,
    fade_started_at: Option<f32>,
    content_visible: bool,
}

impl IntroSequence {
    /// A configuration with `skip` set starts with content already visible.
    pub fn new(config: &IntroConfig) -> Self {
        Self {
            config: config.clone(),
            elapsed: 0.0,
            fired: 0,
            loading_percent: if config.skip { 100.0 } else { 0.0 },
            forced_progress: None,
            fade_started_at: None,
            content_visible: config.skip,
        }
    }

    pub fn loading_percent(&self) -> f32 {
        self.loading_percent
    }

    pub fn is_content_visible(&self) -> bool {
        self.content_visible
    }

    pub fn is_fading(&self) -> bool {
        self.fade_started_at.is_some() && !self.content_visible
    }

    fn phase_time(&self, index: usize) -> f32 {
        self.config.initial_delay_secs + index as f32 * self.config.phase_secs
    }

    /// Advances the timeline by `dt` seconds and returns what happened.
    pub fn advance(&mut self, dt: f32) -> Vec<IntroEffect> {
        let mut effects = Vec::new();
        if self.content_visible {
            return effects;
        }
        self.elapsed += dt.max(0.0);

        let phase_count = self.config.phases.len();
        while self.fired < phase_count && self.elapsed >= self.phase_time(self.fired) {
            let at = self.phase_time(self.fired);
            let phase = self.config.phases[self.fired];
            self.fired += 1;

            self.loading_percent = phase.loading_percent;
            effects.push(IntroEffect::LoadingPercent(phase.loading_percent));
            if let Some(progress) = phase.progress {
                self.forced_progress = Some(progress);
                effects.push(IntroEffect::SetProgress(progress));
            }
            if self.fade_started_at.is_none()
                && (phase.loading_percent >= 100.0 || self.fired == phase_count)
            {
                self.fade_started_at = Some(at);
                effects.push(IntroEffect::FadeStarted);
            }
        }

        if phase_count == 0
            && self.fade_started_at.is_none()
            && self.elapsed >= self.config.initial_delay_secs
        {
            self.fade_started_at = Some(self.config.initial_delay_secs);
            self.loading_percent = 100.0;
            effects.push(IntroEffect::LoadingPercent(100.0));
            effects.push(IntroEffect::FadeStarted);
        }

        if let Some(start) = self.fade_started_at {
            if self.elapsed >= start + self.config.fade_secs {
                self.content_visible = true;
                effects.push(IntroEffect::ContentVisible);
            }
        }
        effects
    }

    /// Jumps to the end of the timeline, undoing any warm-up progress.
    pub fn skip(&mut self) -> Vec<IntroEffect> {
        if self.content_visible {
            return Vec::new();
        }
        let mut effects = Vec::new();
        if self.forced_progress.is_some_and(|p| p != 0.0) {
            effects.push(IntroEffect::SetProgress(0.0));
        }
        self.forced_progress = None;
        self.fired = self.config.phases.len();
        self.loading_percent = 100.0;
        self.content_visible = true;
        effects.push(IntroEffect::LoadingPercent(100.0));
        effects.push(IntroEffect::ContentVisible);
        effects
    }
}
