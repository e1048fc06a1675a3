//! Scroll input state.

use serde::{Deserialize, Serialize};

/// Normalized scroll progress and the "actively scrolling" flag.
///
/// Only scroll input writes this; the motion systems read it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    progress: f32,
    actively_scrolling: bool,
    idle_secs: f32,
}

impl ScrollState {
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_actively_scrolling(&self) -> bool {
        self.actively_scrolling
    }

    /// A scroll event: records progress and (re)arms the activity flag.
    ///
    /// Out-of-range values are clamped; NaN keeps the previous progress.
    pub fn on_scroll(&mut self, progress: f32) {
        if !progress.is_nan() {
            self.progress = progress.clamp(0.0, 1.0);
        }
        self.actively_scrolling = true;
        self.idle_secs = 0.0;
    }

    /// The scroll listener reported that scrolling stopped.
    pub fn settle(&mut self) {
        self.actively_scrolling = false;
    }

    /// Sets progress without counting as user scrolling (intro warm-up).
    pub fn set_progress(&mut self, progress: f32) {
        if !progress.is_nan() {
            self.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// Advances the activity debounce. Returns `true` on the tick the flag
    /// clears after `settle_secs` without scroll events.
    pub fn tick(&mut self, dt: f32, settle_secs: f32) -> bool {
        if !self.actively_scrolling {
            return false;
        }
        self.idle_secs += dt.max(0.0);
        if self.idle_secs >= settle_secs {
            self.actively_scrolling = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_sets_flag_and_clamps() {
        let mut scroll = ScrollState::default();
        scroll.on_scroll(1.4);
        assert_eq!(scroll.progress(), 1.0);
        assert!(scroll.is_actively_scrolling());
        scroll.on_scroll(f32::NAN);
        assert_eq!(scroll.progress(), 1.0);
        scroll.on_scroll(-0.2);
        assert_eq!(scroll.progress(), 0.0);
    }

    #[test]
    fn test_debounce_rearms_on_each_event() {
        let mut scroll = ScrollState::default();
        scroll.on_scroll(0.3);
        assert!(!scroll.tick(0.1, 0.15));
        scroll.on_scroll(0.31);
        assert!(!scroll.tick(0.1, 0.15));
        assert!(scroll.is_actively_scrolling());
        assert!(scroll.tick(0.1, 0.15));
        assert!(!scroll.is_actively_scrolling());
        assert!(!scroll.tick(1.0, 0.15));
    }

    #[test]
    fn test_external_settle() {
        let mut scroll = ScrollState::default();
        scroll.on_scroll(0.5);
        scroll.settle();
        assert!(!scroll.is_actively_scrolling());
        assert_eq!(scroll.progress(), 0.5);
    }

    #[test]
    fn test_warmup_progress_is_not_activity() {
        let mut scroll = ScrollState::default();
        scroll.set_progress(0.0021);
        assert!(!scroll.is_actively_scrolling());
        assert!((scroll.progress() - 0.0021).abs() < 1e-7);
    }
}
