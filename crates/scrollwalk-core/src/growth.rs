//! Progress-driven growth of props and section markers.
//!
//! Props share one global progress signal but each waits for its own
//! staggered threshold; past it, an eased local progress drives the target
//! scale, which the smoothing filter then chases.

use crate::camera_rig::ViewportClass;
use crate::config::{GrowthConfig, RevealConfig};
use crate::easing::{Easing, ramp};

/// Activation threshold of the prop at `index`.
pub fn stagger_threshold(base: f32, per_item_offset: f32, index: usize) -> f32 {
    base + index as f32 * per_item_offset
}

/// Normalized progress past `threshold`, or `None` while inactive.
///
/// Thresholds at or beyond 1 never activate, avoiding a zero denominator.
pub fn local_progress(progress: f32, threshold: f32) -> Option<f32> {
    if threshold >= 1.0 || progress.is_nan() || progress <= threshold {
        return None;
    }
    Some(((progress - threshold) / (1.0 - threshold)).clamp(0.0, 1.0))
}

/// Target scale for a prop: 0 up to its threshold, then `easing(u) * max_scale`.
pub fn target_scale(progress: f32, threshold: f32, max_scale: f32, easing: Easing) -> f32 {
    match local_progress(progress, threshold) {
        Some(u) => easing.apply(u) * max_scale,
        None => 0.0,
    }
}

impl GrowthConfig {
    pub fn threshold(&self, index: usize) -> f32 {
        stagger_threshold(self.base_threshold, self.per_item_offset, index)
    }

    pub fn target_scale(&self, index: usize, progress: f32, max_scale: f32) -> f32 {
        target_scale(progress, self.threshold(index), max_scale, self.easing)
    }
}

impl RevealConfig {
    /// Eased reveal of a marker over `[target - window, target]`.
    pub fn factor(&self, progress: f32, target_progress: f32) -> f32 {
        let start = target_progress - self.window;
        self.easing.apply(ramp(progress, start, target_progress))
    }

    /// Marker body scale for a reveal factor; never fully zero.
    pub fn body_scale(&self, factor: f32, viewport: ViewportClass) -> f32 {
        let base = match viewport {
            ViewportClass::Compact => self.compact_scale,
            ViewportClass::Spacious => self.spacious_scale,
        };
        self.min_scale + factor * base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger() {
        assert!((stagger_threshold(0.96, 0.0005, 0) - 0.96).abs() < 1e-6);
        assert!((stagger_threshold(0.96, 0.0005, 10) - 0.965).abs() < 1e-6);
    }

    #[test]
    fn test_zero_at_or_below_threshold() {
        let theta = 0.96;
        for p in [0.0, 0.5, 0.9, 0.959, 0.96] {
            assert_eq!(target_scale(p, theta, 1.2, Easing::ElasticOut), 0.0, "p={p}");
        }
    }

    #[test]
    fn test_overshoot_then_settle() {
        let theta = 0.5;
        let max_scale = 2.0;
        let peak = (1..200)
            .map(|i| target_scale(0.5 + i as f32 * 0.0025, theta, max_scale, Easing::ElasticOut))
            .fold(f32::MIN, f32::max);
        assert!(peak > max_scale);
        let end = target_scale(1.0, theta, max_scale, Easing::ElasticOut);
        assert!((end - max_scale).abs() < 0.01);
    }

    #[test]
    fn test_threshold_at_one_never_activates() {
        assert_eq!(local_progress(1.0, 1.0), None);
        assert_eq!(local_progress(1.0, 1.2), None);
        assert_eq!(target_scale(1.0, 1.0, 1.0, Easing::ElasticOut), 0.0);
    }

    #[test]
    fn test_out_of_range_progress_is_clamped() {
        assert_eq!(local_progress(1.5, 0.5), Some(1.0));
        assert_eq!(local_progress(f32::NAN, 0.5), None);
    }

    #[test]
    fn test_growth_config_thresholds() {
        let config = GrowthConfig::default();
        assert!((config.threshold(0) - 0.96).abs() < 1e-6);
        assert!(config.threshold(1) > config.threshold(0));
        assert_eq!(config.target_scale(0, 0.5, 1.0), 0.0);
        assert!(config.target_scale(0, 0.99, 1.0) > 0.0);
    }

    #[test]
    fn test_reveal_factor_window() {
        let reveal = RevealConfig::default();
        assert_eq!(reveal.factor(0.05, 0.2), 0.0);
        assert_eq!(reveal.factor(0.1, 0.2), 0.0);
        assert!((reveal.factor(0.15, 0.2) - 0.5).abs() < 1e-5);
        assert!((reveal.factor(0.2, 0.2) - 1.0).abs() < 1e-6);
        assert!((reveal.factor(0.9, 0.2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_scale_per_viewport() {
        let reveal = RevealConfig::default();
        assert!((reveal.body_scale(0.0, ViewportClass::Spacious) - 0.01).abs() < 1e-6);
        assert!((reveal.body_scale(1.0, ViewportClass::Spacious) - 1.11).abs() < 1e-5);
        assert!((reveal.body_scale(1.0, ViewportClass::Compact) - 0.61).abs() < 1e-5);
    }
}
