//! Shaping functions applied to targets before smoothing.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curve applied to a normalized local progress value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic acceleration then deceleration.
    EaseInOutQuad,
    /// Exponentially decaying sine; rises past 1.0 before settling on it.
    ElasticOut,
}

impl Easing {
    /// Applies the easing function to a normalized value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::EaseInOutQuad => ease_in_out_quad(t),
            Self::ElasticOut => elastic_out(t),
        }
    }
}

/// Elastic "pop": `2^(-10u) * sin((10u - 0.75) * 2π/3) + 1`, with `f(0) = 0`.
pub fn elastic_out(u: f32) -> f32 {
    if u <= 0.0 {
        return 0.0;
    }
    let u = u.min(1.0);
    let c4 = (2.0 * PI) / 3.0;
    2.0_f32.powf(-10.0 * u) * ((u * 10.0 - 0.75) * c4).sin() + 1.0
}

pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Clamped linear ramp: 0 at or below `start`, 1 at or above `end`.
///
/// An empty or inverted range degenerates to a step at `start`.
pub fn ramp(value: f32, start: f32, end: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    let span = end - start;
    if span <= f32::EPSILON {
        return if value >= start { 1.0 } else { 0.0 };
    }
    ((value - start) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elastic_endpoints() {
        assert_eq!(elastic_out(0.0), 0.0);
        assert_eq!(elastic_out(-1.0), 0.0);
        assert!((elastic_out(1.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_elastic_overshoots_then_settles() {
        let peak = (1..100)
            .map(|i| elastic_out(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "peak {peak} should overshoot");
        assert!(peak < 1.5);
        assert!((elastic_out(0.99) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_elastic_starts_near_zero() {
        // Continuous at the origin: the sine term starts at -1.
        assert!(elastic_out(1e-4) < 0.01);
    }

    #[test]
    fn test_ease_in_out_quad() {
        assert_eq!(Easing::EaseInOutQuad.apply(0.0), 0.0);
        assert!((Easing::EaseInOutQuad.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::EaseInOutQuad.apply(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::EaseInOutQuad.apply(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_apply_clamps_input() {
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert_eq!(Easing::Linear.apply(-2.0), 0.0);
        assert_eq!(Easing::ElasticOut.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_ramp() {
        assert_eq!(ramp(0.05, 0.1, 0.2), 0.0);
        assert_eq!(ramp(0.1, 0.1, 0.2), 0.0);
        assert!((ramp(0.15, 0.1, 0.2) - 0.5).abs() < 1e-5);
        assert_eq!(ramp(0.2, 0.1, 0.2), 1.0);
        assert_eq!(ramp(3.0, 0.1, 0.2), 1.0);
    }

    #[test]
    fn test_ramp_empty_range() {
        assert_eq!(ramp(0.4, 0.5, 0.5), 0.0);
        assert_eq!(ramp(0.5, 0.5, 0.5), 1.0);
    }
}
