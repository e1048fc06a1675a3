//! Single-pole exponential smoothing shared by every chased quantity.
//!
//! `next = current + (target - current) * rate`, evaluated once per frame.
//! The step is not scaled by frame delta: feeding the same
//! current and target twice yields the same next value.

use bevy::math::Vec3;

/// Values that can chase a target with the shared per-frame filter.
pub trait Smooth: Sized {
    /// Moves `self` toward `target` by `rate` of the remaining distance.
    ///
    /// `rate` is clamped to \[0, 1\]; at 1 the target is reached immediately.
    #[must_use]
    fn smooth(self, target: Self, rate: f32) -> Self;
}

impl Smooth for f32 {
    fn smooth(self, target: f32, rate: f32) -> f32 {
        self + (target - self) * clamp_rate(rate)
    }
}

impl Smooth for Vec3 {
    fn smooth(self, target: Vec3, rate: f32) -> Vec3 {
        self.lerp(target, clamp_rate(rate))
    }
}

/// Free-function form of [`Smooth::smooth`].
#[inline]
pub fn smooth<T: Smooth>(current: T, target: T, rate: f32) -> T {
    current.smooth(target, rate)
}

#[inline]
fn clamp_rate(rate: f32) -> f32 {
    if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) }
}
