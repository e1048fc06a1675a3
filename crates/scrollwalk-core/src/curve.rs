//! Path curve the character walks along.
//!
//! A centripetal Catmull-Rom spline through a fixed list of control points.
//! The parameter `t` is spread uniformly over the segments (not arc length),
//! so equal scroll deltas cover one segment each regardless of its length.

use bevy::math::Vec3;

use crate::config::PathConfig;

/// Step used to look ahead along the curve when deriving the heading.
pub const HEADING_EPSILON: f32 = 0.01;

/// Tangent vectors shorter than this are treated as degenerate.
const MIN_HEADING_LENGTH: f32 = 1e-5;

/// Immutable smooth curve through ordered control points.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCurve {
    points: Vec<Vec3>,
}

impl PathCurve {
    /// Builds a curve from control points.
    ///
    /// Returns `None` for fewer than two points; `PathConfig` validation
    /// rejects such configurations before they get here.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points })
    }

    pub fn from_config(config: &PathConfig) -> Option<Self> {
        Self::new(config.control_points.iter().map(|p| Vec3::from_array(*p)).collect())
    }

    /// The built-in five-point walk.
    pub fn default_path() -> Self {
        let points = PathConfig::default()
            .control_points
            .iter()
            .map(|p| Vec3::from_array(*p))
            .collect();
        Self { points }
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of spline segments (one between each pair of control points).
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Longest straight-line distance between consecutive control points.
    pub fn max_segment_length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0, f32::max)
    }

    /// Position on the curve at `t`, clamped to \[0, 1\].
    pub fn sample_position(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.points.len() - 1;

        let scaled = t * last as f32;
        let mut index = scaled.floor() as usize;
        let mut weight = scaled - index as f32;
        if index >= last {
            index = last - 1;
            weight = 1.0;
        }

        let p1 = self.points[index];
        let p2 = self.points[index + 1];
        // Endpoints are extrapolated so the curve passes through every point.
        let p0 = if index > 0 {
            self.points[index - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if index + 2 <= last {
            self.points[index + 2]
        } else {
            p2 * 2.0 - p1
        };

        centripetal_segment(p0, p1, p2, p3, weight)
    }

    /// Unit forward direction at `t`, looking `HEADING_EPSILON` ahead.
    ///
    /// Near the end of the curve the look-ahead point collapses onto the
    /// sampled point; `previous` is returned unchanged in that case.
    pub fn sample_heading(&self, t: f32, previous: Vec3) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let here = self.sample_position(t);
        let ahead = self.sample_position((t + HEADING_EPSILON).min(1.0));
        let delta = ahead - here;
        if delta.length() < MIN_HEADING_LENGTH {
            return previous;
        }
        delta.try_normalize().unwrap_or(previous)
    }
}

/// Evaluates one centripetal Catmull-Rom segment between `p1` and `p2`.
fn centripetal_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let mut dt0 = p0.distance_squared(p1).powf(0.25);
    let mut dt1 = p1.distance_squared(p2).powf(0.25);
    let mut dt2 = p2.distance_squared(p3).powf(0.25);

    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    // Cubic Hermite form
    let c0 = p1;
    let c1 = t1;
    let c2 = p1 * -3.0 + p2 * 3.0 - t1 * 2.0 - t2;
    let c3 = p1 * 2.0 - p2 * 2.0 + t1 + t2;

    c0 + c1 * t + c2 * (t * t) + c3 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_curve() -> PathCurve {
        PathCurve::from_config(&PathConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_single_point() {
        assert!(PathCurve::new(vec![Vec3::ZERO]).is_none());
        assert_eq!(PathCurve::default_path(), default_curve());
    }

    #[test]
    fn test_passes_through_control_points() {
        let curve = default_curve();
        let n = curve.segment_count() as f32;
        for (i, point) in curve.control_points().iter().enumerate() {
            let sampled = curve.sample_position(i as f32 / n);
            assert!(
                sampled.distance(*point) < 1e-3,
                "point {i}: {sampled:?} vs {point:?}"
            );
        }
    }

    #[test]
    fn test_clamps_out_of_range_parameter() {
        let curve = default_curve();
        assert_eq!(curve.sample_position(-0.5), curve.sample_position(0.0));
        assert_eq!(curve.sample_position(1.7), curve.sample_position(1.0));
        assert_eq!(curve.sample_position(f32::NAN), curve.sample_position(0.0));
    }

    #[test]
    fn test_no_teleporting() {
        let curve = default_curve();
        let max_jump = curve.max_segment_length();
        let mut prev = curve.sample_position(0.0);
        for step in 1..=1000 {
            let p = curve.sample_position(step as f32 / 1000.0);
            assert!(p.distance(prev) <= max_jump, "jump at step {step}");
            assert!(p.distance(prev) < 0.5, "large step at {step}");
            prev = p;
        }
    }

    #[test]
    fn test_heading_is_unit_and_forward() {
        let curve = default_curve();
        let heading = curve.sample_heading(0.1, Vec3::Z);
        assert!((heading.length() - 1.0).abs() < 1e-4);
        // Path heads towards +X overall
        assert!(heading.x > 0.0);
    }

    #[test]
    fn test_heading_holds_previous_at_end() {
        let curve = default_curve();
        let previous = Vec3::new(0.6, 0.0, 0.8);
        assert_eq!(curve.sample_heading(1.0, previous), previous);
    }

    #[test]
    fn test_heading_with_coincident_points() {
        let curve = PathCurve::new(vec![Vec3::ONE, Vec3::ONE, Vec3::ONE]).unwrap();
        assert_eq!(curve.sample_heading(0.5, Vec3::X), Vec3::X);
        assert!(!curve.sample_position(0.5).is_nan());
    }
}
