use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveDeriv};

use crate::foundation::core::{BezPath, PathEl, PathSeg, PathStyle, Point, Vec2, unit};

/// Accuracy passed to kurbo's arc-length routines.
pub const ARCLEN_ACCURACY: f64 = 1e-7;

/// Geometric path that can be queried by distance traveled.
pub trait Curve {
    fn path(&self) -> &BezPath;

    /// Length parameterization, computed once per curve instance.
    fn measure(&self) -> &PathMeasure;

    fn style(&self) -> &PathStyle;

    /// Straight curves reconstruct exactly with polylines.
    fn is_straight(&self) -> bool {
        false
    }

    fn total_length(&self) -> f64 {
        self.measure().total_length()
    }

    fn position_and_tangent_at(&self, distance: f64) -> (Point, Vec2) {
        self.measure().position_and_tangent_at(distance)
    }
}

/// Arc-length table over the segments of a [`BezPath`].
#[derive(Clone, Debug)]
pub struct PathMeasure {
    start: Point,
    segments: Vec<PathSeg>,
    // Arc length at the end of each segment.
    cumulative: Vec<f64>,
    total: f64,
}

impl PathMeasure {
    pub fn new(path: &BezPath) -> Self {
        let start = path
            .elements()
            .iter()
            .find_map(|el| match el {
                PathEl::MoveTo(p) => Some(*p),
                _ => None,
            })
            .unwrap_or(Point::ZERO);

        let segments: Vec<PathSeg> = path.segments().collect();
        let mut cumulative = Vec::with_capacity(segments.len());
        let mut total = 0.0;
        for seg in &segments {
            total += seg.arclen(ARCLEN_ACCURACY);
            cumulative.push(total);
        }

        Self {
            start,
            segments,
            cumulative,
            total,
        }
    }

    pub fn total_length(&self) -> f64 {
        self.total
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Position and unit tangent `distance` along the path (clamped to `[0, total]`).
    pub fn position_and_tangent_at(&self, distance: f64) -> (Point, Vec2) {
        let Some(last) = self.segments.len().checked_sub(1) else {
            return (self.start, Vec2::new(1.0, 0.0));
        };

        let d = distance.clamp(0.0, self.total);
        let idx = self.cumulative.partition_point(|&c| c < d).min(last);
        let seg_start = if idx == 0 { 0.0 } else { self.cumulative[idx - 1] };
        let seg_len = self.cumulative[idx] - seg_start;
        let local = d - seg_start;

        let seg = self.segments[idx];
        let param = if seg_len <= 0.0 {
            0.0
        } else if local >= seg_len {
            1.0
        } else {
            seg.inv_arclen(local, ARCLEN_ACCURACY)
        };

        let tangent = segment_tangent(seg, param)
            .or_else(|| self.neighbour_tangent(idx))
            .unwrap_or(Vec2::new(1.0, 0.0));
        (seg.eval(param), tangent)
    }

    // Degenerate segments borrow the direction of the nearest non-degenerate one.
    fn neighbour_tangent(&self, idx: usize) -> Option<Vec2> {
        let after = self.segments[idx + 1..]
            .iter()
            .find_map(|s| segment_tangent(*s, 0.0));
        after.or_else(|| {
            self.segments[..idx]
                .iter()
                .rev()
                .find_map(|s| segment_tangent(*s, 1.0))
        })
    }
}

/// Unit derivative direction of `seg` at `t`.
///
/// A control point coinciding with its endpoint zeroes the derivative there; the limit
/// direction is then taken just inside the segment, and the chord is the last resort.
pub(crate) fn segment_tangent(seg: PathSeg, t: f64) -> Option<Vec2> {
    let deriv = |t: f64| match seg {
        PathSeg::Line(l) => l.p1 - l.p0,
        PathSeg::Quad(q) => q.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(c) => c.deriv().eval(t).to_vec2(),
    };
    let nudged = if t < 0.5 { t + 1e-4 } else { t - 1e-4 };
    unit(deriv(t))
        .or_else(|| unit(deriv(nudged)))
        .or_else(|| unit(seg.end() - seg.start()))
}

#[cfg(test)]
#[path = "../../tests/unit/path/measure.rs"]
mod tests;
