use crate::foundation::core::{BezPath, Point, Vec2};
use crate::foundation::error::{FloeError, FloeResult};
use crate::path::measure::Curve;

const MAX_SAMPLES: f64 = 1_000_000.0;

/// How sampled points are joined back into renderable geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconstructMode {
    /// Straight segments between samples; exact for straight curves.
    Polyline,
    /// One cubic per sample pair, built from the sampled end tangents.
    #[default]
    Smooth,
}

/// Discretized sub-range of a curve.
///
/// Built once per frame and immutable afterwards. Dependent geometry (arrowheads, labels)
/// queries the stored samples instead of walking the source curve again.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSample {
    start: f64,
    end: f64,
    params: Vec<f64>,
    points: Vec<Point>,
    tangents: Vec<Vec2>,
    total_length: f64,
    curve_length: f64,
    path: BezPath,
}

/// Check `0 <= start <= end <= 1` (NaN fails).
pub fn validate_subrange(start: f64, end: f64) -> FloeResult<()> {
    if !(0.0 <= start && start <= end && end <= 1.0) {
        return Err(FloeError::domain_range(format!(
            "sub-range must satisfy 0 <= start <= end <= 1, got start={start} end={end}"
        )));
    }
    Ok(())
}

/// Sample `curve` between the fractional positions `start` and `end`.
///
/// Samples sit at `start + i * step` while below `end`, plus one forced sample at exactly
/// `end`; fractions are converted to distances through the curve's arc length.
#[tracing::instrument(level = "trace", skip(curve))]
pub fn extract_subrange(
    curve: &dyn Curve,
    start: f64,
    end: f64,
    step: f64,
    mode: ReconstructMode,
) -> FloeResult<PathSample> {
    validate_subrange(start, end)?;
    if !(step > 0.0 && step.is_finite()) {
        return Err(FloeError::domain_range(format!(
            "subdivision step must be a positive finite number, got {step}"
        )));
    }
    if (end - start) / step > MAX_SAMPLES {
        return Err(FloeError::domain_range(format!(
            "step {step} over [{start}, {end}] exceeds {MAX_SAMPLES} samples"
        )));
    }
    let total = curve.total_length();
    if !(total > 0.0) {
        return Err(FloeError::empty_path("cannot sample a zero-length curve"));
    }

    // Skip interior samples that would sit on top of the forced end sample.
    let end_guard = end - step * 1e-6;
    let mut params = Vec::new();
    for i in 0.. {
        let u = start + f64::from(i) * step;
        if u >= end_guard {
            break;
        }
        params.push(u);
    }
    params.push(end);

    let (points, tangents): (Vec<Point>, Vec<Vec2>) = params
        .iter()
        .map(|u| curve.position_and_tangent_at(u * total))
        .unzip();

    let path = match mode {
        ReconstructMode::Polyline => polyline(&points),
        ReconstructMode::Smooth => hermite_cubics(&points, &tangents),
    };

    Ok(PathSample {
        start,
        end,
        params,
        points,
        tangents,
        total_length: (end - start) * total,
        curve_length: total,
        path,
    })
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

// Unit tangents become cubic derivatives once scaled by the chord: c1 = p0 + t0*len/3,
// c2 = p1 - t1*len/3.
fn hermite_cubics(points: &[Point], tangents: &[Vec2]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(*first);
    for (p, t) in points.windows(2).zip(tangents.windows(2)) {
        let (p0, p1) = (p[0], p[1]);
        let len = (p1 - p0).hypot();
        let c1 = p0 + t[0] * (len / 3.0);
        let c2 = p1 - t[1] * (len / 3.0);
        path.curve_to(c1, c2, p1);
    }
    path
}

impl PathSample {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Curve fractions at which the samples were taken.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn tangents(&self) -> &[Vec2] {
        &self.tangents
    }

    /// Arc length covered by the sub-range.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Arc length of the whole source curve.
    pub fn curve_length(&self) -> f64 {
        self.curve_length
    }

    /// Reconstructed geometry for rendering.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Midpoints of consecutive samples.
    pub fn midpoints(&self) -> Vec<Point> {
        self.points.windows(2).map(|w| w[0].midpoint(w[1])).collect()
    }

    /// Sample nearest to fraction `t` of the sub-range (0 = start sample, 1 = end sample).
    pub fn point_and_tangent_at(&self, t: f64) -> (Point, Vec2) {
        let target = self.start + t.clamp(0.0, 1.0) * (self.end - self.start);
        let idx = self.params.partition_point(|&u| u < target);
        let idx = match idx {
            0 => 0,
            i if i >= self.params.len() => self.params.len() - 1,
            i if target - self.params[i - 1] <= self.params[i] - target => i - 1,
            i => i,
        };
        (self.points[idx], self.tangents[idx])
    }
}

/// Shrink a sub-range so terminal decorations fit inside it.
///
/// `end` moves back by `end_len / curve_length` (never before `start`) and `start` moves
/// forward by `start_len / curve_length` (never past the new end). When both reservations
/// together exceed the sub-range length, each is capped at half of it.
pub fn reserve_ends(
    start: f64,
    end: f64,
    curve_length: f64,
    start_len: f64,
    end_len: f64,
) -> FloeResult<(f64, f64)> {
    validate_subrange(start, end)?;
    if !(curve_length > 0.0) {
        return Err(FloeError::empty_path(
            "cannot reserve arrowhead length on a zero-length curve",
        ));
    }
    if start_len < 0.0 || end_len < 0.0 {
        return Err(FloeError::domain_range(format!(
            "reserved lengths must be >= 0, got start={start_len} end={end_len}"
        )));
    }

    let available = (end - start) * curve_length;
    let (mut start_len, mut end_len) = (start_len, end_len);
    if start_len > 0.0 && end_len > 0.0 && start_len + end_len > available {
        start_len = start_len.min(available / 2.0);
        end_len = end_len.min(available / 2.0);
    }

    let new_end = (end - end_len / curve_length).max(start);
    let new_start = (start + start_len / curve_length).min(new_end);
    Ok((new_start, new_end))
}

#[cfg(test)]
#[path = "../../tests/unit/path/sample.rs"]
mod tests;
