use std::any::Any;

use kurbo::Shape;
use smallvec::SmallVec;

use crate::foundation::core::{BezPath, PathStyle, Point, Rect, Vec2, unit};
use crate::foundation::error::{FloeError, FloeResult};
use crate::path::sample::{PathSample, ReconstructMode, extract_subrange, reserve_ends};
use crate::primitives::partial::DEFAULT_STEP;
use crate::scene::node::{Node, NodeRef, Surface};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowHeadStyle {
    /// Two open strokes meeting at the tip.
    #[default]
    Triangle,
    /// Closed triangle, filled with the stroke color and outlined.
    FilledTriangle,
}

/// One placed arrowhead: the tip and the two barb corners.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowHead {
    pub tip: Point,
    pub corners: [Point; 2],
    pub style: ArrowHeadStyle,
}

impl ArrowHead {
    /// Head pointing along `direction` with its tip at `tip`. `angle` is the half-opening
    /// angle in degrees.
    pub fn new(
        tip: Point,
        direction: Vec2,
        angle: f64,
        length: f64,
        style: ArrowHeadStyle,
    ) -> Self {
        let back = -unit(direction).unwrap_or(Vec2::new(1.0, 0.0));
        let normal = Vec2::new(-back.y, back.x);
        let (sin, cos) = angle.to_radians().sin_cos();
        let corners = [
            tip + length * (back * cos + normal * sin),
            tip + length * (back * cos - normal * sin),
        ];
        Self {
            tip,
            corners,
            style,
        }
    }

    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.corners[0]);
        path.line_to(self.tip);
        path.line_to(self.corners[1]);
        if self.style == ArrowHeadStyle::FilledTriangle {
            path.close_path();
        }
        path
    }
}

/// How far a mitered stroke of width `thickness` pokes past the tip of a head with half-angle
/// `angle` (degrees).
pub fn tip_overshoot(thickness: f64, angle: f64) -> f64 {
    let sin = angle.to_radians().sin().abs();
    if sin <= 1e-9 { 0.0 } else { thickness / (2.0 * sin) }
}

/// A curve drawn between `partial_start` and `partial_end` with arrowheads on either end.
///
/// The line is backed off at each headed end by the stroke overshoot so the visible tip lands
/// on the curve's end, and heads shrink when the visible line is shorter than they are.
#[derive(Debug)]
pub struct Arrow {
    child: NodeRef,
    head_start: bool,
    head_end: bool,
    angle: f64,
    head_length: f64,
    head_style: ArrowHeadStyle,
    partial_start: f64,
    partial_end: f64,
    step: f64,
    line: PathSample,
    style: PathStyle,
    heads: SmallVec<[ArrowHead; 2]>,
}

static ARROW_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Arrow",
    fields: &[
        FieldDesc::interp("child", FieldKind::Node),
        FieldDesc::interp("head_start", FieldKind::Bool),
        FieldDesc::interp("head_end", FieldKind::Bool),
        FieldDesc::interp("angle", FieldKind::Scalar),
        FieldDesc::interp("head_length", FieldKind::Scalar),
        FieldDesc::fixed("head_style", FieldKind::Opaque),
        FieldDesc::interp("partial_start", FieldKind::Scalar),
        FieldDesc::interp("partial_end", FieldKind::Scalar),
        FieldDesc::fixed("step", FieldKind::Scalar),
    ],
};

/// Author-facing arrow options. `Default` gives an end-only open head of 20 units at 30 degrees.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArrowOptions {
    pub head_start: bool,
    pub head_end: bool,
    pub angle: f64,
    pub head_length: f64,
    pub head_style: ArrowHeadStyle,
    pub partial_start: f64,
    pub partial_end: f64,
    pub step: f64,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            head_start: false,
            head_end: true,
            angle: 30.0,
            head_length: 20.0,
            head_style: ArrowHeadStyle::Triangle,
            partial_start: 0.0,
            partial_end: 1.0,
            step: DEFAULT_STEP,
        }
    }
}

impl Arrow {
    pub fn new(child: impl Into<NodeRef>) -> FloeResult<Self> {
        Self::with_options(child, ArrowOptions::default())
    }

    pub fn with_options(child: impl Into<NodeRef>, opts: ArrowOptions) -> FloeResult<Self> {
        let child = child.into();
        let curve = child.as_curve().ok_or_else(|| {
            FloeError::validation(format!("Arrow needs a curve child, got {}", child.type_name()))
        })?;
        if opts.head_length < 0.0 {
            return Err(FloeError::domain_range(format!(
                "arrow head length must be >= 0, got {}",
                opts.head_length
            )));
        }
        let style = curve.style().clone();

        let overshoot = tip_overshoot(style.thickness, opts.angle);
        let reserve = |on: bool| if on { overshoot } else { 0.0 };
        let (start, end) = reserve_ends(
            opts.partial_start,
            opts.partial_end,
            curve.total_length(),
            reserve(opts.head_start),
            reserve(opts.head_end),
        )?;

        let mode = if curve.is_straight() {
            ReconstructMode::Polyline
        } else {
            ReconstructMode::Smooth
        };
        let line = extract_subrange(curve, start, end, opts.step, mode)?;

        let mut available = line.total_length();
        if opts.head_start && opts.head_end {
            available /= 2.0;
        }
        let cos = opts.angle.to_radians().cos();
        let head_length = if cos > 0.0 {
            opts.head_length.min(available / cos)
        } else {
            opts.head_length
        };

        let mut heads = SmallVec::new();
        if opts.head_end {
            let (tip, tangent) = line.point_and_tangent_at(1.0);
            heads.push(ArrowHead::new(tip, tangent, opts.angle, head_length, opts.head_style));
        }
        if opts.head_start {
            let (tip, tangent) = line.point_and_tangent_at(0.0);
            heads.push(ArrowHead::new(tip, -tangent, opts.angle, head_length, opts.head_style));
        }

        Ok(Self {
            child,
            head_start: opts.head_start,
            head_end: opts.head_end,
            angle: opts.angle,
            head_length: opts.head_length,
            head_style: opts.head_style,
            partial_start: opts.partial_start,
            partial_end: opts.partial_end,
            step: opts.step,
            line,
            style,
            heads,
        })
    }

    pub fn options(&self) -> ArrowOptions {
        ArrowOptions {
            head_start: self.head_start,
            head_end: self.head_end,
            angle: self.angle,
            head_length: self.head_length,
            head_style: self.head_style,
            partial_start: self.partial_start,
            partial_end: self.partial_end,
            step: self.step,
        }
    }

    /// Visible shaft after end reservation.
    pub fn line(&self) -> &PathSample {
        &self.line
    }

    pub fn heads(&self) -> &[ArrowHead] {
        &self.heads
    }
}

impl Node for Arrow {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &ARROW_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::Node(self.child.clone()),
            Value::Bool(self.head_start),
            Value::Bool(self.head_end),
            Value::Scalar(self.angle),
            Value::Scalar(self.head_length),
            Value::opaque(self.head_style),
            Value::Scalar(self.partial_start),
            Value::Scalar(self.partial_end),
            Value::Scalar(self.step),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&ARROW_DESC, fields)?;
        let child = r.node()?;
        let opts = ArrowOptions {
            head_start: r.bool()?,
            head_end: r.bool()?,
            angle: r.scalar()?,
            head_length: r.scalar()?,
            head_style: r.opaque()?,
            // Overshooting eases push blended fractions past the curve; pin them to its ends.
            partial_start: r.scalar()?.clamp(0.0, 1.0),
            partial_end: r.scalar()?.clamp(0.0, 1.0),
            step: r.scalar()?,
        };
        r.finish()?;
        Ok(Self::with_options(child, opts)?.into())
    }

    fn bounds(&self) -> Rect {
        let half = self.style.thickness / 2.0;
        self.heads
            .iter()
            .fold(self.line.path().bounding_box(), |acc, head| {
                acc.union(head.path().bounding_box())
            })
            .inflate(half, half)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        surface.stroke_path(self.line.path(), &self.style);
        for head in &self.heads {
            let path = head.path();
            if head.style == ArrowHeadStyle::FilledTriangle {
                surface.fill_path(&path, self.style.color);
            }
            // Heads are never dashed.
            let solid = PathStyle {
                dash: None,
                ..self.style.clone()
            };
            surface.stroke_path(&path, &solid);
        }
        Ok(())
    }

    fn children(&self) -> Vec<NodeRef> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/arrow.rs"]
mod tests;
