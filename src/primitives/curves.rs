use std::any::Any;
use std::sync::OnceLock;

use kurbo::Shape;

use crate::foundation::core::{BezPath, PathStyle, Point, Rect};
use crate::foundation::error::{FloeError, FloeResult};
use crate::path::measure::{Curve, PathMeasure};
use crate::scene::node::{Node, NodeRef, Surface};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

/// Stroke bounds: path bounding box grown by half the stroke width.
fn stroke_bounds(path: &BezPath, style: &PathStyle) -> Rect {
    let half = style.thickness / 2.0;
    path.bounding_box().inflate(half, half)
}

/// Straight segment from `start` to `end`.
#[derive(Debug)]
pub struct Line {
    start: Point,
    end: Point,
    style: PathStyle,
    path: BezPath,
    measure: OnceLock<PathMeasure>,
}

static LINE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Line",
    fields: &[
        FieldDesc::interp("start", FieldKind::Hooked),
        FieldDesc::interp("end", FieldKind::Hooked),
        FieldDesc::interp("style", FieldKind::Hooked),
    ],
};

impl Line {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>, style: PathStyle) -> Self {
        let (start, end) = (start.into(), end.into());
        let mut path = BezPath::new();
        path.move_to(start);
        path.line_to(end);
        Self {
            start,
            end,
            style,
            path,
            measure: OnceLock::new(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

impl Curve for Line {
    fn path(&self) -> &BezPath {
        &self.path
    }

    fn measure(&self) -> &PathMeasure {
        self.measure.get_or_init(|| PathMeasure::new(&self.path))
    }

    fn style(&self) -> &PathStyle {
        &self.style
    }

    fn is_straight(&self) -> bool {
        true
    }
}

impl Node for Line {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &LINE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::point(self.start),
            Value::point(self.end),
            Value::style(&self.style),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&LINE_DESC, fields)?;
        let node = Self::new(r.point()?, r.point()?, r.style()?);
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        stroke_bounds(&self.path, &self.style)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        surface.stroke_path(&self.path, &self.style);
        Ok(())
    }

    fn as_curve(&self) -> Option<&dyn Curve> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Chain of cubic segments through a point list.
///
/// The path moves to `points[0]`, then emits `curve_to(points[i], points[i + 1], points[i + 2])`
/// for `i = 0, 2, 4, ...`; trailing points that do not complete a segment are ignored.
#[derive(Debug)]
pub struct CurvedLine {
    points: Vec<Point>,
    style: PathStyle,
    path: BezPath,
    measure: OnceLock<PathMeasure>,
}

static CURVED_LINE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "CurvedLine",
    fields: &[
        FieldDesc::interp("points", FieldKind::Sequence),
        FieldDesc::interp("style", FieldKind::Hooked),
    ],
};

impl CurvedLine {
    pub fn new(points: Vec<Point>, style: PathStyle) -> FloeResult<Self> {
        if points.len() < 3 {
            return Err(FloeError::validation(format!(
                "CurvedLine needs at least 3 points, got {}",
                points.len()
            )));
        }

        let mut path = BezPath::new();
        path.move_to(points[0]);
        for i in (0..points.len() - 2).step_by(2) {
            path.curve_to(points[i], points[i + 1], points[i + 2]);
        }

        Ok(Self {
            points,
            style,
            path,
            measure: OnceLock::new(),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Curve for CurvedLine {
    fn path(&self) -> &BezPath {
        &self.path
    }

    fn measure(&self) -> &PathMeasure {
        self.measure.get_or_init(|| PathMeasure::new(&self.path))
    }

    fn style(&self) -> &PathStyle {
        &self.style
    }
}

impl Node for CurvedLine {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &CURVED_LINE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::List(self.points.iter().copied().map(Value::point).collect()),
            Value::style(&self.style),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&CURVED_LINE_DESC, fields)?;
        let node = Self::new(r.points()?, r.style()?)?;
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        stroke_bounds(&self.path, &self.style)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        surface.stroke_path(&self.path, &self.style);
        Ok(())
    }

    fn as_curve(&self) -> Option<&dyn Curve> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Arbitrary stroked path. The geometry is opaque to interpolation; only the style blends.
#[derive(Debug)]
pub struct PathShape {
    path: BezPath,
    style: PathStyle,
    measure: OnceLock<PathMeasure>,
}

static PATH_SHAPE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "PathShape",
    fields: &[
        FieldDesc::fixed("path", FieldKind::Opaque),
        FieldDesc::interp("style", FieldKind::Hooked),
    ],
};

impl PathShape {
    pub fn new(path: BezPath, style: PathStyle) -> Self {
        Self {
            path,
            style,
            measure: OnceLock::new(),
        }
    }
}

impl Curve for PathShape {
    fn path(&self) -> &BezPath {
        &self.path
    }

    fn measure(&self) -> &PathMeasure {
        self.measure.get_or_init(|| PathMeasure::new(&self.path))
    }

    fn style(&self) -> &PathStyle {
        &self.style
    }
}

impl Node for PathShape {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &PATH_SHAPE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![Value::opaque(self.path.clone()), Value::style(&self.style)]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&PATH_SHAPE_DESC, fields)?;
        let node = Self::new(r.opaque()?, r.style()?);
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        stroke_bounds(&self.path, &self.style)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        surface.stroke_path(&self.path, &self.style);
        Ok(())
    }

    fn as_curve(&self) -> Option<&dyn Curve> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/curves.rs"]
mod tests;
