use std::any::Any;
use std::sync::OnceLock;

use kurbo::Shape;

use crate::foundation::core::{BezPath, PathStyle, Rect};
use crate::foundation::error::{FloeError, FloeResult};
use crate::path::measure::{Curve, PathMeasure};
use crate::path::sample::{PathSample, ReconstructMode, extract_subrange};
use crate::scene::node::{Node, NodeRef, Surface};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

/// Default sampling step, as a fraction of the curve.
pub const DEFAULT_STEP: f64 = 0.01;

/// Draws the `[start, end]` portion of a curve node.
///
/// Animating `end` from 0 to 1 grows the curve. The sampled points and tangents stay available
/// through [`PartialPath::sample`] for anything that has to sit on the visible part.
#[derive(Debug)]
pub struct PartialPath {
    child: NodeRef,
    start: f64,
    end: f64,
    step: f64,
    mode: Option<ReconstructMode>,
    sample: PathSample,
    style: PathStyle,
    measure: OnceLock<PathMeasure>,
}

static PARTIAL_PATH_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "PartialPath",
    fields: &[
        FieldDesc::interp("child", FieldKind::Node),
        FieldDesc::interp("start", FieldKind::Scalar),
        FieldDesc::interp("end", FieldKind::Scalar),
        FieldDesc::fixed("step", FieldKind::Scalar),
        FieldDesc::fixed("mode", FieldKind::Opaque),
    ],
};

impl PartialPath {
    pub fn new(child: impl Into<NodeRef>, start: f64, end: f64) -> FloeResult<Self> {
        Self::with_options(child, start, end, DEFAULT_STEP, None)
    }

    /// `mode: None` picks polyline for straight curves and smooth otherwise.
    pub fn with_options(
        child: impl Into<NodeRef>,
        start: f64,
        end: f64,
        step: f64,
        mode: Option<ReconstructMode>,
    ) -> FloeResult<Self> {
        let child = child.into();
        let curve = child.as_curve().ok_or_else(|| {
            FloeError::validation(format!(
                "PartialPath needs a curve child, got {}",
                child.type_name()
            ))
        })?;
        let resolved = mode.unwrap_or(if curve.is_straight() {
            ReconstructMode::Polyline
        } else {
            ReconstructMode::Smooth
        });
        let sample = extract_subrange(curve, start, end, step, resolved)?;
        let style = curve.style().clone();

        Ok(Self {
            child,
            start,
            end,
            step,
            mode,
            sample,
            style,
            measure: OnceLock::new(),
        })
    }

    pub fn child(&self) -> &NodeRef {
        &self.child
    }

    pub fn sample(&self) -> &PathSample {
        &self.sample
    }
}

impl Curve for PartialPath {
    fn path(&self) -> &BezPath {
        self.sample.path()
    }

    fn measure(&self) -> &PathMeasure {
        self.measure.get_or_init(|| PathMeasure::new(self.sample.path()))
    }

    fn style(&self) -> &PathStyle {
        &self.style
    }

    fn is_straight(&self) -> bool {
        self.child.as_curve().is_some_and(|c| c.is_straight())
    }
}

impl Node for PartialPath {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &PARTIAL_PATH_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::Node(self.child.clone()),
            Value::Scalar(self.start),
            Value::Scalar(self.end),
            Value::Scalar(self.step),
            Value::opaque(self.mode),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&PARTIAL_PATH_DESC, fields)?;
        // Overshooting eases push blended fractions past the curve; pin them to its ends.
        let node = Self::with_options(
            r.node()?,
            r.scalar()?.clamp(0.0, 1.0),
            r.scalar()?.clamp(0.0, 1.0),
            r.scalar()?,
            r.opaque()?,
        )?;
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        let half = self.style.thickness / 2.0;
        self.sample.path().bounding_box().inflate(half, half)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        surface.stroke_path(self.sample.path(), &self.style);
        Ok(())
    }

    // The wrapped curve is geometry input, not a drawn child.
    fn children(&self) -> Vec<NodeRef> {
        Vec::new()
    }

    fn as_curve(&self) -> Option<&dyn Curve> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/partial.rs"]
mod tests;
