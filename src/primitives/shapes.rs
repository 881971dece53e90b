use std::any::Any;
use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::Shape;

use crate::foundation::core::{BezPath, Color, PathStyle, Rect, Vec2};
use crate::foundation::error::FloeResult;
use crate::scene::node::{Node, NodeRef, Surface};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

/// Flattening tolerance for arcs and ellipses.
const SHAPE_TOLERANCE: f64 = 0.1;

/// Where a border stroke sits relative to the shape outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderPosition {
    /// Stroke straddles the outline; bounds grow by half the thickness.
    #[default]
    Center,
    /// Stroke sits inside the outline; bounds are the outline.
    Inside,
    /// Stroke sits outside the outline; bounds grow by the full thickness.
    Outside,
}

impl BorderPosition {
    /// Offset from the outline to the stroke centerline (positive grows).
    fn stroke_offset(self, thickness: f64) -> f64 {
        match self {
            Self::Center => 0.0,
            Self::Inside => -thickness / 2.0,
            Self::Outside => thickness / 2.0,
        }
    }

    fn bounds_growth(self, thickness: f64) -> f64 {
        match self {
            Self::Center => thickness / 2.0,
            Self::Inside => 0.0,
            Self::Outside => thickness,
        }
    }
}

/// Empty region with an optional background fill. Useful as a spacer or canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Blank {
    pub rect: Rect,
    pub background: Option<Color>,
}

static BLANK_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Blank",
    fields: &[
        FieldDesc::interp("rect", FieldKind::Hooked),
        FieldDesc::interp("background", FieldKind::Hooked),
    ],
};

impl Blank {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            background: None,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl Node for Blank {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &BLANK_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![Value::rect(self.rect), Value::color(self.background)]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&BLANK_DESC, fields)?;
        let node = Self {
            rect: r.rect()?,
            background: r.color_opt()?,
        };
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        if let Some(color) = self.background {
            surface.fill_path(&self.rect.abs().to_path(SHAPE_TOLERANCE), color);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Axis-aligned rectangle with optional fill, border and (elliptical) corner radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub rect: Rect,
    pub border_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub border_thickness: f64,
    pub border_radius: Vec2,
    pub border_position: BorderPosition,
}

static RECTANGLE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Rectangle",
    fields: &[
        FieldDesc::interp("rect", FieldKind::Hooked),
        FieldDesc::interp("border_color", FieldKind::Hooked),
        FieldDesc::interp("fill_color", FieldKind::Hooked),
        FieldDesc::interp("border_thickness", FieldKind::Scalar),
        FieldDesc::interp("border_radius", FieldKind::Vector),
        FieldDesc::fixed("border_position", FieldKind::Opaque),
    ],
};

impl Rectangle {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            border_color: None,
            fill_color: None,
            border_thickness: 1.0,
            border_radius: Vec2::ZERO,
            border_position: BorderPosition::Center,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn border(mut self, color: Color, thickness: f64) -> Self {
        self.border_color = Some(color);
        self.border_thickness = thickness;
        self
    }

    pub fn radius(mut self, radius: Vec2) -> Self {
        self.border_radius = radius;
        self
    }

    pub fn border_position(mut self, position: BorderPosition) -> Self {
        self.border_position = position;
        self
    }
}

impl Node for Rectangle {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &RECTANGLE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::rect(self.rect),
            Value::color(self.border_color),
            Value::color(self.fill_color),
            Value::Scalar(self.border_thickness),
            Value::vec2(self.border_radius),
            Value::opaque(self.border_position),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&RECTANGLE_DESC, fields)?;
        let node = Self {
            rect: r.rect()?,
            border_color: r.color_opt()?,
            fill_color: r.color_opt()?,
            border_thickness: r.scalar()?,
            border_radius: r.vec2()?,
            border_position: r.opaque()?,
        };
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        let grow = self.border_position.bounds_growth(self.border_thickness);
        self.rect.abs().inflate(grow, grow)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        let rect = self.rect.abs();
        if let Some(fill) = self.fill_color {
            surface.fill_path(&rounded_rect(rect, self.border_radius), fill);
        }
        if let Some(border) = self.border_color {
            let off = self.border_position.stroke_offset(self.border_thickness);
            // Square corners stay square when the stroke is offset.
            let radius = if self.border_radius == Vec2::ZERO {
                Vec2::ZERO
            } else {
                Vec2::new(
                    (self.border_radius.x + off).max(0.0),
                    (self.border_radius.y + off).max(0.0),
                )
            };
            surface.stroke_path(
                &rounded_rect(rect.inflate(off, off), radius),
                &PathStyle::new(border, self.border_thickness),
            );
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Ellipse inscribed in `rect`, with the same fill/border options as [`Rectangle`].
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub rect: Rect,
    pub border_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub border_thickness: f64,
    pub border_position: BorderPosition,
}

static ELLIPSE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Ellipse",
    fields: &[
        FieldDesc::interp("rect", FieldKind::Hooked),
        FieldDesc::interp("border_color", FieldKind::Hooked),
        FieldDesc::interp("fill_color", FieldKind::Hooked),
        FieldDesc::interp("border_thickness", FieldKind::Scalar),
        FieldDesc::fixed("border_position", FieldKind::Opaque),
    ],
};

impl Ellipse {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            border_color: None,
            fill_color: None,
            border_thickness: 1.0,
            border_position: BorderPosition::Center,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn border(mut self, color: Color, thickness: f64) -> Self {
        self.border_color = Some(color);
        self.border_thickness = thickness;
        self
    }

    pub fn border_position(mut self, position: BorderPosition) -> Self {
        self.border_position = position;
        self
    }
}

impl Node for Ellipse {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &ELLIPSE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::rect(self.rect),
            Value::color(self.border_color),
            Value::color(self.fill_color),
            Value::Scalar(self.border_thickness),
            Value::opaque(self.border_position),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&ELLIPSE_DESC, fields)?;
        let node = Self {
            rect: r.rect()?,
            border_color: r.color_opt()?,
            fill_color: r.color_opt()?,
            border_thickness: r.scalar()?,
            border_position: r.opaque()?,
        };
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        let grow = self.border_position.bounds_growth(self.border_thickness);
        self.rect.abs().inflate(grow, grow)
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        let rect = self.rect.abs();
        if let Some(fill) = self.fill_color {
            surface.fill_path(
                &kurbo::Ellipse::from_rect(rect).to_path(SHAPE_TOLERANCE),
                fill,
            );
        }
        if let Some(border) = self.border_color {
            let off = self.border_position.stroke_offset(self.border_thickness);
            surface.stroke_path(
                &kurbo::Ellipse::from_rect(rect.inflate(off, off)).to_path(SHAPE_TOLERANCE),
                &PathStyle::new(border, self.border_thickness),
            );
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Rectangle outline with elliptical corners; radii are clamped to half the side lengths.
pub(crate) fn rounded_rect(rect: Rect, radius: Vec2) -> BezPath {
    let rx = radius.x.clamp(0.0, rect.width() / 2.0);
    let ry = radius.y.clamp(0.0, rect.height() / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return rect.to_path(SHAPE_TOLERANCE);
    }

    let corner = |cx: f64, cy: f64, start: f64| kurbo::Arc {
        center: (cx, cy).into(),
        radii: Vec2::new(rx, ry),
        start_angle: start,
        sweep_angle: FRAC_PI_2,
        x_rotation: 0.0,
    };

    let mut path = BezPath::new();
    path.move_to((rect.x0 + rx, rect.y0));
    path.line_to((rect.x1 - rx, rect.y0));
    path.extend(corner(rect.x1 - rx, rect.y0 + ry, -FRAC_PI_2).append_iter(SHAPE_TOLERANCE));
    path.line_to((rect.x1, rect.y1 - ry));
    path.extend(corner(rect.x1 - rx, rect.y1 - ry, 0.0).append_iter(SHAPE_TOLERANCE));
    path.line_to((rect.x0 + rx, rect.y1));
    path.extend(corner(rect.x0 + rx, rect.y1 - ry, FRAC_PI_2).append_iter(SHAPE_TOLERANCE));
    path.line_to((rect.x0, rect.y0 + ry));
    path.extend(corner(rect.x0 + rx, rect.y0 + ry, PI).append_iter(SHAPE_TOLERANCE));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/shapes.rs"]
mod tests;
