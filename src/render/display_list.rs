use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Color, PathStyle, Rect};
use crate::foundation::error::FloeResult;
use crate::scene::node::{Node, Surface};

/// One recorded drawing command, in scene coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Fill { path: BezPath, color: Color },
    Stroke { path: BezPath, style: PathStyle },
}

impl DrawOp {
    pub fn path(&self) -> &BezPath {
        match self {
            Self::Fill { path, .. } | Self::Stroke { path, .. } => path,
        }
    }

    /// Geometry bounds, including half the stroke width for strokes.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Fill { path, .. } => path.bounding_box(),
            Self::Stroke { path, style } => {
                let half = style.thickness / 2.0;
                path.bounding_box().inflate(half, half)
            }
        }
    }
}

/// Recording [`Surface`]: the backend-neutral output of drawing one frame.
///
/// Transforms pushed while drawing are applied to each path as it is recorded, so the ops
/// need no transform stack of their own. Stroke widths scale with the transform's area
/// factor.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    /// Crop rectangle the frame should be shown through, if any.
    viewport: Option<Rect>,
    #[serde(skip)]
    current: Affine,
    #[serde(skip)]
    stack: Vec<Affine>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `node` into a fresh list.
    pub fn record(node: &dyn Node) -> FloeResult<Self> {
        let mut list = Self::new();
        node.draw(&mut list)?;
        Ok(list)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport = viewport;
    }

    /// Union of all op bounds, or `None` for an empty list.
    pub fn bounds(&self) -> Option<Rect> {
        self.ops.iter().map(DrawOp::bounds).reduce(|a, b| a.union(b))
    }

    /// Transform nesting depth; zero once a node has finished drawing.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn to_json(&self) -> FloeResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Surface for DisplayList {
    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.ops.push(DrawOp::Fill {
            path: self.current * path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, style: &PathStyle) {
        let scale = self.current.determinant().abs().sqrt();
        self.ops.push(DrawOp::Stroke {
            path: self.current * path.clone(),
            style: PathStyle {
                thickness: style.thickness * scale,
                ..style.clone()
            },
        });
    }

    fn push_transform(&mut self, affine: Affine) {
        self.stack.push(self.current);
        self.current *= affine;
    }

    fn pop_transform(&mut self) {
        self.current = self.stack.pop().unwrap_or(Affine::IDENTITY);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/display_list.rs"]
mod tests;
