use std::any::Any;

use crate::foundation::core::{Affine, Rect, Transform2D, Vec2};
use crate::foundation::error::FloeResult;
use crate::path::sample::PathSample;
use crate::scene::node::{Node, NodeRef, Surface};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

/// Children drawn in order, later ones on top.
#[derive(Clone, Debug)]
pub struct Compose {
    children: Vec<NodeRef>,
}

static COMPOSE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Compose",
    fields: &[FieldDesc::interp("children", FieldKind::Sequence)],
};

impl Compose {
    pub fn new(children: impl IntoIterator<Item = NodeRef>) -> Self {
        Self {
            children: children.into_iter().collect(),
        }
    }

    pub fn items(&self) -> &[NodeRef] {
        &self.children
    }
}

impl Node for Compose {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &COMPOSE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![Value::nodes(&self.children)]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&COMPOSE_DESC, fields)?;
        let node = Self::new(r.nodes()?);
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        self.children
            .iter()
            .map(|c| c.bounds())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    fn children(&self) -> Vec<NodeRef> {
        self.children.clone()
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        for child in &self.children {
            child.draw(surface)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Affine placement of a child: `T(translate) * T(anchor) * R(rotation) * S(scale) * T(-anchor)`.
#[derive(Clone, Debug)]
pub struct Transform {
    child: NodeRef,
    xf: Transform2D,
}

static TRANSFORM_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Transform",
    fields: &[
        FieldDesc::interp("child", FieldKind::Node),
        FieldDesc::interp("translate", FieldKind::Vector),
        FieldDesc::interp("rotation", FieldKind::Scalar),
        FieldDesc::interp("scale", FieldKind::Vector),
        FieldDesc::interp("anchor", FieldKind::Vector),
    ],
};

impl Transform {
    pub fn new(child: impl Into<NodeRef>) -> Self {
        Self {
            child: child.into(),
            xf: Transform2D::default(),
        }
    }

    pub fn translate(mut self, offset: Vec2) -> Self {
        self.xf.translate = offset;
        self
    }

    /// Rotation in radians about the anchor.
    pub fn rotate(mut self, radians: f64) -> Self {
        self.xf.rotation_rad = radians;
        self
    }

    pub fn scale(mut self, scale: Vec2) -> Self {
        self.xf.scale = scale;
        self
    }

    pub fn anchor(mut self, anchor: Vec2) -> Self {
        self.xf.anchor = anchor;
        self
    }

    /// Center `node` on the sample nearest fraction `t` of `sample`, rotated to the tangent.
    pub fn along_path(sample: &PathSample, t: f64, node: impl Into<NodeRef>) -> Self {
        let node = node.into();
        let (point, tangent) = sample.point_and_tangent_at(t);
        let center = node.bounds().center().to_vec2();
        Self::new(node)
            .anchor(center)
            .rotate(tangent.y.atan2(tangent.x))
            .translate(point.to_vec2() - center)
    }

    pub fn child(&self) -> &NodeRef {
        &self.child
    }

    pub fn transform(&self) -> Transform2D {
        self.xf
    }
}

impl Node for Transform {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &TRANSFORM_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::Node(self.child.clone()),
            Value::vec2(self.xf.translate),
            Value::Scalar(self.xf.rotation_rad),
            Value::vec2(self.xf.scale),
            Value::vec2(self.xf.anchor),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&TRANSFORM_DESC, fields)?;
        let child = r.node()?;
        let xf = Transform2D {
            translate: r.vec2()?,
            rotation_rad: r.scalar()?,
            scale: r.vec2()?,
            anchor: r.vec2()?,
        };
        r.finish()?;
        Ok(Self { child, xf }.into())
    }

    fn bounds(&self) -> Rect {
        self.xf.to_affine().transform_rect_bbox(self.child.bounds())
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        surface.push_transform(self.xf.to_affine());
        let drawn = self.child.draw(surface);
        surface.pop_transform();
        drawn
    }

    fn child_transform(&self) -> Affine {
        self.xf.to_affine()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitives/compose.rs"]
mod tests;
