use std::any::Any;

use crate::foundation::core::Rect;
use crate::foundation::error::{FloeError, FloeResult};
use crate::scene::node::{Node, NodeRef, Surface, TimedNode};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

/// Pins an animated subtree to a single moment.
///
/// By default the moment is the end of the longest animation inside the child, so the
/// subtree shows its final state. A frozen subtree reports no animation duration of its own.
#[derive(Clone, Debug)]
pub struct Frozen {
    child: NodeRef,
    t: f64,
}

static FROZEN_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "Frozen",
    fields: &[
        FieldDesc::interp("child", FieldKind::Node),
        FieldDesc::fixed("t", FieldKind::Scalar),
    ],
};

impl Frozen {
    /// Freeze at the end of the child's animations (0 when it has none).
    pub fn new(child: impl Into<NodeRef>) -> Self {
        let child = child.into();
        let t = child.animation_duration().unwrap_or(0.0);
        Self { child, t }
    }

    /// Freeze at an explicit time.
    pub fn at(child: impl Into<NodeRef>, t: f64) -> FloeResult<Self> {
        if !t.is_finite() {
            return Err(FloeError::domain_range(format!(
                "freeze time must be finite, got {t}"
            )));
        }
        Ok(Self {
            child: child.into(),
            t,
        })
    }

    pub fn child(&self) -> &NodeRef {
        &self.child
    }

    pub fn time(&self) -> f64 {
        self.t
    }
}

impl TimedNode for Frozen {
    fn render_at(&self, _t: f64) -> FloeResult<NodeRef> {
        self.child.render_at(self.t)
    }

    fn animation_duration(&self) -> Option<f64> {
        None
    }
}

impl Node for Frozen {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &FROZEN_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![Value::Node(self.child.clone()), Value::Scalar(self.t)]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&FROZEN_DESC, fields)?;
        let node = Self::at(r.node()?, r.scalar()?)?;
        r.finish()?;
        Ok(node.into())
    }

    fn bounds(&self) -> Rect {
        self.child.bounds()
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        self.child.render_at(self.t)?.draw(surface)
    }

    fn as_timed(&self) -> Option<&dyn TimedNode> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/frozen.rs"]
mod tests;
