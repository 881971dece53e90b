use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Color, PathStyle, Rect};
use crate::foundation::error::FloeResult;
use crate::path::measure::Curve;
use crate::scene::value::{NodeDescriptor, Value};

/// Drawing target supplied by the rasterization backend.
pub trait Surface {
    fn fill_path(&mut self, path: &BezPath, color: Color);
    fn stroke_path(&mut self, path: &BezPath, style: &PathStyle);
    fn push_transform(&mut self, affine: Affine);
    fn pop_transform(&mut self);
}

/// Contract every drawable node satisfies.
///
/// A node is an immutable record fully determined by its declared fields: `rebuild` applied to
/// `fields()` must produce an equal node. The structural interpolator relies on this to blend
/// any two nodes of the same type without knowing the concrete type.
pub trait Node: fmt::Debug + Send + Sync + 'static {
    fn descriptor(&self) -> &'static NodeDescriptor;

    /// Field values in descriptor order.
    fn fields(&self) -> Vec<Value>;

    /// Build a node of the same type from field values in descriptor order.
    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef>;

    fn bounds(&self) -> Rect;

    fn children(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        for value in self.fields() {
            value.collect_nodes(&mut out);
        }
        out
    }

    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()>;

    /// Transform applied to children when mapping their bounds into this node's space.
    fn child_transform(&self) -> Affine {
        Affine::IDENTITY
    }

    fn as_curve(&self) -> Option<&dyn Curve> {
        None
    }

    fn as_timed(&self) -> Option<&dyn TimedNode> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Nodes whose appearance depends on elapsed time.
pub trait TimedNode {
    /// Time-free snapshot of this node at `t` seconds.
    fn render_at(&self, t: f64) -> FloeResult<NodeRef>;

    /// Seconds until this node stops changing, if it plays at all.
    fn animation_duration(&self) -> Option<f64>;
}

/// Shared handle to an immutable node.
#[derive(Clone)]
pub struct NodeRef(Arc<dyn Node>);

impl NodeRef {
    pub fn new<N: Node>(node: N) -> Self {
        Self(Arc::new(node))
    }

    pub fn type_name(&self) -> &'static str {
        self.0.descriptor().type_name
    }

    pub fn downcast_ref<N: Node>(&self) -> Option<&N> {
        self.0.as_any().downcast_ref::<N>()
    }

    /// Same allocation, not just equal content.
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Resolve every time-dependent node in this tree at `t`, returning a time-free tree.
    ///
    /// Static subtrees that contain nothing time-dependent come back as the same `NodeRef`.
    pub fn render_at(&self, t: f64) -> FloeResult<NodeRef> {
        if let Some(timed) = self.0.as_timed() {
            return timed.render_at(t);
        }

        let fields = self.0.fields();
        let mut changed = false;
        let rendered = fields
            .into_iter()
            .map(|v| render_value_at(v, t, &mut changed))
            .collect::<FloeResult<Vec<_>>>()?;
        if !changed {
            return Ok(self.clone());
        }
        self.0.rebuild(rendered)
    }

    /// Longest total duration among the animated nodes in this tree.
    ///
    /// Frozen subtrees do not play and are not searched.
    pub fn animation_duration(&self) -> Option<f64> {
        if let Some(timed) = self.0.as_timed() {
            return timed.animation_duration();
        }
        self.0
            .children()
            .iter()
            .filter_map(NodeRef::animation_duration)
            .reduce(f64::max)
    }
}

fn render_value_at(value: Value, t: f64, changed: &mut bool) -> FloeResult<Value> {
    Ok(match value {
        Value::Node(n) => {
            let r = n.render_at(t)?;
            *changed |= !r.ptr_eq(&n);
            Value::Node(r)
        }
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|v| render_value_at(v, t, changed))
                .collect::<FloeResult<_>>()?,
        ),
        Value::Tuple(items) => Value::Tuple(
            items
                .into_iter()
                .map(|v| render_value_at(v, t, changed))
                .collect::<FloeResult<_>>()?,
        ),
        other => other,
    })
}

impl std::ops::Deref for NodeRef {
    type Target = dyn Node;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Structural equality: same node type and equal field values.
impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.type_name() == other.type_name() && self.0.fields() == other.0.fields())
    }
}

impl<N: Node> From<N> for NodeRef {
    fn from(node: N) -> Self {
        Self::new(node)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
