use crate::foundation::core::{Affine, Rect};
use crate::foundation::error::{FloeError, FloeResult};
use crate::scene::node::NodeRef;

/// Explicit stack of ancestor roots used to resolve a node's bounds relative to an ancestor
/// that is still under construction.
///
/// Owned by whoever builds the scene and passed by reference; there is no ambient global.
#[derive(Clone, Debug, Default)]
pub struct SceneContext {
    roots: Vec<NodeRef>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, root: NodeRef) {
        self.roots.push(root);
    }

    pub fn pop(&mut self) -> Option<NodeRef> {
        self.roots.pop()
    }

    pub fn depth(&self) -> usize {
        self.roots.len()
    }

    /// Run `f` with `root` pushed, popping it afterwards.
    pub fn with_root<R>(&mut self, root: NodeRef, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push(root);
        let out = f(self);
        self.pop();
        out
    }

    /// Bounds of `target` in the space of the innermost root that contains it.
    pub fn relative_bounds(&self, target: &NodeRef) -> FloeResult<Rect> {
        self.roots
            .iter()
            .rev()
            .find_map(|root| find_transform(root, target, Affine::IDENTITY))
            .map(|affine| affine.transform_rect_bbox(target.bounds()))
            .ok_or_else(|| {
                FloeError::child_not_found(format!(
                    "{} is not inside any of the {} context roots",
                    target.type_name(),
                    self.roots.len()
                ))
            })
    }
}

/// Bounds of `target` mapped into `root`'s space.
pub fn relative_bounds(root: &NodeRef, target: &NodeRef) -> FloeResult<Rect> {
    find_transform(root, target, Affine::IDENTITY)
        .map(|affine| affine.transform_rect_bbox(target.bounds()))
        .ok_or_else(|| {
            FloeError::child_not_found(format!(
                "{} is not a descendant of {}",
                target.type_name(),
                root.type_name()
            ))
        })
}

// Identity search: equal-but-distinct nodes are different children.
fn find_transform(node: &NodeRef, target: &NodeRef, acc: Affine) -> Option<Affine> {
    if node.ptr_eq(target) {
        return Some(acc);
    }
    let acc = acc * node.child_transform();
    node.children()
        .iter()
        .find_map(|child| find_transform(child, target, acc))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/context.rs"]
mod tests;
