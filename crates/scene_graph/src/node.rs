//! # Node Data Model
//!
//! A [`Node`] is the single entity type of the scene graph: a top-left
//! anchored rectangle with a per-node transform and hierarchy links into the
//! owning [`SceneGraph`](crate::SceneGraph) arena.
//!
//! Transform semantics are deliberately narrow:
//!
//! - `scale` affects only *children* of this node during hit-testing; a
//!   node's own geometry is never scaled by its own `scale`.
//! - `rotation` is degrees, clockwise, about the node's center. It is stored
//!   as-is and never normalized modulo 360; callers that want wrapped
//!   angles (e.g. an increment-by-15 control) normalize before writing.

use crate::NodeId;
use glam::Vec2;
use smallvec::SmallVec;

/// A rectangular scene-graph node.
///
/// `position` and `size` are expressed in the coordinate space of the node's
/// parent (canvas space for parentless nodes). Geometry and transform fields
/// are plain public data, mutated directly by external code between
/// hit-tests and dispatches; hierarchy links are managed exclusively by
/// [`SceneGraph::add_child`](crate::SceneGraph::add_child).
#[derive(Debug, Clone)]
pub struct Node {
    /// Top-left corner, in the parent's coordinate space
    pub position: Vec2,
    /// Width and height of the node's rectangle
    pub size: Vec2,
    /// Componentwise scale applied to this node's children in their
    /// hit-tests. Never applied to this node's own geometry.
    pub scale: Vec2,
    /// Rotation in degrees, clockwise, about the node's center. Unbounded.
    pub rotation: f32,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl Node {
    /// Creates a detached node with identity scale and no rotation.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            scale: Vec2::ONE,
            rotation: 0.0,
            parent: None,
            children: SmallVec::new(),
        }
    }

    /// Sets the scale this node applies to its children's hit-tests.
    pub fn with_scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.scale = Vec2::new(scale_x, scale_y);
        self
    }

    /// Sets the node's rotation in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// The node's pivot: its geometric center, in the parent's space.
    ///
    /// Unaffected by the node's own rotation or scale.
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// The node's parent, if it has been attached to one.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's children, in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_defaults() {
        let node = Node::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(node.position, Vec2::new(10.0, 20.0));
        assert_eq!(node.size, Vec2::new(100.0, 50.0));
        assert_eq!(node.scale, Vec2::ONE);
        assert_eq!(node.rotation, 0.0);
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_node_center() {
        let node = Node::new(100.0, 100.0, 100.0, 100.0);
        assert_eq!(node.center(), Vec2::new(150.0, 150.0));

        // Rotation does not move the pivot.
        let rotated = Node::new(100.0, 100.0, 100.0, 100.0).with_rotation(45.0);
        assert_eq!(rotated.center(), Vec2::new(150.0, 150.0));
    }
}
