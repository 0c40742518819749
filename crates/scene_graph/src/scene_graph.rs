//! # Scene Graph System
//!
//! A minimal hierarchical scene graph: rectangular nodes with position,
//! size, a per-node rotation and a single level of parent scale, stored in
//! an arena and addressed by id.
//!
//! ## Key Concepts
//!
//! - **Arena storage**: nodes live in a [`SlotMap`]; parent and child links
//!   are [`NodeId`] indices, never owning references, so the hierarchy is a
//!   plain tree over an external node table.
//! - **Hit-testing**: [`SceneGraph::contains`] and
//!   [`SceneGraph::local_point`] share one inverse-transform pipeline that
//!   maps a canvas-space point into a node's local space (origin at the
//!   node's top-left corner, axes aligned to its unrotated rectangle).
//! - **One scale level**: only the immediate parent's scale is undone while
//!   hit-testing. Grandparent scale and rotation are not composed. This is
//!   a documented limitation of the transform model, preserved rather than
//!   silently generalized; callers with a stage-level scale model it as the
//!   one supported parent level.
//!
//! Event routing is layered on top by the `events` crate, which walks
//! [`SceneGraph::parent`] links to bubble events from a target toward the
//! root.

mod node;

pub use node::Node;

use easel_core::{transform, Bounds};
use glam::Vec2;
use log::trace;
use slotmap::SlotMap;
use std::fmt::{self, Display};

slotmap::new_key_type! {
    /// Unique identifier for a node within a [`SceneGraph`].
    pub struct NodeId;
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// SceneGraph owns every node and manages the tree structure between them.
///
/// Structure is append-only: nodes are inserted detached, linked with
/// [`add_child`](Self::add_child), and never removed or re-parented. Node
/// lifetime is the lifetime of the graph.
#[derive(Default)]
pub struct SceneGraph {
    /// Storage for all nodes, indexed by their IDs
    nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {
    /// Creates an empty scene graph.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Inserts a detached node into the graph and returns its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Links `child` under `parent`, appending it to the parent's child
    /// list.
    ///
    /// This is the only operation that mutates hierarchy links. Returns
    /// false without linking if either id is stale, the child already has a
    /// parent, or the link would make a node its own ancestor.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> bool {
        if !self.nodes.contains_key(parent_id) || !self.nodes.contains_key(child_id) {
            return false;
        }

        // Children are append-only: a node attaches to exactly one parent,
        // once.
        if self.nodes[child_id].parent.is_some() {
            return false;
        }

        // Check if this would create a cycle
        if self.is_ancestor(child_id, parent_id) {
            return false;
        }

        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);
        true
    }

    /// Gets a reference to a node by its id.
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Gets a mutable reference to a node by its id.
    ///
    /// Geometry and transform fields are public; this is how external code
    /// mutates rotation, scale or position between hit-tests.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    /// Returns the parent of a node, or None for a root (or stale id).
    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id).and_then(|node| node.parent)
    }

    /// Returns the children of a node, in insertion order.
    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maps a canvas-space point into a node's local space.
    ///
    /// The pipeline, shared with [`contains`](Self::contains):
    ///
    /// 1. If the node has a parent with a non-identity scale, divide the
    ///    point componentwise by that scale: exactly one ancestor level.
    /// 2. Take the offset from the node's center.
    /// 3. Rotate the offset by the negated node rotation.
    /// 4. Re-offset by the half-size so the origin lands on the node's
    ///    top-left corner.
    ///
    /// Returns the local point unconditionally (inside the node or not);
    /// None only for a stale id. Mutates nothing.
    pub fn local_point(&self, node_id: NodeId, point: Vec2) -> Option<Vec2> {
        self.nodes.get(node_id).map(|node| self.to_local(node, point))
    }

    /// Tests whether a canvas-space point falls within a node's rectangle,
    /// accounting for the immediate parent's scale and the node's own
    /// rotation. Both boundaries are inclusive.
    pub fn contains(&self, node_id: NodeId, point: Vec2) -> bool {
        self.nodes.get(node_id).is_some_and(|node| {
            let local = self.to_local(node, point);
            Bounds::from_origin_size(Vec2::ZERO, node.size).contains_point(local)
        })
    }

    /// Returns the first child of `parent_id` (in insertion order) that
    /// contains the given canvas-space point.
    ///
    /// Insertion order is the only priority: there is no z-order beyond it.
    pub fn pick(&self, parent_id: NodeId, point: Vec2) -> Option<NodeId> {
        let hit = self
            .children(parent_id)
            .iter()
            .copied()
            .find(|&child| self.contains(child, point));
        trace!("pick {point} under {parent_id}: {hit:?}");
        hit
    }

    fn to_local(&self, node: &Node, point: Vec2) -> Vec2 {
        // Undo exactly one level of ancestor scaling. Grandparent
        // scale/rotation is never composed.
        let point = match node.parent.and_then(|id| self.nodes.get(id)) {
            Some(parent) if parent.scale != Vec2::ONE => {
                transform::inverse_scale(point, parent.scale)
            }
            _ => point,
        };

        let offset = point - node.center();
        transform::rotate(offset, -node.rotation) + node.size * 0.5
    }

    /// Determines if a node is an ancestor of another node in the hierarchy.
    ///
    /// Traverses the parent chain of the descendant upward, iteratively, so
    /// arbitrary depth hierarchies cost no stack.
    fn is_ancestor(&self, node_id: NodeId, descendant_id: NodeId) -> bool {
        let mut current = Some(descendant_id);
        while let Some(id) = current {
            if id == node_id {
                return true;
            }
            current = self.nodes.get(id).and_then(|node| node.parent);
        }
        false
    }
}
