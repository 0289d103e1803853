use super::{Body, Node};
use crate::bounding_volume::{Aabb, BoundingVolume, WorldObb};
use crate::math::{Matrix4, Rotation, Vector, DEFAULT_EPSILON};
use crate::query::DegenerateConfiguration;
use crate::utils;
use core::fmt;
use core::ops::Index;

/// The index of a node inside of a [`SceneGraph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// The index of the node in the scene graph arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural error raised while editing a [`SceneGraph`] or a partition.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The handle doesn't identify a node of this scene graph.
    #[error("the handle {0} does not belong to this scene graph.")]
    InvalidHandle(NodeHandle),
    /// A node can't be its own child.
    #[error("the node {0} can't be attached to itself.")]
    SelfParenting(NodeHandle),
    /// Attaching the child would make it one of its own ancestors.
    #[error("attaching {child} under {parent} would create a cycle.")]
    Cycle {
        /// The requested parent, which is a descendant of `child`.
        parent: NodeHandle,
        /// The node that was being attached.
        child: NodeHandle,
    },
    /// The node is already a member of the partition.
    #[error("the node {0} was inserted twice.")]
    DuplicateMember(NodeHandle),
}

/// An arena of [`Node`]s linked into a forest.
///
/// Nodes are never removed: taking a body out of play is done by clearing its
/// [`BodyFlags::RENDERABLE`](super::BodyFlags::RENDERABLE) and
/// [`BodyFlags::COLLIDABLE`](super::BodyFlags::COLLIDABLE) flags.
///
/// The global matrix of a node is `parent_matrix * local_matrix`, where the
/// parent matrix is the global matrix of its parent (or the identity for a
/// root). Each node memoizes its parent matrix and its world-space OBB. Any
/// write to a local transform goes through this graph, which walks the
/// subtree of the modified node and invalidates these caches for every
/// descendant. Reading a global matrix thus costs O(1) amortized between two
/// mutations of the ancestors.
///
/// # Panics
///
/// Methods taking a [`NodeHandle`] and not returning a `Result` panic if the
/// handle doesn't belong to this graph.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Creates an empty scene graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of nodes in this graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Does this graph contain no node?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Does `handle` identify a node of this graph?
    pub fn contains(&self, handle: NodeHandle) -> bool {
        handle.index() < self.nodes.len()
    }

    /// Checks that `handle` identifies a node of this graph.
    pub fn validate(&self, handle: NodeHandle) -> Result<NodeHandle, GraphError> {
        if self.contains(handle) {
            Ok(handle)
        } else {
            Err(GraphError::InvalidHandle(handle))
        }
    }

    /// Gets the node identified by `handle`.
    pub fn get(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.index())
    }

    /// Gets the simulation state of the node identified by `handle`, mutably.
    ///
    /// Nodes themselves are never handed out mutably: their transforms and
    /// links must go through the graph so the subtree caches stay in sync.
    pub fn get_body_mut(&mut self, handle: NodeHandle) -> Option<&mut Body> {
        self.nodes.get_mut(handle.index()).map(|node| &mut node.body)
    }

    /// The simulation state of the node identified by `handle`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `handle` isn't part of this graph.
    #[inline]
    pub fn body_mut(&mut self, handle: NodeHandle) -> &mut Body {
        &mut self.nodes[handle.index()].body
    }

    /// Iterates through all the nodes of this graph.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeHandle(i as u32), node))
    }

    /// Adds a parentless node to this graph.
    ///
    /// Any parent or children links set on `node` are discarded.
    pub fn insert(&mut self, mut node: Node) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u32);
        node.parent = None;
        node.children.clear();
        node.invalidate_parent_matrix();
        self.nodes.push(node);
        handle
    }

    /// Adds `node` to this graph as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeHandle, node: Node) -> Result<NodeHandle, GraphError> {
        let _ = self.validate(parent)?;
        let child = self.insert(node);
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Attaches `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent, it is detached from it first.
    /// Fails if the link would create a cycle.
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<(), GraphError> {
        let _ = self.validate(parent)?;
        let _ = self.validate(child)?;

        if parent == child {
            return Err(GraphError::SelfParenting(child));
        }

        if self.is_ancestor(child, parent) {
            return Err(GraphError::Cycle { parent, child });
        }

        if let Some(old_parent) = self.nodes[child.index()].parent {
            self.nodes[old_parent.index()].children.retain(|c| *c != child);
        }

        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        self.invalidate_subtree_parent_matrices(child);
        Ok(())
    }

    /// Detaches `child` from `parent`.
    ///
    /// Returns `false` if `child` wasn't a child of `parent`. The detached node
    /// becomes a root.
    pub fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> Result<bool, GraphError> {
        let _ = self.validate(parent)?;
        let _ = self.validate(child)?;

        let children = &mut self.nodes[parent.index()].children;
        let Some(pos) = children.iter().position(|c| *c == child) else {
            return Ok(false);
        };

        let _ = children.remove(pos);
        self.nodes[child.index()].parent = None;
        self.invalidate_subtree_parent_matrices(child);
        Ok(true)
    }

    /// Detaches `child` from its parent, if it has one.
    ///
    /// Returns the former parent.
    pub fn detach(&mut self, child: NodeHandle) -> Result<Option<NodeHandle>, GraphError> {
        let _ = self.validate(child)?;
        let parent = self.nodes[child.index()].parent;

        if let Some(parent) = parent {
            let _ = self.remove_child(parent, child)?;
        }

        Ok(parent)
    }

    /// Is `ancestor` equal to `node`, or one of its ancestors?
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut curr = Some(node);

        while let Some(handle) = curr {
            if handle == ancestor {
                return true;
            }
            curr = self.nodes[handle.index()].parent;
        }

        false
    }

    /// Finds the first node, in insertion order, with the given name.
    pub fn find(&self, name: &str) -> Option<NodeHandle> {
        self.iter()
            .find(|(_, node)| node.name() == Some(name))
            .map(|(handle, _)| handle)
    }

    /// Finds the first direct child of `parent` with the given name.
    pub fn get_child(&self, parent: NodeHandle, name: &str) -> Option<NodeHandle> {
        self[parent]
            .children
            .iter()
            .copied()
            .find(|c| self[*c].name() == Some(name))
    }

    /// Depth-first walk of the subtree rooted at `root`.
    ///
    /// `before` is called on a node before its children are visited, `after`
    /// once all of them have been.
    pub fn traverse<B, A>(&self, root: NodeHandle, before: &mut B, after: &mut A)
    where
        B: FnMut(NodeHandle, &Node),
        A: FnMut(NodeHandle, &Node),
    {
        let node = &self[root];
        before(root, node);
        for child in &node.children {
            self.traverse(*child, before, after);
        }
        after(root, node);
    }

    /*
     * Transform setters.
     */
    /// Sets the local translation of a node.
    pub fn set_translation(&mut self, handle: NodeHandle, translation: Vector) {
        self.nodes[handle.index()].write_trs(|trs| trs.translation = translation);
        self.invalidate_subtree(handle);
    }

    /// Sets the local rotation of a node.
    pub fn set_rotation(&mut self, handle: NodeHandle, rotation: Rotation) {
        self.nodes[handle.index()].write_trs(|trs| trs.rotation = rotation);
        self.invalidate_subtree(handle);
    }

    /// Sets the local scale of a node.
    pub fn set_scale(&mut self, handle: NodeHandle, scale: Vector) {
        self.nodes[handle.index()].write_trs(|trs| trs.scale = scale);
        self.invalidate_subtree(handle);
    }

    /// Sets the local matrix of a node.
    pub fn set_local_matrix(&mut self, handle: NodeHandle, matrix: Matrix4) {
        self.nodes[handle.index()].write_matrix(matrix);
        self.invalidate_subtree(handle);
    }

    /// Adds a world-space `offset` to the position of a node.
    ///
    /// The offset is expressed in the parent frame of the node before being
    /// added to its local translation.
    pub fn translate_by_world_offset(
        &mut self,
        handle: NodeHandle,
        offset: &Vector,
    ) -> Result<(), DegenerateConfiguration> {
        let local = self.world_to_parent_direction(handle, offset)?;
        let translation = self[handle].translation() + local;
        self.set_translation(handle, translation);
        Ok(())
    }

    /*
     * Derived world-space quantities.
     */
    /// The global matrix of the parent of this node, or the identity for a root.
    pub fn parent_matrix(&self, handle: NodeHandle) -> Matrix4 {
        let node = &self[handle];
        let Some(parent) = node.parent else {
            return Matrix4::identity();
        };

        if let Some(m) = node.parent_matrix.get() {
            return m;
        }

        let m = self.global_matrix(parent);
        node.parent_matrix.set(Some(m));
        m
    }

    /// The transform from the local space of this node to world-space.
    pub fn global_matrix(&self, handle: NodeHandle) -> Matrix4 {
        self.parent_matrix(handle) * self[handle].local_matrix()
    }

    /// The world-space OBB of this node, if it has a local OBB.
    pub fn global_obb(&self, handle: NodeHandle) -> Option<WorldObb> {
        let node = &self[handle];
        let obb = node.obb()?;

        if let Some(world) = node.global_obb.get() {
            return Some(world);
        }

        let world = obb.transform(&self.global_matrix(handle));
        node.global_obb.set(Some(world));
        Some(world)
    }

    /// The forward axis of this node, in world-space, normalized.
    ///
    /// Returns the zero vector if the global matrix collapses this axis.
    pub fn world_forward(&self, handle: NodeHandle) -> Vector {
        let forward = utils::transform_direction(&self.global_matrix(handle), &self[handle].forward());
        forward
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(Vector::zeros)
    }

    /// Expresses a world-space direction in the parent frame of this node.
    pub fn world_to_parent_direction(
        &self,
        handle: NodeHandle,
        dir: &Vector,
    ) -> Result<Vector, DegenerateConfiguration> {
        let inv = self
            .parent_matrix(handle)
            .try_inverse()
            .ok_or(DegenerateConfiguration::SingularParentMatrix(handle))?;
        Ok(utils::transform_direction(&inv, dir))
    }

    /// The union of the world-space AABBs of every OBB in this subtree.
    ///
    /// Useful for culling a whole subtree at once.
    pub fn subtree_aabb(&self, root: NodeHandle) -> Option<Aabb> {
        let mut result: Option<Aabb> = None;
        self.traverse(
            root,
            &mut |handle, _| {
                if let Some(world) = self.global_obb(handle) {
                    result = Some(match result {
                        Some(aabb) => aabb.merged(&world.aabb),
                        None => world.aabb,
                    });
                }
            },
            &mut |_, _| {},
        );
        result
    }

    fn invalidate_subtree(&self, root: NodeHandle) {
        self[root].invalidate_global_obb();
        for child in &self[root].children {
            self.invalidate_subtree_parent_matrices(*child);
        }
    }

    fn invalidate_subtree_parent_matrices(&self, root: NodeHandle) {
        self.traverse(
            root,
            &mut |_, node| node.invalidate_parent_matrix(),
            &mut |_, _| {},
        );
    }
}

impl Index<NodeHandle> for SceneGraph {
    type Output = Node;

    #[inline]
    fn index(&self, handle: NodeHandle) -> &Node {
        &self.nodes[handle.index()]
    }
}
