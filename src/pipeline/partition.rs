use crate::scene::{GraphError, NodeHandle};

/// A named group of root nodes belonging to the same simulation domain.
///
/// Typical partitions are the static world geometry, the floating ambient
/// props, or the collectibles. A [`CollisionPipeline`](super::CollisionPipeline)
/// only tests bodies against the partitions it was given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    name: String,
    roots: Vec<NodeHandle>,
}

impl Partition {
    /// Creates an empty partition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    /// Creates a partition from a list of roots, rejecting duplicates.
    pub fn with_roots(
        name: impl Into<String>,
        roots: impl IntoIterator<Item = NodeHandle>,
    ) -> Result<Self, GraphError> {
        let mut result = Self::new(name);
        for root in roots {
            result.insert(root)?;
        }
        Ok(result)
    }

    /// The name of this partition.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The roots of this partition, in insertion order.
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    /// Is `root` one of the roots of this partition?
    pub fn contains(&self, root: NodeHandle) -> bool {
        self.roots.contains(&root)
    }

    /// Adds a root to this partition.
    pub fn insert(&mut self, root: NodeHandle) -> Result<(), GraphError> {
        if self.contains(root) {
            return Err(GraphError::DuplicateMember(root));
        }

        self.roots.push(root);
        Ok(())
    }

    /// Removes a root from this partition. Returns `false` if it wasn't there.
    pub fn remove(&mut self, root: NodeHandle) -> bool {
        let len = self.roots.len();
        self.roots.retain(|r| *r != root);
        self.roots.len() != len
    }
}
