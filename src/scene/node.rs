use super::{Body, BodyFlags, BodyKind, NodeHandle};
use crate::bounding_volume::{Obb, WorldObb};
use crate::control::OrbitRotation;
use crate::math::{Matrix, Matrix4, Real, Rotation, Vector};
use core::cell::Cell;

/// The decomposed form of a local transform.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trs {
    /// The translation.
    pub translation: Vector,
    /// The rotation.
    pub rotation: Rotation,
    /// The (possibly non-uniform) scale.
    pub scale: Vector,
}

impl Default for Trs {
    fn default() -> Self {
        Self {
            translation: Vector::zeros(),
            rotation: Rotation::identity(),
            scale: Vector::repeat(1.0),
        }
    }
}

impl Trs {
    /// The matrix `T * R * S`.
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Splits an affine matrix into translation, rotation and scale.
    ///
    /// Shear is lost. A mirroring matrix is represented with a negative `x` scale.
    pub fn from_matrix(m: &Matrix4) -> Self {
        let translation = m.fixed_view::<3, 1>(0, 3).into_owned();
        let mut linear: Matrix = m.fixed_view::<3, 3>(0, 0).into_owned();
        let mut scale = Vector::new(
            linear.column(0).norm(),
            linear.column(1).norm(),
            linear.column(2).norm(),
        );

        if linear.determinant() < 0.0 {
            scale.x = -scale.x;
        }

        for i in 0..3 {
            if scale[i] != 0.0 {
                let mut column = linear.column_mut(i);
                column /= scale[i];
            }
        }

        Self {
            translation,
            rotation: Rotation::from_matrix(&linear),
            scale,
        }
    }
}

/// A node of the [`SceneGraph`](super::SceneGraph).
///
/// A node stores its local transform either as a matrix or as separate
/// translation/rotation/scale components. Only one of the two forms is
/// authoritative at any time: writing one form marks the other stale, and the
/// stale form is recomputed the next time it's read.
///
/// The node also memoizes the global matrix of its parent and its own
/// world-space OBB. These caches are invalidated by the scene graph whenever an
/// ancestor's local transform changes.
///
/// Transform setters live on [`SceneGraph`](super::SceneGraph) since they need
/// to invalidate the caches of the whole subtree.
#[derive(Clone, Debug)]
pub struct Node {
    name: Option<String>,

    // At least one of these two is always `Some`.
    trs: Cell<Option<Trs>>,
    matrix: Cell<Option<Matrix4>>,

    pub(super) parent_matrix: Cell<Option<Matrix4>>,
    pub(super) global_obb: Cell<Option<WorldObb>>,
    obb: Option<Obb>,

    forward: Vector,
    up: Vector,

    pub(super) body: Body,

    pub(super) parent: Option<NodeHandle>,
    pub(super) children: Vec<NodeHandle>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Creates a node with an identity transform, the default mass and no flags.
    pub fn new() -> Self {
        Self {
            name: None,
            trs: Cell::new(Some(Trs::default())),
            matrix: Cell::new(None),
            parent_matrix: Cell::new(None),
            global_obb: Cell::new(None),
            obb: None,
            forward: Vector::z(),
            up: Vector::y(),
            body: Body::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets the name of this node.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the local translation of this node.
    pub fn with_translation(mut self, translation: Vector) -> Self {
        self.write_trs(|trs| trs.translation = translation);
        self
    }

    /// Sets the local rotation of this node.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.write_trs(|trs| trs.rotation = rotation);
        self
    }

    /// Sets the local scale of this node.
    pub fn with_scale(mut self, scale: Vector) -> Self {
        self.write_trs(|trs| trs.scale = scale);
        self
    }

    /// Sets the local matrix of this node.
    pub fn with_matrix(mut self, matrix: Matrix4) -> Self {
        self.write_matrix(matrix);
        self
    }

    /// Sets the local-space OBB of this node.
    pub fn with_obb(mut self, obb: Obb) -> Self {
        self.obb = Some(obb);
        self
    }

    /// Sets the simulation flags of this node.
    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.body.flags = flags;
        self
    }

    /// Sets the mass of this node.
    pub fn with_mass(mut self, mass: Real) -> Self {
        self.body.mass = mass;
        self
    }

    /// Sets the body kind of this node.
    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.body.kind = kind;
        self
    }

    /// Makes this node an orbit anchor.
    pub fn with_orbit(mut self, orbit: OrbitRotation) -> Self {
        self.body.orbit = Some(orbit);
        self
    }

    /// Sets the initial velocity of this node.
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.body.velocity = velocity;
        self
    }

    /// Sets the object-space forward and up axes of this node.
    pub fn with_axes(mut self, forward: Vector, up: Vector) -> Self {
        self.forward = forward;
        self.up = up;
        self
    }

    /// The name of this node.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The parent of this node.
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// The children of this node, in insertion order.
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// The local-space OBB of this node.
    pub fn obb(&self) -> Option<&Obb> {
        self.obb.as_ref()
    }

    /// The object-space forward axis.
    pub fn forward(&self) -> Vector {
        self.forward
    }

    /// The object-space up axis.
    pub fn up(&self) -> Vector {
        self.up
    }

    /// The simulation state of this node.
    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Does this node have all the given flags?
    #[inline]
    pub fn is(&self, flags: BodyFlags) -> bool {
        self.body.is(flags)
    }

    /// The local translation/rotation/scale, decomposed from the matrix if needed.
    pub fn trs(&self) -> Trs {
        match self.trs.get() {
            Some(trs) => trs,
            None => {
                // The matrix is authoritative whenever the components are stale.
                let trs = Trs::from_matrix(&self.matrix.get().unwrap_or_else(Matrix4::identity));
                self.trs.set(Some(trs));
                trs
            }
        }
    }

    /// The local translation.
    pub fn translation(&self) -> Vector {
        self.trs().translation
    }

    /// The local rotation.
    pub fn rotation(&self) -> Rotation {
        self.trs().rotation
    }

    /// The local scale.
    pub fn scale(&self) -> Vector {
        self.trs().scale
    }

    /// The local matrix, composed from the components if needed.
    pub fn local_matrix(&self) -> Matrix4 {
        match self.matrix.get() {
            Some(m) => m,
            None => {
                let m = self.trs.get().unwrap_or_default().to_matrix();
                self.matrix.set(Some(m));
                m
            }
        }
    }

    /// Is the decomposed form up-to-date?
    pub fn components_are_fresh(&self) -> bool {
        self.trs.get().is_some()
    }

    /// Is the matrix form up-to-date?
    pub fn matrix_is_fresh(&self) -> bool {
        self.matrix.get().is_some()
    }

    /// Is the cached parent matrix up-to-date?
    pub fn parent_matrix_is_fresh(&self) -> bool {
        self.parent_matrix.get().is_some()
    }

    /// Is the cached world-space OBB up-to-date?
    pub fn global_obb_is_fresh(&self) -> bool {
        self.global_obb.get().is_some()
    }

    /// Modifies the decomposed form and makes it authoritative.
    pub(super) fn write_trs(&mut self, f: impl FnOnce(&mut Trs)) {
        let mut trs = self.trs();
        f(&mut trs);
        self.trs.set(Some(trs));
        self.matrix.set(None);
    }

    /// Replaces the matrix and makes it authoritative.
    pub(super) fn write_matrix(&mut self, matrix: Matrix4) {
        self.matrix.set(Some(matrix));
        self.trs.set(None);
    }

    pub(super) fn invalidate_parent_matrix(&self) {
        self.parent_matrix.set(None);
        self.global_obb.set(None);
    }

    pub(super) fn invalidate_global_obb(&self) {
        self.global_obb.set(None);
    }
}
