//! Oriented Bounding Box.

use crate::bounding_volume::Aabb;
use crate::math::{Matrix4, Point, Vector, DEFAULT_EPSILON};
use crate::utils;

/// Error raised when building an [`Obb`] from malformed geometry.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObbError {
    /// An oriented bounding box has exactly 8 corners.
    #[error("an oriented bounding box needs exactly 8 vertices, got {0}.")]
    WrongVertexCount(usize),
    /// One of the corners has a NaN or infinite coordinate.
    #[error("the vertex {0} has a non-finite coordinate.")]
    NonFiniteVertex(usize),
    /// The three corners used to compute a face normal are collinear.
    #[error("the corners {0:?} span a degenerate face.")]
    DegenerateFace([usize; 3]),
}

/// A convex hexahedron given by its 8 corners in the local space of a node.
///
/// The corners follow the same numbering as [`Aabb::vertices`]:
///
/// ```text
///    y             3 - 2
///    |           7 − 6 |
///    ___ x       |   | 1
///   /            4 - 5
///  z
/// ```
///
/// Corner `0` is adjacent to corners `1`, `3` and `4`. The three face
/// normals of the box are derived from the edges leaving corner `0`, so the
/// hexahedron is expected to be a parallelepiped (a box deformed by an affine
/// transform). Nothing else about the shape is assumed.
///
/// The OBB itself is immutable and carries no cache: [`Obb::transform`] is a
/// pure function. Caching the world-space OBB of a node is done by the scene
/// graph.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Obb {
    vertices: [Point; 8],
}

/// The world-space projection of an [`Obb`].
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct WorldObb {
    /// The 8 corners, in world-space, with the same numbering as the local OBB.
    pub vertices: [Point; 8],
    /// The three face normals, in world-space.
    ///
    /// A normal is the zero vector if the world transform flattened the
    /// corresponding face (for example with a zero scale).
    pub normals: [Vector; 3],
    /// The axis-aligned bounds of the 8 corners.
    pub aabb: Aabb,
    /// The mean of the 8 corners.
    pub center: Point,
}

impl Obb {
    /// The corner triples `(p1, p2, p3)` whose normal `(p1 - p2) × (p3 - p2)`
    /// gives each face normal.
    pub const FACE_NORMAL_CORNERS: [[usize; 3]; 3] = [[1, 0, 3], [4, 0, 1], [3, 0, 4]];

    /// Creates an OBB from its 8 local-space corners.
    ///
    /// Fails if `vertices` doesn't contain exactly 8 finite points, or if one
    /// of the face normals is undefined.
    pub fn new(vertices: &[Point]) -> Result<Self, ObbError> {
        let vertices: [Point; 8] = vertices
            .try_into()
            .map_err(|_| ObbError::WrongVertexCount(vertices.len()))?;

        if let Some(i) = vertices
            .iter()
            .position(|v| !v.coords.iter().all(|e| e.is_finite()))
        {
            return Err(ObbError::NonFiniteVertex(i));
        }

        for ids in Self::FACE_NORMAL_CORNERS {
            let [a, b, c] = ids.map(|i| &vertices[i]);
            if utils::plane_normal(a, b, c, DEFAULT_EPSILON).is_none() {
                return Err(ObbError::DegenerateFace(ids));
            }
        }

        Ok(Self { vertices })
    }

    /// Creates an axis-aligned box centered at the local origin.
    pub fn cuboid(half_extents: Vector) -> Result<Self, ObbError> {
        Self::from_aabb(&Aabb::from_half_extents(Point::origin(), half_extents))
    }

    /// Creates an OBB with the same corners as `aabb`.
    pub fn from_aabb(aabb: &Aabb) -> Result<Self, ObbError> {
        Self::new(&aabb.vertices())
    }

    /// The local-space corners of this OBB.
    #[inline]
    pub fn vertices(&self) -> &[Point; 8] {
        &self.vertices
    }

    /// Projects this OBB into world-space.
    pub fn transform(&self, world: &Matrix4) -> WorldObb {
        let vertices = self.vertices.map(|v| world.transform_point(&v));
        let normals = Self::FACE_NORMAL_CORNERS.map(|[a, b, c]| {
            utils::plane_normal(&vertices[a], &vertices[b], &vertices[c], DEFAULT_EPSILON)
                .map(|n| n.into_inner())
                .unwrap_or_else(Vector::zeros)
        });
        let aabb = Aabb::from_points(vertices);
        let center = utils::center(&vertices).unwrap_or_else(Point::origin);

        WorldObb {
            vertices,
            normals,
            aabb,
            center,
        }
    }
}
