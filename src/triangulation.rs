use crate::math::{self, Circumcircle};
use crate::sweep::{sweep, SweepResult};
use crate::triangle::SweepTriangle;
use crate::{
    validate_vertex, FixedVertexHandle, HasPosition, InsertionError, Point2, SweepStatistics,
    TriangulationParameters,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finished triangle of a [Triangulation].
///
/// Its corners are stored as handles into the triangulation's vertices, in no particular
/// winding order.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Face {
    vertices: [FixedVertexHandle; 3],
    circumcircle: Circumcircle,
}

impl Face {
    /// Returns the handles of the three corners.
    pub fn vertices(&self) -> [FixedVertexHandle; 3] {
        self.vertices
    }

    /// Returns the face's circumcircle.
    pub fn circumcircle(&self) -> &Circumcircle {
        &self.circumcircle
    }
}

impl From<SweepTriangle> for Face {
    fn from(triangle: SweepTriangle) -> Self {
        Self {
            vertices: triangle.vertices(),
            circumcircle: *triangle.circumcircle(),
        }
    }
}

/// A two dimensional [Delaunay triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation)
/// of a point set, as used for triangulated irregular networks.
///
/// No vertex of the triangulation lies strictly inside the circumcircle of any of its faces. The
/// faces cover the convex hull of the vertices without gaps or overlaps. Faces along the hull
/// that the sweep loses to its enclosing sentinel triangle are restored afterwards, their number
/// is reported by [SweepStatistics::filled_along_hull].
///
/// A triangulation is created at once from all vertices by [Triangulation::bulk_load] and
/// cannot be modified afterwards. Vertices are kept in input order and are not inspected beyond
/// their position, any additional data they carry is available unchanged through
/// [FaceHandle::vertices].
///
/// # Example
/// ```
/// use tinsweep::{PointWithData, Triangulation};
///
/// # fn main() -> Result<(), tinsweep::InsertionError> {
/// let samples = vec![
///     PointWithData::new(0.0, 0.0, 12.5),
///     PointWithData::new(1.0, 0.0, 14.0),
///     PointWithData::new(1.0, 1.0, 11.0),
///     PointWithData::new(0.0, 1.0, 13.5),
/// ];
/// let triangulation = Triangulation::bulk_load(samples)?;
/// assert_eq!(triangulation.num_faces(), 2);
///
/// for face in triangulation.faces() {
///     let [a, b, c] = face.vertices();
///     let mean_elevation = (a.data + b.data + c.data) / 3.0;
///     assert!(mean_elevation > 11.0 && mean_elevation < 14.0);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Degenerate input
/// Fewer than three vertices, coincident vertices or vertices that are all collinear produce an
/// empty triangulation. This is not an error: no triangle can be formed from such input. The
/// same applies to finite coordinates so large (around 10<sup>150</sup> and beyond) that the
/// circumcircle calculation overflows.
///
/// Vertices sharing a position remain distinct vertices, but only one of them becomes part of
/// the faces: the one inserted last. Vertices with equal x coordinates are inserted in input
/// order, so this is the duplicate that appears last in the input. The others are kept in
/// [Triangulation::vertices] without belonging to any face.
///
/// Candidate triangles that are collinear within [TriangulationParameters::epsilon] are
/// skipped. Their number is reported by [SweepStatistics::skipped_degenerate].
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangulation<V> {
    vertices: Vec<V>,
    faces: Vec<Face>,
    statistics: SweepStatistics,
    parameters: TriangulationParameters,
}

impl<V: HasPosition> Triangulation<V> {
    /// Creates a new triangulation with the default [TriangulationParameters].
    ///
    /// Returns an error if any vertex has a NaN or infinite coordinate, see [validate_vertex].
    ///
    /// # Runtime
    /// Vertices are inserted sorted by their x coordinate. The expected runtime is about
    /// O(n<sup>1.5</sup>) for well distributed input, the worst case is O(n<sup>2</sup>).
    ///
    /// # Panics
    /// Panics if more than 2<sup>32</sup> - 3 vertices are given.
    pub fn bulk_load(vertices: Vec<V>) -> Result<Self, InsertionError> {
        Self::bulk_load_with_parameters(vertices, &TriangulationParameters::default())
    }

    /// Creates a new triangulation with custom parameters.
    ///
    /// *See also [Triangulation::bulk_load]*
    pub fn bulk_load_with_parameters(
        vertices: Vec<V>,
        parameters: &TriangulationParameters,
    ) -> Result<Self, InsertionError> {
        for vertex in &vertices {
            validate_vertex(vertex)?;
        }

        let positions: Vec<Point2<f64>> = vertices
            .iter()
            .map(|vertex| vertex.position().to_f64())
            .collect();

        let SweepResult {
            triangles,
            statistics,
        } = sweep(&positions, parameters);

        Ok(Self {
            vertices,
            faces: triangles.into_iter().map(Face::from).collect(),
            statistics,
            parameters: *parameters,
        })
    }

    /// Checks the invariants of this triangulation and panics if any of them is violated.
    ///
    /// Every face must reference three distinct input vertices that are not collinear within
    /// epsilon, and no vertex may lie strictly inside a face's circumcircle. The circumcircle test
    /// uses a small relative tolerance to account for rounding errors.
    ///
    /// This method takes O(n * f) time for n vertices and f faces.
    pub fn sanity_check(&self) {
        let positions: Vec<Point2<f64>> = self
            .vertices
            .iter()
            .map(|vertex| vertex.position().to_f64())
            .collect();

        for face in &self.faces {
            let [a, b, c] = face.vertices;
            for handle in face.vertices {
                assert!(
                    handle.index() < positions.len(),
                    "Face references non-input vertex {:?}",
                    handle
                );
            }
            assert!(a != b && b != c && c != a);
            assert!(!math::is_collinear(
                positions[a.index()],
                positions[b.index()],
                positions[c.index()],
                self.parameters.epsilon()
            ));

            let circumcircle = face.circumcircle;
            let radius_2 = circumcircle.radius_2();
            for (index, position) in positions.iter().enumerate() {
                if face.vertices.iter().any(|handle| handle.index() == index) {
                    continue;
                }
                let distance_2 = circumcircle.center().distance_2(*position);
                assert!(
                    distance_2 >= radius_2 * (1.0 - 1.0e-9),
                    "Vertex {} lies inside the circumcircle of {:?}",
                    index,
                    face
                );
            }
        }
    }
}

impl<V> Triangulation<V> {
    /// Returns the number of vertices, including vertices that are not part of any face.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the triangulation has no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Returns all vertices in input order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Returns the vertex referenced by a handle.
    ///
    /// Panics if the handle does not belong to this triangulation.
    pub fn vertex(&self, handle: FixedVertexHandle) -> &V {
        &self.vertices[handle.index()]
    }

    /// Returns an iterator over all faces.
    pub fn faces(&self) -> impl ExactSizeIterator<Item = FaceHandle<'_, V>> + '_ {
        self.faces.iter().map(move |face| FaceHandle {
            vertices: &self.vertices,
            face,
        })
    }

    /// Returns the diagnostic counters collected during creation.
    pub fn statistics(&self) -> &SweepStatistics {
        &self.statistics
    }

    /// Returns the parameters this triangulation was created with.
    pub fn parameters(&self) -> &TriangulationParameters {
        &self.parameters
    }

    /// Consumes the triangulation and returns its vertices in input order.
    pub fn into_vertices(self) -> Vec<V> {
        self.vertices
    }
}

/// A reference to a face of a [Triangulation] that can resolve its corner vertices.
#[derive(Debug)]
pub struct FaceHandle<'a, V> {
    vertices: &'a [V],
    face: &'a Face,
}

impl<'a, V> Clone for FaceHandle<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for FaceHandle<'a, V> {}

impl<'a, V> FaceHandle<'a, V> {
    /// Returns the underlying face, detached from the triangulation's lifetime.
    pub fn fix(&self) -> Face {
        *self.face
    }

    /// Returns the handles of the three corners.
    pub fn vertex_handles(&self) -> [FixedVertexHandle; 3] {
        self.face.vertices
    }

    /// Returns the three corner vertices.
    pub fn vertices(&self) -> [&'a V; 3] {
        let vertices = self.vertices;
        self.face
            .vertices
            .map(|handle| &vertices[handle.index()])
    }

    /// Returns the face's circumcircle.
    pub fn circumcircle(&self) -> &'a Circumcircle {
        &self.face.circumcircle
    }
}

impl<'a, V: HasPosition> FaceHandle<'a, V> {
    /// Returns the positions of the three corners.
    pub fn positions(&self) -> [Point2<V::Scalar>; 3] {
        self.vertices().map(|vertex| vertex.position())
    }

    /// Returns the face's area.
    pub fn area(&self) -> f64 {
        math::triangle_area(self.positions().map(|position| position.to_f64()))
    }
}
