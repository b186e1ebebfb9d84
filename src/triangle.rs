use crate::edges::Edge;
use crate::math::{Circumcircle, DegenerateTriangle};
use crate::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Refers to a vertex by its index in the input sequence.
///
/// Vertex identity is handle identity: two vertices at the same position are still different
/// vertices if their handles differ.
///
/// Handles are stored as `u32`. Together with the three sentinel vertices, a triangulation
/// supports at most 2<sup>32</sup> - 3 input vertices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedVertexHandle {
    index: u32,
}

impl FixedVertexHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index: index
                .try_into()
                .expect("Index too big - at most 2^32 vertices supported"),
        }
    }

    /// Returns the index of the referenced vertex in the input sequence.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Debug for FixedVertexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedVertexHandle")
            .field("index", &self.index)
            .finish()
    }
}

/// A triangle of the sweep's working set, together with its cached circumcircle.
///
/// Corners may reference the three sentinel vertices, whose handles directly follow the last
/// input vertex.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct SweepTriangle {
    vertices: [FixedVertexHandle; 3],
    circumcircle: Circumcircle,
}

impl SweepTriangle {
    /// Creates a triangle from three handles into `positions`.
    ///
    /// Fails if the corners are collinear within `epsilon`. Such a triangle must never enter
    /// the working set.
    pub fn new(
        positions: &[Point2<f64>],
        vertices: [FixedVertexHandle; 3],
        epsilon: f64,
    ) -> Result<Self, DegenerateTriangle> {
        let [a, b, c] = vertices;
        let circumcircle = Circumcircle::new(
            [
                positions[a.index()],
                positions[b.index()],
                positions[c.index()],
            ],
            epsilon,
        )?;
        Ok(Self {
            vertices,
            circumcircle,
        })
    }

    pub fn vertices(&self) -> [FixedVertexHandle; 3] {
        self.vertices
    }

    pub fn circumcircle(&self) -> &Circumcircle {
        &self.circumcircle
    }

    /// Returns the edges `ab`, `bc` and `ca`.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// Returns `true` if any corner is one of the sentinel vertices.
    ///
    /// `num_input_vertices` is the number of real vertices; every handle at or above it
    /// belongs to the supertriangle.
    pub fn touches_sentinel(&self, num_input_vertices: usize) -> bool {
        self.vertices
            .iter()
            .any(|handle| handle.index() >= num_input_vertices)
    }
}
