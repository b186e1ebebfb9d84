//! Incremental sweep construction of a Delaunay triangulation.
//!
//! Vertices are inserted in order of increasing x coordinate into a triangulation seeded with a
//! large sentinel triangle. Every round removes all open triangles whose circumcircle contains
//! the new vertex and re-triangulates the resulting cavity by connecting its boundary edges to
//! that vertex. A triangle whose circumcircle lies completely left of the current vertex can
//! never be invalidated again and is moved to the closed set, which keeps the open set small.
//!
//! Faces along the convex hull that were lost to the sentinel triangle are restored afterwards,
//! see the `hull` module.

use crate::edges::{Edge, EdgeDeduplicator};
use crate::hull::fill_hull_gaps;
use crate::triangle::SweepTriangle;
use crate::{FixedVertexHandle, Point2, TriangulationParameters};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sentinel corners are placed this many bounding box extents away from its center.
const SENTINEL_DISTANCE_FACTOR: f64 = 20.0;

/// Diagnostic counters collected while creating a triangulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct SweepStatistics {
    /// Number of vertices inserted by the sweep.
    pub processed_vertices: usize,
    /// Number of triangles finalized early because the sweep had passed their circumcircle.
    pub closed_early: usize,
    /// Number of triangles removed because a later vertex was inside or on their circumcircle.
    pub invalidated: usize,
    /// Number of triangles created, including the sentinel triangle.
    pub created: usize,
    /// Number of candidate triangles that were skipped for being collinear within epsilon.
    pub skipped_degenerate: usize,
    /// Number of finished triangles dropped because they referenced a sentinel vertex.
    pub removed_with_sentinel: usize,
    /// Number of faces added along the convex hull after the sentinel triangles were dropped.
    pub filled_along_hull: usize,
}

/// Result of a sweep: the finished triangles and the counters describing how they came about.
#[derive(Debug, Default)]
pub(crate) struct SweepResult {
    pub triangles: Vec<SweepTriangle>,
    pub statistics: SweepStatistics,
}

/// Triangulates the given positions.
///
/// Returns an empty result for fewer than three positions or if the positions' bounding box
/// cannot span a finite sentinel triangle, i.e. if it is too small or its coordinates overflow.
pub(crate) fn sweep(
    positions: &[Point2<f64>],
    parameters: &TriangulationParameters,
) -> SweepResult {
    let num_vertices = positions.len();
    if num_vertices < 3 {
        return SweepResult::default();
    }

    let epsilon = parameters.epsilon();
    let mut statistics = SweepStatistics::default();

    // The stable sort keeps vertices with equal x coordinates in input order.
    let mut insertion_order: Vec<usize> = (0..num_vertices).collect();
    insertion_order.sort_by(|&a, &b| positions[a].x.total_cmp(&positions[b].x));

    let mut all_positions = Vec::with_capacity(num_vertices + 3);
    all_positions.extend_from_slice(positions);
    all_positions.extend_from_slice(&sentinel_positions(positions));

    let sentinels = [
        FixedVertexHandle::new(num_vertices),
        FixedVertexHandle::new(num_vertices + 1),
        FixedVertexHandle::new(num_vertices + 2),
    ];
    let super_triangle = match SweepTriangle::new(&all_positions, sentinels, epsilon) {
        Ok(triangle) => triangle,
        Err(err) => {
            log::warn!(
                "Cannot triangulate {} vertices, their bounding box spans no sentinel triangle: {}",
                num_vertices,
                err
            );
            return SweepResult::default();
        }
    };
    statistics.created += 1;

    let mut open = vec![super_triangle];
    let mut closed = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut deduplicator = EdgeDeduplicator::new();

    for index in insertion_order {
        let handle = FixedVertexHandle::new(index);
        let position = all_positions[index];

        let mut survivors = Vec::with_capacity(open.len() + 2);
        edges.clear();

        for triangle in open.drain(..) {
            let circumcircle = *triangle.circumcircle();
            if circumcircle.is_left_of(position.x) {
                statistics.closed_early += 1;
                closed.push(triangle);
            } else if circumcircle.contains(position) {
                statistics.invalidated += 1;
                edges.extend_from_slice(&triangle.edges());
            } else {
                survivors.push(triangle);
            }
        }

        deduplicator.retain_boundary(&mut edges);

        for edge in &edges {
            match SweepTriangle::new(&all_positions, [edge.from, edge.to, handle], epsilon) {
                Ok(triangle) => {
                    statistics.created += 1;
                    survivors.push(triangle);
                }
                Err(_) => statistics.skipped_degenerate += 1,
            }
        }

        log::trace!(
            "Inserted vertex {}: {} cavity edges, {} open and {} closed triangles",
            index,
            edges.len(),
            survivors.len(),
            closed.len()
        );

        open = survivors;
        statistics.processed_vertices += 1;
    }

    closed.append(&mut open);

    let num_finished = closed.len();
    closed.retain(|triangle| !triangle.touches_sentinel(num_vertices));
    statistics.removed_with_sentinel = num_finished - closed.len();
    statistics.filled_along_hull = fill_hull_gaps(positions, &mut closed, epsilon);

    log::debug!(
        "Triangulated {} vertices into {} triangles: {:?}",
        num_vertices,
        closed.len(),
        statistics
    );

    SweepResult {
        triangles: closed,
        statistics,
    }
}

/// Returns the corners of a triangle enclosing every position with a wide margin.
fn sentinel_positions(positions: &[Point2<f64>]) -> [Point2<f64>; 3] {
    let mut min = positions[0];
    let mut max = positions[0];
    for position in &positions[1..] {
        min.x = min.x.min(position.x);
        min.y = min.y.min(position.y);
        max.x = max.x.max(position.x);
        max.y = max.y.max(position.y);
    }

    let extent = (max.x - min.x).max(max.y - min.y);
    let mid_x = (min.x + max.x) * 0.5;
    let mid_y = (min.y + max.y) * 0.5;
    let distance = SENTINEL_DISTANCE_FACTOR * extent;

    [
        Point2::new(mid_x - distance, mid_y - extent),
        Point2::new(mid_x, mid_y + distance),
        Point2::new(mid_x + distance, mid_y - extent),
    ]
}
