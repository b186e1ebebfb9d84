//! Completion of a swept triangulation along its convex hull.
//!
//! Dropping the sentinel triangles can leave gaps between the remaining faces and the convex
//! hull: a thin triangle at the hull whose circumcircle reaches a sentinel vertex is invalidated
//! by it and never recreated. All remaining faces are Delaunay faces of the input, so every gap
//! is bounded by Delaunay edges. The gaps are closed by wrapping outward from each uncovered
//! edge: among the vertices on its open side, the one whose circle through that edge has the
//! lowest center contains none of the others and forms the missing Delaunay face.

use hashbrown::HashSet;

use crate::math::{self, Circumcircle};
use crate::triangle::SweepTriangle;
use crate::{FixedVertexHandle, Point2};

/// An edge whose left side is considered.
type DirectedEdge = (FixedVertexHandle, FixedVertexHandle);

/// Adds the faces missing between `triangles` and the convex hull of `positions`.
///
/// `triangles` must only reference handles into `positions`. If it is empty, the wrap starts
/// from a convex hull edge. Returns the number of added faces.
pub(crate) fn fill_hull_gaps(
    positions: &[Point2<f64>],
    triangles: &mut Vec<SweepTriangle>,
    epsilon: f64,
) -> usize {
    let mut covered: HashSet<DirectedEdge> = HashSet::with_capacity(triangles.len() * 3);
    for triangle in triangles.iter() {
        covered.extend(counterclockwise_edges(positions, triangle.vertices()));
    }

    // Every face lies left of its counterclockwise edges. An edge without its twin leaves the
    // twin's left side uncovered.
    let mut front: Vec<DirectedEdge> = Vec::new();
    for triangle in triangles.iter() {
        for (from, to) in counterclockwise_edges(positions, triangle.vertices()) {
            if !covered.contains(&(to, from)) {
                front.push((to, from));
            }
        }
    }

    if triangles.is_empty() {
        front.extend(lowest_hull_edge(positions));
    }

    let mut added = 0;
    while let Some((from, to)) = front.pop() {
        if covered.contains(&(from, to)) {
            continue;
        }

        // No apex means nothing lies left of the edge: it is part of the convex hull.
        let Some(apex) = delaunay_apex(positions, from, to, epsilon) else {
            continue;
        };
        if covered.contains(&(to, apex)) || covered.contains(&(apex, from)) {
            continue;
        }
        let Ok(triangle) = SweepTriangle::new(positions, [from, to, apex], epsilon) else {
            continue;
        };

        covered.extend([(from, to), (to, apex), (apex, from)]);
        for (edge_from, edge_to) in [(to, apex), (apex, from)] {
            if !covered.contains(&(edge_to, edge_from)) {
                front.push((edge_to, edge_from));
            }
        }
        triangles.push(triangle);
        added += 1;
    }

    if added > 0 {
        log::debug!("Added {} faces along the convex hull", added);
    }
    added
}

fn counterclockwise_edges(
    positions: &[Point2<f64>],
    [a, b, c]: [FixedVertexHandle; 3],
) -> [DirectedEdge; 3] {
    if math::cross(positions[a.index()], positions[b.index()], positions[c.index()]) < 0.0 {
        [(a, c), (c, b), (b, a)]
    } else {
        [(a, b), (b, c), (c, a)]
    }
}

/// Returns the vertex left of `from -> to` whose circle through the edge contains no other
/// vertex left of it, or `None` if no vertex lies left of the edge by more than `epsilon`.
///
/// The centers of all circles through both endpoints lie on the edge's perpendicular bisector.
/// A vertex left of the edge lies inside such a circle exactly if its own circle's center is
/// closer to the edge's right side, so the vertex with the lowest center along the left normal
/// wins. Ties go to the vertex with the lower index.
fn delaunay_apex(
    positions: &[Point2<f64>],
    from: FixedVertexHandle,
    to: FixedVertexHandle,
    epsilon: f64,
) -> Option<FixedVertexHandle> {
    let p = positions[from.index()];
    let q = positions[to.index()];
    let mid = Point2::new((p.x + q.x) * 0.5, (p.y + q.y) * 0.5);
    let left_normal = Point2::new(p.y - q.y, q.x - p.x);

    let mut best: Option<(f64, FixedVertexHandle)> = None;
    for (index, candidate) in positions.iter().enumerate() {
        if math::cross(p, q, *candidate) <= epsilon {
            continue;
        }
        let Ok(circumcircle) = Circumcircle::new([p, q, *candidate], epsilon) else {
            continue;
        };

        let center = circumcircle.center();
        let offset = (center.x - mid.x) * left_normal.x + (center.y - mid.y) * left_normal.y;
        if best.map_or(true, |(best_offset, _)| offset < best_offset) {
            best = Some((offset, FixedVertexHandle::new(index)));
        }
    }
    best.map(|(_, apex)| apex)
}

/// Returns a convex hull edge starting at the lowest vertex, with all vertices on or left of it.
///
/// Of several vertices collinear with the edge, the closest one is chosen. Returns `None` if all
/// positions coincide.
fn lowest_hull_edge(positions: &[Point2<f64>]) -> Option<DirectedEdge> {
    let (start, lowest) = positions
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))?;

    let mut end: Option<(usize, Point2<f64>)> = None;
    for (index, position) in positions.iter().enumerate() {
        if *position == *lowest {
            continue;
        }
        let replace = match end {
            None => true,
            Some((_, current)) => {
                let side = math::cross(*lowest, current, *position);
                side < 0.0
                    || (side == 0.0 && lowest.distance_2(*position) < lowest.distance_2(current))
            }
        };
        if replace {
            end = Some((index, *position));
        }
    }

    end.map(|(index, _)| (FixedVertexHandle::new(start), FixedVertexHandle::new(index)))
}

#[cfg(test)]
mod test {
    use super::{delaunay_apex, fill_hull_gaps, lowest_hull_edge};
    use crate::triangle::SweepTriangle;
    use crate::{FixedVertexHandle, Point2, DEFAULT_EPSILON};
    use approx::assert_relative_eq;

    fn handles(indices: [usize; 3]) -> [FixedVertexHandle; 3] {
        indices.map(FixedVertexHandle::new)
    }

    fn total_area(positions: &[Point2<f64>], triangles: &[SweepTriangle]) -> f64 {
        triangles
            .iter()
            .map(|triangle| {
                crate::math::triangle_area(
                    triangle
                        .vertices()
                        .map(|handle| positions[handle.index()]),
                )
            })
            .sum()
    }

    #[test]
    fn test_lowest_hull_edge() {
        let positions = [
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 3.0),
        ];
        let (from, to) = lowest_hull_edge(&positions).unwrap();
        assert_eq!(from.index(), 1);
        // (2, 0) is collinear with (4, 0) and closer
        assert_eq!(to.index(), 3);

        assert_eq!(lowest_hull_edge(&[Point2::new(1.0, 1.0); 3]), None);
        assert_eq!(lowest_hull_edge(&[]), None);
    }

    #[test]
    fn test_delaunay_apex() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 3.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, -1.0),
        ];
        let [from, to, _] = handles([0, 1, 2]);
        assert_eq!(
            delaunay_apex(&positions, from, to, DEFAULT_EPSILON),
            Some(FixedVertexHandle::new(3))
        );
        assert_eq!(
            delaunay_apex(&positions, to, from, DEFAULT_EPSILON),
            Some(FixedVertexHandle::new(4))
        );
        assert_eq!(
            delaunay_apex(&positions[..2], from, to, DEFAULT_EPSILON),
            None
        );
    }

    #[test]
    fn test_fill_from_scratch() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(50.0, 0.001),
        ];
        let mut triangles = Vec::new();
        assert_eq!(
            fill_hull_gaps(&positions, &mut triangles, DEFAULT_EPSILON),
            1
        );
        assert_relative_eq!(total_area(&positions, &triangles), 0.05, max_relative = 1.0e-9);
    }

    #[test]
    fn test_fill_missing_hull_face() {
        // A square split along the (0, 0) - (2, 2) diagonal, with the lower face missing
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.5),
        ];
        let mut triangles = vec![
            SweepTriangle::new(&positions, handles([0, 2, 4]), DEFAULT_EPSILON).unwrap(),
            SweepTriangle::new(&positions, handles([2, 3, 4]), DEFAULT_EPSILON).unwrap(),
            SweepTriangle::new(&positions, handles([3, 0, 4]), DEFAULT_EPSILON).unwrap(),
        ];
        assert_eq!(
            fill_hull_gaps(&positions, &mut triangles, DEFAULT_EPSILON),
            1
        );
        let mut added = triangles[3].vertices().map(|handle| handle.index());
        added.sort_unstable();
        assert_eq!(added, [0, 1, 2]);
        assert_relative_eq!(total_area(&positions, &triangles), 4.0);
    }

    #[test]
    fn test_complete_triangulation_is_unchanged() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let mut triangles =
            vec![SweepTriangle::new(&positions, handles([0, 2, 1]), DEFAULT_EPSILON).unwrap()];
        assert_eq!(
            fill_hull_gaps(&positions, &mut triangles, DEFAULT_EPSILON),
            0
        );
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_collinear_positions_stay_empty() {
        let positions: Vec<_> = (0..5).map(|x| Point2::new(x as f64, 2.0)).collect();
        let mut triangles = Vec::new();
        assert_eq!(
            fill_hull_gaps(&positions, &mut triangles, DEFAULT_EPSILON),
            0
        );
        assert!(triangles.is_empty());
    }
}
