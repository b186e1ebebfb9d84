use hashbrown::HashMap;

use crate::FixedVertexHandle;

/// An edge of a triangle removed during one sweep round.
///
/// Edges are directed as they appear in their triangle but compare as unordered pairs when
/// being deduplicated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Edge {
    pub from: FixedVertexHandle,
    pub to: FixedVertexHandle,
}

impl Edge {
    pub fn new(from: FixedVertexHandle, to: FixedVertexHandle) -> Self {
        Self { from, to }
    }

    fn undirected(&self) -> (FixedVertexHandle, FixedVertexHandle) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// Reduces the edges of all triangles removed in one round to the boundary of their union.
///
/// An edge shared by two removed triangles is listed twice (once per orientation) and lies
/// inside the removed region. Every copy of such an edge is dropped. The counting map is kept
/// between rounds to reuse its allocation.
#[derive(Default, Debug)]
pub(crate) struct EdgeDeduplicator {
    occurrences: HashMap<(FixedVertexHandle, FixedVertexHandle), u32>,
}

impl EdgeDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retains only edges that occur exactly once, keeping their relative order.
    pub fn retain_boundary(&mut self, edges: &mut Vec<Edge>) {
        self.occurrences.clear();
        for edge in edges.iter() {
            *self.occurrences.entry(edge.undirected()).or_insert(0) += 1;
        }
        let occurrences = &self.occurrences;
        edges.retain(|edge| occurrences.get(&edge.undirected()) == Some(&1));
    }
}
