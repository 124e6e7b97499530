//! Dense vertex indexing.
//!
//! Algorithms work on contiguous arrays, but vertex ids may have holes after
//! removal. [`VertexIndex`] is the bijection between alive vertex ids and
//! `0..n` array slots.

use crate::graph::{Graph, VertexId};

pub struct VertexIndex {
    /// `idx_of[v]` = dense slot of vertex `v`, `usize::MAX` for holes.
    idx_of: Vec<usize>,
    verts: Vec<VertexId>,
}

impl VertexIndex {
    pub fn build(g: &Graph) -> Self {
        let mut idx_of = vec![usize::MAX; g.vertex_bound()];
        let mut verts = Vec::with_capacity(g.num_vertices());
        for v in g.vertices() {
            idx_of[v as usize] = verts.len();
            verts.push(v);
        }
        Self { idx_of, verts }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Dense slot of a vertex. Panics on a hole; callers iterate alive
    /// vertices only.
    #[inline]
    pub fn idx(&self, v: VertexId) -> usize {
        self.idx_of[v as usize]
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> VertexId {
        self.verts[i]
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.verts
    }
}
