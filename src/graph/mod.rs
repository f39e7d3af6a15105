pub mod adj_list;
pub mod bitset;
pub mod edge;
pub mod gnp;

pub type NumVertices = u32;
pub type NumEdges = u64;

use std::{fmt::Debug, hash::Hash, ops::Add};

use num::Zero;

pub use adj_list::*;
pub use bitset::*;
pub use edge::*;
pub use gnp::*;

/// Opaque vertex identifier. The solvers only ever compare and hash vertices,
/// `Debug` is required to report offending vertices in errors.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<V> Vertex for V where V: Clone + Eq + Hash + Debug {}

/// Edge and path weight. `W::zero()` is the cost of the empty path.
pub trait Weight: Copy + PartialOrd + Zero + Add<Output = Self> + Debug {}

impl<W> Weight for W where W: Copy + PartialOrd + Zero + Add<Output = W> + Debug {}

/// Provides the vertex set of a graph
pub trait GraphVertices<V: Vertex> {
    type VertexIter<'a>: Iterator<Item = V>
    where
        Self: 'a;

    /// Returns an iterator over V. A well-formed graph yields each vertex exactly once
    fn vertices(&self) -> Self::VertexIter<'_>;

    /// Returns the number of vertices yielded by `vertices()`
    fn number_of_vertices(&self) -> usize {
        self.vertices().count()
    }

    /// Returns true if the graph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.vertices().next().is_none()
    }
}

/// Graphs that can be queried for the edges directed into a vertex
pub trait IncomingEdges<V: Vertex, W: Weight>: GraphVertices<V> {
    /// Returns the half-edges (source, weight) of all edges directed into `to`.
    /// Unknown vertices have no incoming edges.
    fn incoming_edges(&self, to: &V) -> &[HalfEdge<V, W>];

    /// Returns the number of edges directed into `to`
    fn in_degree_of(&self, to: &V) -> usize {
        self.incoming_edges(to).len()
    }
}

/// Graphs that can be queried for the edges leaving a vertex
pub trait OutgoingEdges<V: Vertex, W: Weight>: GraphVertices<V> {
    /// Returns the half-edges (target, weight) of all edges leaving `from`.
    /// Unknown vertices have no outgoing edges.
    fn outgoing_edges(&self, from: &V) -> &[HalfEdge<V, W>];

    /// Returns the number of edges leaving `from`
    fn out_degree_of(&self, from: &V) -> usize {
        self.outgoing_edges(from).len()
    }
}

/// Provides functions to insert vertices and edges
pub trait GraphEdgeEditing<V: Vertex, W: Weight>: GraphVertices<V> {
    /// Adds an edge-less vertex.
    /// Returns *true* exactly if the vertex was not present previously
    fn add_vertex(&mut self, v: V) -> bool;

    /// Adds the directed edge *(from, to)* to the graph, i.e. the edge FROM `from` TO `to`.
    /// Both endpoints become vertices of the graph; parallel edges are kept.
    fn add_edge(&mut self, from: V, to: V, weight: W);

    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<WeightedEdge<V, W>>>) {
        for WeightedEdge(from, to, weight) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(from, to, weight);
        }
    }
}
