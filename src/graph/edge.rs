use serde::{Deserialize, Serialize};

use super::*;

pub trait EdgeOps {
    fn is_loop(&self) -> bool;
    fn reverse(&self) -> Self;
}

/// One end of a directed edge: the other endpoint and the edge weight.
/// Stored against the source vertex in forward graphs and against the
/// target vertex in reverse graphs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct HalfEdge<V, W> {
    pub vertex: V,
    pub weight: W,
}

/// Directed edge `(from, to, weight)`
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct WeightedEdge<V, W>(pub V, pub V, pub W);

impl<V, W> HalfEdge<V, W> {
    pub fn new(vertex: V, weight: W) -> Self {
        Self { vertex, weight }
    }
}

impl<V: Vertex, W: Weight> WeightedEdge<V, W> {
    pub fn from_vertex(&self) -> &V {
        &self.0
    }

    pub fn to_vertex(&self) -> &V {
        &self.1
    }

    pub fn weight(&self) -> W {
        self.2
    }

    /// Splits the edge into its source and the half-edge stored at the source
    pub fn into_outgoing(self) -> (V, HalfEdge<V, W>) {
        (self.0, HalfEdge::new(self.1, self.2))
    }

    /// Splits the edge into its target and the half-edge stored at the target
    pub fn into_incoming(self) -> (V, HalfEdge<V, W>) {
        (self.1, HalfEdge::new(self.0, self.2))
    }
}

impl<V: Vertex, W: Weight> EdgeOps for WeightedEdge<V, W> {
    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        WeightedEdge(self.1.clone(), self.0.clone(), self.2)
    }
}

impl<V, W> From<(V, W)> for HalfEdge<V, W> {
    fn from(value: (V, W)) -> Self {
        HalfEdge::new(value.0, value.1)
    }
}

impl<V: Clone, W: Copy> From<&(V, W)> for HalfEdge<V, W> {
    fn from(value: &(V, W)) -> Self {
        HalfEdge::new(value.0.clone(), value.1)
    }
}

impl<V, W> From<(V, V, W)> for WeightedEdge<V, W> {
    fn from(value: (V, V, W)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl<V: Clone, W: Copy> From<&(V, V, W)> for WeightedEdge<V, W> {
    fn from(value: &(V, V, W)) -> Self {
        WeightedEdge(value.0.clone(), value.1.clone(), value.2)
    }
}

impl<V: Clone, W: Copy> From<&WeightedEdge<V, W>> for WeightedEdge<V, W> {
    fn from(value: &WeightedEdge<V, W>) -> Self {
        WeightedEdge(value.0.clone(), value.1.clone(), value.2)
    }
}
