use std::{collections::hash_map, iter::Cloned};

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::*;
use crate::errors::{GraphError, InvariantCheck};

type Adjacency<V, W> = FxHashMap<V, Vec<HalfEdge<V, W>>>;

/// Directed weighted graph storing the outgoing half-edges of every vertex.
///
/// A vertex with an empty list is known to the graph but has no outgoing edges;
/// this is distinct from a vertex that is absent altogether.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "V: Vertex + Serialize, W: Weight + Serialize",
        deserialize = "V: Vertex + Deserialize<'de>, W: Weight + Deserialize<'de>"
    )
)]
pub struct AdjListGraph<V, W> {
    adj: Adjacency<V, W>,
}

/// Directed weighted graph storing the incoming half-edges of every vertex.
///
/// Obtained by reversing an [`AdjListGraph`], this is the orientation consumed by
/// the Held-Karp solver.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "V: Vertex + Serialize, W: Weight + Serialize",
        deserialize = "V: Vertex + Deserialize<'de>, W: Weight + Deserialize<'de>"
    )
)]
pub struct ReverseAdjListGraph<V, W> {
    adj: Adjacency<V, W>,
}

/// Flips every half-edge to the other endpoint. All vertices of `adj` are kept,
/// including those without edges in the new orientation.
fn flip<V: Vertex, W: Weight>(adj: &Adjacency<V, W>) -> Adjacency<V, W> {
    let mut flipped: Adjacency<V, W> =
        FxHashMap::with_capacity_and_hasher(adj.len(), Default::default());

    for v in adj.keys() {
        flipped.entry(v.clone()).or_default();
    }

    for (v, edges) in adj {
        for e in edges {
            flipped
                .entry(e.vertex.clone())
                .or_default()
                .push(HalfEdge::new(v.clone(), e.weight));
        }
    }

    flipped
}

fn check_endpoints<V: Vertex, W: Weight>(
    adj: &Adjacency<V, W>,
    edge_at: impl Fn(&V, &V) -> (String, String),
) -> Result<(), GraphError> {
    for (v, edges) in adj {
        if let Some(e) = edges.iter().find(|e| !adj.contains_key(&e.vertex)) {
            let (from, to) = edge_at(v, &e.vertex);
            return Err(GraphError::DanglingEdge { from, to });
        }
    }
    Ok(())
}

macro_rules! impl_adjacency_graph {
    ($graph : ident, $store : ident, $query_trait : ident, $query : ident) => {
        impl<V: Vertex, W: Weight> Default for $graph<V, W> {
            fn default() -> Self {
                Self {
                    adj: Default::default(),
                }
            }
        }

        impl<V: Vertex, W: Weight> $graph<V, W> {
            pub fn new() -> Self {
                Default::default()
            }

            /// Builds a graph from a list of directed edges. Both endpoints of
            /// every edge become vertices of the graph.
            pub fn from_edges(
                edges: impl IntoIterator<Item = impl Into<WeightedEdge<V, W>>>,
            ) -> Self {
                let mut graph = Self::new();
                graph.add_edges(edges);
                graph
            }

            /// Builds a graph from half-edge lists grouped by the vertex they are stored at
            /// (the source in forward orientation, the target in reverse orientation).
            /// Vertices given with an empty list are kept as edge-less vertices.
            pub fn from_adjacency<E: Into<HalfEdge<V, W>>>(
                groups: impl IntoIterator<Item = (V, impl IntoIterator<Item = E>)>,
            ) -> Self {
                let mut graph = Self::new();
                for (v, edges) in groups {
                    graph.add_vertex(v.clone());
                    for e in edges {
                        let e = e.into();
                        graph.add_vertex(e.vertex.clone());
                        graph.adj.entry(v.clone()).or_default().push(e);
                    }
                }
                graph
            }

            pub fn contains_vertex(&self, v: &V) -> bool {
                self.adj.contains_key(v)
            }

            pub fn number_of_edges(&self) -> NumEdges {
                self.adj.values().map(|edges| edges.len() as NumEdges).sum()
            }
        }

        impl<V: Vertex, W: Weight> GraphEdgeEditing<V, W> for $graph<V, W> {
            fn add_vertex(&mut self, v: V) -> bool {
                match self.adj.entry(v) {
                    hash_map::Entry::Occupied(_) => false,
                    hash_map::Entry::Vacant(entry) => {
                        entry.insert(Vec::new());
                        true
                    }
                }
            }

            fn add_edge(&mut self, from: V, to: V, weight: W) {
                let (at, half_edge) = WeightedEdge(from, to, weight).$store();
                self.add_vertex(half_edge.vertex.clone());
                self.adj.entry(at).or_default().push(half_edge);
            }
        }

        impl<V: Vertex, W: Weight> GraphVertices<V> for $graph<V, W> {
            type VertexIter<'a>
                = Cloned<hash_map::Keys<'a, V, Vec<HalfEdge<V, W>>>>
            where
                Self: 'a;

            fn vertices(&self) -> Self::VertexIter<'_> {
                self.adj.keys().cloned()
            }

            fn number_of_vertices(&self) -> usize {
                self.adj.len()
            }

            fn is_empty(&self) -> bool {
                self.adj.is_empty()
            }
        }

        impl<V: Vertex, W: Weight> $query_trait<V, W> for $graph<V, W> {
            fn $query(&self, v: &V) -> &[HalfEdge<V, W>] {
                self.adj.get(v).map(Vec::as_slice).unwrap_or_default()
            }
        }
    };
}

impl_adjacency_graph!(AdjListGraph, into_outgoing, OutgoingEdges, outgoing_edges);
impl_adjacency_graph!(ReverseAdjListGraph, into_incoming, IncomingEdges, incoming_edges);

impl<V: Vertex, W: Weight> AdjListGraph<V, W> {
    /// Returns all edges as `(from, to, weight)` in no particular order
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge<V, W>> + '_ {
        self.adj.iter().flat_map(|(from, edges)| {
            edges
                .iter()
                .map(move |e| WeightedEdge(from.clone(), e.vertex.clone(), e.weight))
        })
    }

    /// Returns the same graph indexed by incoming edges
    pub fn reversed(&self) -> ReverseAdjListGraph<V, W> {
        ReverseAdjListGraph {
            adj: flip(&self.adj),
        }
    }
}

impl<V: Vertex, W: Weight> ReverseAdjListGraph<V, W> {
    /// Returns all edges as `(from, to, weight)` in no particular order
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge<V, W>> + '_ {
        self.adj.iter().flat_map(|(to, edges)| {
            edges
                .iter()
                .map(move |e| WeightedEdge(e.vertex.clone(), to.clone(), e.weight))
        })
    }

    /// Returns the same graph indexed by outgoing edges
    pub fn forward(&self) -> AdjListGraph<V, W> {
        AdjListGraph {
            adj: flip(&self.adj),
        }
    }
}

impl<V: Vertex, W: Weight> From<&AdjListGraph<V, W>> for ReverseAdjListGraph<V, W> {
    fn from(graph: &AdjListGraph<V, W>) -> Self {
        graph.reversed()
    }
}

impl<V: Vertex, W: Weight> From<&ReverseAdjListGraph<V, W>> for AdjListGraph<V, W> {
    fn from(graph: &ReverseAdjListGraph<V, W>) -> Self {
        graph.forward()
    }
}

impl<V: Vertex, W: Weight> InvariantCheck<GraphError> for AdjListGraph<V, W> {
    fn is_correct(&self) -> Result<(), GraphError> {
        check_endpoints(&self.adj, |at, other| {
            (format!("{at:?}"), format!("{other:?}"))
        })
    }
}

impl<V: Vertex, W: Weight> InvariantCheck<GraphError> for ReverseAdjListGraph<V, W> {
    fn is_correct(&self) -> Result<(), GraphError> {
        check_endpoints(&self.adj, |at, other| {
            (format!("{other:?}"), format!("{at:?}"))
        })
    }
}
