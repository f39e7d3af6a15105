pub mod held_karp;
pub mod naive;

pub use held_karp::*;
pub use naive::*;

use std::rc::Rc;

use fxhash::FxHashMap;

use crate::{errors::TspError, graph::*};

/// Largest instance the exact solvers accept; the subset of visited vertices
/// has to fit into a [`Bitset`] together with its full set.
pub const MAX_INPUT_VERTICES: usize = 31;

/// Total weight of a tour and its vertex sequence, starting and ending at the start vertex
pub type Tour<V, W> = (W, Vec<V>);

/// Edge directed into some vertex, with its source translated to a dense index
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct IncomingEdge<W> {
    pub from: usize,
    pub weight: W,
}

/// Dense indexing `0..n` of the vertices of a graph, built once per solver call
/// in vertex enumeration order.
pub(crate) struct VertexIndex<'a, V, W, G> {
    graph: &'a G,
    vertices: Vec<V>,
    index_of: FxHashMap<V, usize>,
    incoming: Vec<Option<Rc<[IncomingEdge<W>]>>>,
}

pub(crate) enum Preprocessed<'a, V, W, G> {
    /// Instances with less than two vertices need no search
    Trivial(Tour<V, W>),
    Indexed {
        index: VertexIndex<'a, V, W, G>,
        start: usize,
    },
}

/// Checks the preconditions shared by all exact solvers, in this order:
/// empty and single vertex instances, vertex capacity, duplicate vertices, unknown start.
pub(crate) fn preprocess<'a, V, W, G>(
    graph: &'a G,
    start: &V,
) -> Result<Preprocessed<'a, V, W, G>, TspError>
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    let vertices: Vec<V> = graph.vertices().collect();

    match vertices.len() {
        0 => return Ok(Preprocessed::Trivial((W::zero(), Vec::new()))),
        1 => return Ok(Preprocessed::Trivial((W::zero(), vertices))),
        n if n > MAX_INPUT_VERTICES => {
            return Err(TspError::CapacityExceeded {
                found: n,
                max: MAX_INPUT_VERTICES,
            });
        }
        _ => {}
    }

    let mut index_of =
        FxHashMap::with_capacity_and_hasher(vertices.len(), Default::default());
    for (i, v) in vertices.iter().enumerate() {
        if index_of.insert(v.clone(), i).is_some() {
            return Err(TspError::InvalidGraph(format!(
                "vertex {v:?} is enumerated more than once"
            )));
        }
    }

    let start = *index_of
        .get(start)
        .ok_or_else(|| TspError::UnknownVertex(format!("{start:?}")))?;

    let incoming = vec![None; vertices.len()];
    Ok(Preprocessed::Indexed {
        index: VertexIndex {
            graph,
            vertices,
            index_of,
            incoming,
        },
        start,
    })
}

impl<V, W, G> VertexIndex<'_, V, W, G>
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, idx: usize) -> &V {
        &self.vertices[idx]
    }

    /// Translates indices back into the caller's vertices
    pub fn vertices_of(&self, indices: impl IntoIterator<Item = usize>) -> Vec<V> {
        indices.into_iter().map(|i| self.vertex(i).clone()).collect()
    }

    /// Returns the edges directed into vertex `to`. The graph is queried at most once
    /// per vertex; an edge whose source is not an enumerated vertex is reported
    /// the first time the edges of `to` are requested.
    pub fn incoming_edges(&mut self, to: usize) -> Result<Rc<[IncomingEdge<W>]>, TspError> {
        if let Some(edges) = &self.incoming[to] {
            return Ok(edges.clone());
        }

        let target = &self.vertices[to];
        let edges = self
            .graph
            .incoming_edges(target)
            .iter()
            .map(|e| match self.index_of.get(&e.vertex) {
                Some(&from) => Ok(IncomingEdge {
                    from,
                    weight: e.weight,
                }),
                None => Err(TspError::InvalidGraph(format!(
                    "unknown vertex {:?} returned as source of an edge into {target:?}",
                    e.vertex
                ))),
            })
            .collect::<Result<Rc<[_]>, _>>()?;

        self.incoming[to] = Some(edges.clone());
        Ok(edges)
    }
}
