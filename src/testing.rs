use std::{iter::Cloned, slice};

use itertools::Itertools;
use log::LevelFilter;
use rand::{Rng, distributions::Distribution};

use super::graph::*;

pub fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Debug)
        .try_init();
}

/// Graph answering with exactly the vertex enumeration and incoming edge lists it
/// was given, in the given order, even if they are inconsistent
pub struct ScriptedGraph<V, W> {
    pub vertices: Vec<V>,
    pub incoming: Vec<(V, Vec<HalfEdge<V, W>>)>,
}

impl<V: Vertex, W: Weight> GraphVertices<V> for ScriptedGraph<V, W> {
    type VertexIter<'a>
        = Cloned<slice::Iter<'a, V>>
    where
        Self: 'a;

    fn vertices(&self) -> Self::VertexIter<'_> {
        self.vertices.iter().cloned()
    }
}

impl<V: Vertex, W: Weight> IncomingEdges<V, W> for ScriptedGraph<V, W> {
    fn incoming_edges(&self, to: &V) -> &[HalfEdge<V, W>] {
        self.incoming
            .iter()
            .find(|(v, _)| v == to)
            .map(|(_, edges)| edges.as_slice())
            .unwrap_or_default()
    }
}

/// Asserts that `tour` is a hamiltonian cycle through `start` whose cheapest
/// realization in `graph` weighs `weight`
pub fn assert_valid_tour<V, W, G>(graph: &G, start: &V, weight: W, tour: &[V])
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    let n = graph.number_of_vertices();
    assert_eq!(tour.len(), n + 1, "{tour:?}");
    assert_eq!(tour.first(), Some(start), "{tour:?}");
    assert_eq!(tour.last(), Some(start), "{tour:?}");

    let counts = tour[1..].iter().counts();
    assert_eq!(counts.len(), n, "{tour:?}");
    assert!(counts.values().all(|&c| c == 1), "{tour:?}");
    assert!(graph.vertices().all(|v| counts.contains_key(&v)), "{tour:?}");

    let total = tour.iter().tuple_windows().fold(W::zero(), |acc, (u, v)| {
        let cheapest = graph
            .incoming_edges(v)
            .iter()
            .filter(|e| e.vertex == *u)
            .map(|e| e.weight)
            .reduce(|a, b| if b < a { b } else { a });
        match cheapest {
            Some(w) => acc + w,
            None => panic!("tour {tour:?} uses missing edge {u:?} -> {v:?}"),
        }
    });
    assert_eq!(total, weight, "{tour:?}");
}

/// Infinite stream of random instances on 2 to 7 vertices with densities
/// ranging from sparse to complete, each paired with a random start vertex
pub fn generate_random_instances<'a, R: Rng, W: Weight>(
    rng: &'a mut R,
    weights: &'a impl Distribution<W>,
) -> impl Iterator<Item = (ReverseAdjListGraph<NumVertices, W>, NumVertices)> + 'a {
    std::iter::repeat_with(move || {
        let n = rng.gen_range(2..8);
        let p = rng.gen_range(0.3..=1.0);
        let graph = ReverseAdjListGraph::random_gnp(&mut *rng, n, p, weights);
        let start = rng.gen_range(0..n);
        (graph, start)
    })
}
