use itertools::Itertools;
use log::debug;

use super::*;

/// Brute force over all `(n-1)!` vertex orders. Accepts the same graphs as
/// [`solve`] and reports the same errors, but is only practical for tiny
/// instances; it serves as a reference to check the dynamic program against.
pub fn naive_solver<V, W, G>(graph: &G, start: &V) -> Result<Tour<V, W>, TspError>
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    let (mut index, start) = match preprocess(graph, start)? {
        Preprocessed::Trivial(tour) => return Ok(tour),
        Preprocessed::Indexed { index, start } => (index, start),
    };
    let n = index.len();

    // cheapest edge between each ordered pair, self-loops are never used
    let mut cheapest: FxHashMap<(usize, usize), W> = FxHashMap::default();
    for to in 0..n {
        for edge in index.incoming_edges(to)?.iter() {
            if edge.from == to {
                continue;
            }
            cheapest
                .entry((edge.from, to))
                .and_modify(|w| {
                    if edge.weight < *w {
                        *w = edge.weight;
                    }
                })
                .or_insert(edge.weight);
        }
    }

    let mut best: Option<(W, Vec<usize>)> = None;
    let mut number_of_cycles = 0u64;

    for order in (0..n).filter(|&u| u != start).permutations(n - 1) {
        let cycle = std::iter::once(start)
            .chain(order)
            .chain(std::iter::once(start))
            .collect_vec();

        let weight = cycle
            .iter()
            .tuple_windows()
            .try_fold(W::zero(), |acc, (&u, &v)| {
                cheapest.get(&(u, v)).map(|&w| acc + w)
            });

        let Some(weight) = weight else {
            continue;
        };
        number_of_cycles += 1;

        if best.as_ref().is_none_or(|(b, _)| weight < *b) {
            best = Some((weight, cycle));
        }
    }

    debug!("Naive solver enumerated {number_of_cycles} hamiltonian cycles");

    let (weight, cycle) = best.ok_or(TspError::NoSolution)?;
    Ok((weight, index.vertices_of(cycle)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn simple_symmetric() {
        let graph = AdjListGraph::from_adjacency([
            ("A", [("B", 20), ("C", 42), ("D", 35)]),
            ("B", [("A", 20), ("C", 30), ("D", 34)]),
            ("C", [("A", 42), ("B", 30), ("D", 12)]),
            ("D", [("A", 35), ("B", 34), ("C", 12)]),
        ])
        .reversed();

        for start in ["A", "B", "C", "D"] {
            let (weight, tour) = naive_solver(&graph, &start).unwrap();
            assert_eq!(weight, 97);
            assert_valid_tour(&graph, &start, weight, &tour);
        }
    }

    #[test]
    fn preconditions() {
        let empty = ReverseAdjListGraph::<u32, u32>::new();
        assert_eq!(naive_solver(&empty, &0), Ok((0, vec![])));

        let two = ReverseAdjListGraph::from_edges([(0u32, 1u32, 4u32), (1, 0, 5)]);
        assert_eq!(naive_solver(&two, &1), Ok((9, vec![1, 0, 1])));
        assert!(matches!(
            naive_solver(&two, &2),
            Err(TspError::UnknownVertex(_))
        ));

        let dag = ReverseAdjListGraph::from_edges([(0u32, 1u32, 4u32), (1, 2, 5), (0, 2, 1)]);
        assert_eq!(naive_solver(&dag, &0), Err(TspError::NoSolution));
    }
}
