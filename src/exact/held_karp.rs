//! Exact TSP via the Held-Karp subset dynamic program.
//!
//! The program runs backwards over incoming edges: `cost(S, v)` is the cheapest
//! way to arrive at `v` such that the vertices of `S` other than `v` are visited
//! before, ending the recursion at `cost({}, start) = 0`. The tour weight is
//! `cost(FULL, start)`; a second pass over the memo table recovers the tour.
use log::{debug, trace};

use super::*;

/// Rule for choosing among equally cheap predecessors during path reconstruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// The first incoming edge attaining the minimum, in the order the graph returns them
    #[default]
    FirstEdge,
    /// The predecessor that comes first in vertex enumeration order
    LowestIndex,
}

/// Computes a minimum weight Hamiltonian cycle through `start` on graphs with
/// at most [`MAX_INPUT_VERTICES`] vertices.
///
/// Returns the weight and the vertex sequence of the cycle, which begins and ends
/// with `start`. Graphs with no vertex yield `(0, [])`, graphs with a single vertex
/// `X` yield `(0, [X])`.
///
/// # Examples
///
/// ```
/// use heldkarp::prelude::*;
///
/// let graph = AdjListGraph::from_edges([("a", "b", 1), ("b", "c", 2), ("c", "a", 3)]);
/// let (weight, tour) = solve(&graph.reversed(), &"a").unwrap();
///
/// assert_eq!(weight, 6);
/// assert_eq!(tour, ["a", "b", "c", "a"]);
/// ```
pub fn solve<V, W, G>(graph: &G, start: &V) -> Result<Tour<V, W>, TspError>
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    solve_with_tie_break(graph, start, TieBreak::default())
}

/// As [`solve`] but with an explicit rule to pick among several optimal tours
pub fn solve_with_tie_break<V, W, G>(
    graph: &G,
    start: &V,
    tie_break: TieBreak,
) -> Result<Tour<V, W>, TspError>
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    let (index, start) = match preprocess(graph, start)? {
        Preprocessed::Trivial(tour) => return Ok(tour),
        Preprocessed::Indexed { index, start } => (index, start),
    };

    debug!(
        "Held-Karp on {} vertices starting at {:?}",
        index.len(),
        index.vertex(start)
    );

    let mut solver = HeldKarp::new(index, start);
    let full = Bitset::full(solver.index.len());

    let result = solver.cost(full, start)?;
    solver.memo.log_statistics();

    let Some(weight) = result else {
        debug!("Held-Karp found no hamiltonian cycle");
        return Err(TspError::NoSolution);
    };

    let path = solver.backtrack(full, tie_break)?;
    debug!("Held-Karp found tour of weight {weight:?}");

    Ok((weight, solver.index.vertices_of(path)))
}

/// Outcome of a single evaluated DP state
#[derive(Clone, Copy, Debug, PartialEq)]
enum Cost<W> {
    Unreachable,
    Reached(W),
}

impl<W: Weight> Cost<W> {
    fn weight(self) -> Option<W> {
        match self {
            Cost::Unreachable => None,
            Cost::Reached(w) => Some(w),
        }
    }
}

/// Memo table indexed by (subset, last vertex). The row of a subset is only
/// allocated once a state of that subset is evaluated.
struct MemoTable<W> {
    rows: Vec<Option<Box<[Option<Cost<W>>]>>>,
    number_of_vertices: usize,
    number_of_rows: usize,
    number_of_states: usize,
    number_of_accesses: u64,
    number_of_misses: u64,
}

impl<W: Weight> MemoTable<W> {
    fn new(number_of_vertices: usize) -> Self {
        Self {
            rows: vec![None; Bitset::arrangement_count(number_of_vertices)],
            number_of_vertices,
            number_of_rows: 0,
            number_of_states: 0,
            number_of_accesses: 0,
            number_of_misses: 0,
        }
    }

    /// Returns the memoized cost of a state and updates the hit statistics
    fn lookup(&mut self, visited: Bitset, last: usize) -> Option<Cost<W>> {
        self.number_of_accesses += 1;
        let cost = self.peek(visited, last);
        if cost.is_none() {
            self.number_of_misses += 1;
        }
        cost
    }

    fn peek(&self, visited: Bitset, last: usize) -> Option<Cost<W>> {
        self.rows[visited.as_index()]
            .as_ref()
            .and_then(|row| row[last])
    }

    fn insert(&mut self, visited: Bitset, last: usize, cost: Cost<W>) {
        let row = self.rows[visited.as_index()].get_or_insert_with(|| {
            self.number_of_rows += 1;
            vec![None; self.number_of_vertices].into_boxed_slice()
        });

        debug_assert!(row[last].is_none(), "state is evaluated only once");
        row[last] = Some(cost);
        self.number_of_states += 1;
    }

    fn log_statistics(&self) {
        debug!(
            "Held-Karp memo: rows: {} states: {} hits: {} misses: {}",
            self.number_of_rows,
            self.number_of_states,
            self.number_of_accesses - self.number_of_misses,
            self.number_of_misses
        );
    }
}

struct HeldKarp<'a, V, W, G> {
    index: VertexIndex<'a, V, W, G>,
    start: usize,
    memo: MemoTable<W>,
}

impl<'a, V, W, G> HeldKarp<'a, V, W, G>
where
    V: Vertex,
    W: Weight,
    G: IncomingEdges<V, W>,
{
    fn new(index: VertexIndex<'a, V, W, G>, start: usize) -> Self {
        let memo = MemoTable::new(index.len());
        Self { index, start, memo }
    }

    /// The edge `from -> last` may precede state `(visited, last)` if `from` still
    /// has to be visited, or if it closes the cycle at the start vertex.
    /// Self-loops never take part in a Hamiltonian cycle.
    #[inline]
    fn is_eligible(&self, visited: Bitset, last: usize, from: usize) -> bool {
        from != last
            && (visited.is_set(from)
                || (!visited.unset(last).is_any_set() && from == self.start))
    }

    fn cost(&mut self, visited: Bitset, last: usize) -> Result<Option<W>, TspError> {
        if !visited.is_any_set() {
            assert_eq!(
                last, self.start,
                "Held-Karp: base case must be reached at the start vertex"
            );
            return Ok(Some(W::zero()));
        }

        if let Some(cost) = self.memo.lookup(visited, last) {
            return Ok(cost.weight());
        }

        let without_last = visited.unset(last);
        let mut best: Option<W> = None;

        let edges = self.index.incoming_edges(last)?;
        for edge in edges.iter() {
            if !self.is_eligible(visited, last, edge.from) {
                continue;
            }

            // dead branches are pruned silently
            let Some(prev) = self.cost(without_last, edge.from)? else {
                continue;
            };

            let weight = prev + edge.weight;
            if best.is_none_or(|b| weight < b) {
                best = Some(weight);
            }
        }

        trace!("cost({visited:?}, {last}) = {best:?}");

        self.memo
            .insert(visited, last, best.map_or(Cost::Unreachable, Cost::Reached));
        Ok(best)
    }

    /// Walks back from `(visited, start)` through the memo table, picking a cheapest
    /// predecessor at every state. Returns the tour as dense indices.
    ///
    /// # Panics
    /// Panics if the memo table is inconsistent with the incoming edges, which
    /// means the graph answered differently than during the forward pass.
    fn backtrack(
        &mut self,
        mut visited: Bitset,
        tie_break: TieBreak,
    ) -> Result<Vec<usize>, TspError> {
        let mut path = Vec::with_capacity(visited.cardinality() + 1);
        let mut last = self.start;

        while visited.is_any_set() {
            path.push(last);
            let without_last = visited.unset(last);
            let mut best: Option<(W, usize)> = None;

            let edges = self.index.incoming_edges(last)?;
            for edge in edges.iter() {
                if !self.is_eligible(visited, last, edge.from) {
                    continue;
                }

                let prev = if without_last.is_any_set() {
                    match self.memo.peek(without_last, edge.from) {
                        Some(Cost::Reached(w)) => w,
                        Some(Cost::Unreachable) => continue,
                        None => panic!(
                            "Held-Karp: invalid backtrack, state ({without_last:?}, {}) was never evaluated",
                            edge.from
                        ),
                    }
                } else {
                    W::zero()
                };

                let weight = prev + edge.weight;
                let improves = match best {
                    None => true,
                    Some((b, b_from)) => {
                        weight < b
                            || (tie_break == TieBreak::LowestIndex
                                && weight == b
                                && edge.from < b_from)
                    }
                };

                if improves {
                    best = Some((weight, edge.from));
                }
            }

            let Some((_, from)) = best else {
                panic!(
                    "Held-Karp: invalid backtrack, no predecessor of state ({visited:?}, {last})"
                );
            };

            visited = without_last;
            last = from;
        }

        assert_eq!(
            last, self.start,
            "Held-Karp: base case must be reached at the start vertex"
        );
        path.push(last);
        path.reverse();

        Ok(path)
    }
}
