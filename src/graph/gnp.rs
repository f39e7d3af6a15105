use rand::{Rng, distributions::Distribution};
use rand_distr::Geometric;

use crate::graph::*;

pub trait GnpGenerator<W: Weight>: Sized {
    /// Generates a directed Gilbert graph on the vertices `0..n`.
    /// Each of the `n(n-1)` directed edges without self-loops exists independently
    /// with probability `p`; weights are drawn i.i.d. from `weights`.
    fn random_gnp<R: Rng>(
        rng: &mut R,
        n: NumVertices,
        p: f64,
        weights: &impl Distribution<W>,
    ) -> Self;

    /// Complete directed graph on `0..n` with random weights
    fn random_complete<R: Rng>(
        rng: &mut R,
        n: NumVertices,
        weights: &impl Distribution<W>,
    ) -> Self {
        Self::random_gnp(rng, n, 1.0, weights)
    }
}

impl<G, W> GnpGenerator<W> for G
where
    G: Default + GraphEdgeEditing<NumVertices, W>,
    W: Weight,
{
    fn random_gnp<R: Rng>(
        rng: &mut R,
        n: NumVertices,
        p: f64,
        weights: &impl Distribution<W>,
    ) -> Self {
        let mut result = Self::default();
        for u in 0..n {
            result.add_vertex(u);
        }

        // indirection via vector as we need a &mut for rng and the weights also need rng
        let pairs: Vec<_> = BernoulliSamplingRange::new(rng, 0, (n as i64) * (n as i64), p)
            .filter_map(|x| {
                let u = (x / n as i64) as NumVertices;
                let v = (x % n as i64) as NumVertices;
                (u != v).then_some((u, v))
            })
            .collect();

        for (u, v) in pairs {
            let weight = weights.sample(rng);
            result.add_edge(u, v, weight);
        }

        result
    }
}

/// Provides an iterator similarly to Range, but
/// includes each element i.i.d. with probability of p
pub struct BernoulliSamplingRange<'a, R: Rng> {
    current: i64,
    end: i64,
    distr: Geometric,
    rng: &'a mut R,
}

impl<'a, R: Rng> BernoulliSamplingRange<'a, R> {
    /// # Panics
    /// Panics if `prob` is not within `[0, 1]`
    pub fn new(rng: &'a mut R, begin: i64, end: i64, prob: f64) -> Self {
        assert!(begin <= end);
        assert!((0.0..=1.0).contains(&prob), "probability {prob} not in [0, 1]");
        Self {
            rng,
            current: begin - 1,
            end,
            distr: Geometric::new(prob).expect("probability was checked above"),
        }
    }

    fn try_advance(&mut self) {
        if self.current >= self.end {
            return;
        }

        let skip = self.rng.sample(self.distr);
        self.current = i64::try_from(skip)
            .ok()
            .and_then(|skip| skip.checked_add(1))
            .and_then(|step| self.current.checked_add(step))
            .map_or(self.end, |next| next.min(self.end));
    }
}

impl<R: Rng> Iterator for BernoulliSamplingRange<'_, R> {
    type Item = i64;
    fn next(&mut self) -> Option<Self::Item> {
        self.try_advance();
        (self.current < self.end).then_some(self.current)
    }
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng, distributions::Uniform};
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_bernoulli_range() {
        let rng = &mut Pcg64::seed_from_u64(42);

        // empty range
        assert_eq!(BernoulliSamplingRange::new(rng, 0, 0, 1.0).count(), 0);

        // p=1
        assert_eq!(BernoulliSamplingRange::new(rng, 0, 10, 1.0).count(), 10);

        // p=0
        assert_eq!(BernoulliSamplingRange::new(rng, 0, 100, 0.0).count(), 0);

        // test that we see each element ~p*n times
        let min = 3;
        let max = 100;
        let mut counts = vec![0; max as usize];
        for _ in 0..1000 {
            for x in BernoulliSamplingRange::new(rng, min, max, 0.25) {
                assert!((min..max).contains(&x));
                counts[x as usize] += 1;
            }
        }

        assert!(counts.iter().enumerate().all(|(i, &c)| {
            if i < min as usize {
                c == 0
            } else {
                (150..350).contains(&c)
            }
        }));
    }

    #[test]
    fn complete_graph() {
        let rng = &mut Pcg64::seed_from_u64(7);
        let weights = Uniform::new_inclusive(1u32, 9);

        for n in 0..12 {
            let graph = AdjListGraph::<NumVertices, u32>::random_complete(rng, n, &weights);
            assert_eq!(graph.number_of_vertices(), n as usize);
            assert_eq!(graph.number_of_edges(), (n * n.saturating_sub(1)) as NumEdges);
            for u in 0..n {
                assert!(graph.outgoing_edges(&u).iter().all(|e| e.vertex != u));
                assert!(
                    graph
                        .outgoing_edges(&u)
                        .iter()
                        .all(|e| (1..=9).contains(&e.weight))
                );
            }
        }
    }

    #[test]
    fn test_gnp() {
        let rng = &mut Pcg64::seed_from_u64(1234);
        let weights = Uniform::new(0.0f64, 1.0);

        // generate multiple graphs of various densities and verify that the
        // expected number of edges is close to the expected value
        for p in [0.01, 0.1, 0.5] {
            let repeats = 100;
            let n = 60;

            let mean_edges = (0..repeats)
                .map(|_| {
                    let graph =
                        ReverseAdjListGraph::<NumVertices, f64>::random_gnp(rng, n, p, &weights);
                    graph.number_of_edges() as f64
                })
                .sum::<f64>()
                / repeats as f64;

            let expected = p * (n as f64) * ((n - 1) as f64);

            assert!((0.75 * expected..1.25 * expected).contains(&mean_edges));
        }
    }
}
