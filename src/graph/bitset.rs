use std::fmt::{self, Debug, Formatter};

use itertools::Itertools;

/// A subset of `{0, ..., 31}` packed into a single `u32`.
///
/// The type has value semantics: [`Bitset::set`] and [`Bitset::unset`] return
/// a new bitset and leave `self` untouched. It is used as the subset key of the
/// Held-Karp memo table, so [`Bitset::full`] and [`Bitset::arrangement_count`]
/// describe the universe of the first `n` vertex indices.
///
/// # Examples
///
/// ```
/// use heldkarp::graph::Bitset;
///
/// let bs = Bitset::default().set(3).set(5);
/// assert!(bs.is_set(3));
/// assert!(!bs.unset(3).is_set(3));
/// assert_eq!(bs.cardinality(), 2);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bitset(u32);

impl Debug for Bitset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Bitset {{{}}}", self.iter_set_bits().join(", "))
    }
}

#[inline]
fn assert_in_range(idx: usize) {
    assert!(
        idx < Bitset::NUM_BITS,
        "Bitset: index {idx} out of range 0..{}",
        Bitset::NUM_BITS
    );
}

impl Bitset {
    pub const NUM_BITS: usize = u32::BITS as usize;

    /// Returns a copy with bit `idx` set.
    ///
    /// # Panics
    /// Panics if `idx >= Bitset::NUM_BITS`
    #[inline]
    pub fn set(self, idx: usize) -> Self {
        assert_in_range(idx);
        Self(self.0 | (1 << idx))
    }

    /// Returns a copy with bit `idx` cleared.
    ///
    /// # Panics
    /// Panics if `idx >= Bitset::NUM_BITS`
    #[inline]
    pub fn unset(self, idx: usize) -> Self {
        assert_in_range(idx);
        Self(self.0 & !(1 << idx))
    }

    /// # Panics
    /// Panics if `idx >= Bitset::NUM_BITS`
    #[inline]
    pub fn is_set(self, idx: usize) -> bool {
        assert_in_range(idx);
        self.0 & (1 << idx) != 0
    }

    #[inline]
    pub fn is_any_set(self) -> bool {
        self.0 != 0
    }

    /// Returns the set `{0, ..., n-1}`.
    ///
    /// # Panics
    /// Panics if `n >= Bitset::NUM_BITS`
    pub fn full(n: usize) -> Self {
        assert_in_range(n);
        Self((1 << n) - 1)
    }

    /// Number of distinct subsets of an `n` element universe, i.e. `2^n`.
    ///
    /// # Panics
    /// Panics if `n >= Bitset::NUM_BITS`
    pub fn arrangement_count(n: usize) -> usize {
        assert_in_range(n);
        1usize << n
    }

    #[inline]
    pub fn cardinality(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Position of this subset among all `2^n` subsets; used to address memo rows
    #[inline]
    pub fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over the set bits in increasing order
    pub fn iter_set_bits(self) -> impl Iterator<Item = usize> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let idx = rest.trailing_zeros() as usize;
            rest &= rest - 1;
            Some(idx)
        })
    }
}
