// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! K-subsets enumeration in lexicographic order.
use std::iter::FusedIterator;

use super::{Card, Deck};

/// The largest k supported by [nck] and [Combinations].
const MAX_K: usize = 7;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u32; MAX_K + 1]; Deck::SIZE + 1] {
    let mut t = [[0u32; MAX_K + 1]; Deck::SIZE + 1];
    let mut n = 0;

    while n <= Deck::SIZE {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; MAX_K + 1]; Deck::SIZE + 1] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= Deck::SIZE, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= 7");
    NCKS[n][k] as usize
}

/// Returns the positions of the nth k-subset of `0..n` in lexicographic
/// order.
///
/// Panics if `nth >= nck(n, K)`.
pub(crate) fn nth_ksubset<const K: usize>(n: usize, mut nth: usize) -> [usize; K] {
    assert!(nth < nck(n, K), "nth={nth} out of range for n={n} k={K}");

    let mut out = [0; K];
    let mut c = 0;
    for (i, pos) in out.iter_mut().enumerate() {
        // Skip all the subsets that have position c at index i.
        loop {
            let with_c = nck(n - c - 1, K - i - 1);
            if nth < with_c {
                break;
            }

            nth -= with_c;
            c += 1;
        }

        *pos = c;
        c += 1;
    }

    out
}

/// An iterator over k-cards combinations of a slice of cards.
///
/// Combinations are returned in lexicographic order of the positions in the
/// slice, so if the slice is sorted each combination is sorted and each
/// subset is visited once. The iterator doesn't allocate.
#[derive(Debug, Clone)]
pub struct Combinations<'a, const K: usize> {
    cards: &'a [Card],
    pos: [usize; K],
    remaining: usize,
}

impl<'a, const K: usize> Combinations<'a, K> {
    /// Creates an iterator that returns `len` combinations starting from
    /// the `start` combination.
    pub(crate) fn new(cards: &'a [Card], start: usize, len: usize) -> Self {
        let total = nck(cards.len(), K);
        let remaining = len.min(total.saturating_sub(start));
        let pos = if remaining > 0 {
            nth_ksubset(cards.len(), start)
        } else {
            [0; K]
        };

        Self {
            cards,
            pos,
            remaining,
        }
    }

    fn advance(&mut self) {
        let n = self.cards.len();

        // Find the rightmost position that can still move right.
        let mut i = K;
        while i > 0 {
            i -= 1;
            if self.pos[i] < n - K + i {
                self.pos[i] += 1;
                for j in (i + 1)..K {
                    self.pos[j] = self.pos[j - 1] + 1;
                }

                return;
            }
        }
    }
}

impl<const K: usize> Iterator for Combinations<'_, K> {
    type Item = [Card; K];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let out = std::array::from_fn(|i| self.cards[self.pos[i]]);

        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }

        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const K: usize> ExactSizeIterator for Combinations<'_, K> {}

impl<const K: usize> FusedIterator for Combinations<'_, K> {}
