// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown outcomes and their aggregation.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, iter::Sum, ops};

use crate::Board;

/// A showdown outcome from the enumerated hand point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Outcome {
    /// The enumerated hand is stronger.
    Win = 0,
    /// The opponent hand is stronger.
    Lose,
    /// Both hands have the same strength.
    Tie,
}

impl Outcome {
    /// Classifies a showdown given the two players strengths.
    #[inline]
    pub fn classify<S: Ord>(hero: S, villain: S) -> Outcome {
        match hero.cmp(&villain) {
            Ordering::Greater => Outcome::Win,
            Ordering::Less => Outcome::Lose,
            Ordering::Equal => Outcome::Tie,
        }
    }

    /// The same outcome from the opponent point of view.
    pub fn flip(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// A board and its showdown outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardResult {
    /// The board cards.
    pub board: Board,
    /// The showdown outcome.
    pub outcome: Outcome,
}

/// Showdown counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Number of boards won.
    pub wins: u64,
    /// Number of boards lost.
    pub losses: u64,
    /// Number of boards tied.
    pub ties: u64,
    /// Number of boards evaluated.
    pub comparisons: u64,
}

impl Totals {
    /// Counts an outcome.
    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }

        self.comparisons += 1;
    }

    /// The enumerated hand equity, ties count as half a win.
    ///
    /// Returns 0 if nothing has been evaluated.
    pub fn equity(&self) -> f64 {
        if self.comparisons == 0 {
            0.0
        } else {
            (self.wins as f64 + self.ties as f64 / 2.0) / self.comparisons as f64
        }
    }
}

impl ops::AddAssign for Totals {
    fn add_assign(&mut self, rhs: Self) {
        self.wins += rhs.wins;
        self.losses += rhs.losses;
        self.ties += rhs.ties;
        self.comparisons += rhs.comparisons;
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Totals::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// Accumulates outcomes and optionally writes every board result.
///
/// The results buffer is owned by the caller, so that workers can write
/// their results in disjoint slices of the same buffer.
#[derive(Debug, Default)]
pub struct Accumulator<'a> {
    totals: Totals,
    results: Option<&'a mut [BoardResult]>,
}

impl<'a> Accumulator<'a> {
    /// Creates an accumulator that only counts outcomes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an accumulator that also writes the results in `results`
    /// in recording order.
    ///
    /// Recording more results than the buffer length panics.
    pub fn with_results(results: &'a mut [BoardResult]) -> Self {
        Self {
            totals: Totals::default(),
            results: Some(results),
        }
    }

    /// Records a board outcome.
    #[inline]
    pub fn record(&mut self, outcome: Outcome, board: Board) {
        if let Some(results) = &mut self.results {
            results[self.totals.comparisons as usize] = BoardResult { board, outcome };
        }

        self.totals.record(outcome);
    }

    /// The counters.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// The recorded results if the accumulator has a results buffer.
    pub fn results(&self) -> Option<&[BoardResult]> {
        let len = self.totals.comparisons as usize;
        self.results.as_deref().map(|results| &results[..len])
    }
}
