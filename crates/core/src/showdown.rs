// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown evaluation.
use equilab_cards::Card;
use equilab_eval::HandValue;

use crate::{Hand, Ruleset};

/// The five community cards at showdown.
pub type Board = [Card; 5];

/// The cards dealt to both players at showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Showdown {
    /// The showdown round index.
    pub round: u8,
    /// The players hole cards, seat 0 is the enumerated hand.
    pub hole_cards: [Hand; 2],
    /// The board cards.
    pub board: Board,
}

/// A hand ranking engine.
///
/// The enumeration only compares strengths for the two seats of the same
/// showdown, so strengths must be totally ordered, equal strengths are ties,
/// and evaluating the same showdown twice must return the same strength.
pub trait Evaluator: Sync {
    /// The hand strength, higher is better.
    type Strength: Ord + Copy + Send;

    /// Evaluates the hand of the player at `seat`.
    fn evaluate(&self, ruleset: &Ruleset, seat: usize, showdown: &Showdown) -> Self::Strength;
}

/// Hold'em evaluator, a player hand is the best five cards out of the two
/// hole cards and the board.
#[derive(Debug, Default, Clone, Copy)]
pub struct HoldemEvaluator;

impl Evaluator for HoldemEvaluator {
    type Strength = HandValue;

    #[inline]
    fn evaluate(&self, ruleset: &Ruleset, seat: usize, showdown: &Showdown) -> HandValue {
        debug_assert_eq!(showdown.round, ruleset.showdown_round());

        let [c1, c2] = showdown.hole_cards[seat].cards();
        let [b1, b2, b3, b4, b5] = showdown.board;
        HandValue::eval(&[c1, c2, b1, b2, b3, b4, b5])
    }
}
