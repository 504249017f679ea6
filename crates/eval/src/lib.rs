// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator builds a
//! rank bitmask for each suit and a mask of ranks for each multiplicity, and
//! computes the hand category and kickers with a few bit operations, without
//! going through the 21 5-cards subsets of a 7 cards hand (see examples for
//! measuring single and parallel performance on you hardware).
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use equilab_eval::*;
//! // 2C, 2D, 2H, 2S, 3C, .., 4D
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[5..]);
//! let v2 = HandValue::eval(&cards[0..5]);
//! assert!(v2 > v1);
//! assert_eq!(v2.rank(), HandRank::FourOfAKind);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue};

// Reexport cards types.
pub use equilab_cards::{Card, Deck, Rank, Suit};
