// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab exhaustive preflop equity enumeration.
//!
//! Given an opponent hand, for each of the 169 preflop hand classes this
//! crate enumerates every 5-cards board from the cards left in the deck,
//! evaluates both hands at showdown, and counts wins, losses, and ties:
//!
//! ```no_run
//! # use equilab_core::*;
//! let mut config = Config::new(Ruleset::holdem(), "QdTd".parse().unwrap());
//! config.classes = vec![HandClass::from_label("AA").unwrap()];
//!
//! let report = run(&config, &HoldemEvaluator, &CancelToken::new()).unwrap();
//! assert_eq!(report.totals.comparisons, 1_712_304);
//! ```
//!
//! The showdown evaluation goes through the [Evaluator] trait so that the
//! enumeration doesn't depend on how hands are ranked.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod cancel;
pub use cancel::CancelToken;

pub mod enumerate;
pub use enumerate::{ClassReport, Config, Partition, Report, run};

mod error;
pub use error::{Error, Result};

pub mod hand;
pub use hand::{ClassKind, Hand, HandClass};

pub mod outcome;
pub use outcome::{Accumulator, BoardResult, Outcome, Totals};

pub mod ruleset;
pub use ruleset::{Betting, Ruleset, RulesetError};

pub mod showdown;
pub use showdown::{Board, Evaluator, HoldemEvaluator, Showdown};

// Reexport cards types.
pub use equilab_cards::{Card, Deck, Rank, Suit};
