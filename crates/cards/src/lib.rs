// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equilab cards types.
//!
//! This crate define types to create cards, a card is encoded as a small
//! integer `rank * 4 + suit`:
//!
//! ```
//! # use equilab_cards::{Card, Rank, Suit};
//! let qd = Card::new(Rank::Queen, Suit::Diamonds);
//! assert_eq!(qd.id(), 10 * 4 + 1);
//! assert_eq!("Qd".parse::<Card>().unwrap(), qd);
//! ```
//!
//! and a [Deck] type for building a deck without some dealt cards and for
//! iterating all the k-cards combinations of the cards left in the deck.
//!
//! For example to iterate through all the boards given two dealt hands:
//!
//! ```no_run
//! # use equilab_cards::{parse_cards, Deck};
//! let dealt = parse_cards("AcAdQdTd").unwrap();
//! let deck = Deck::excluding(&dealt);
//! assert_eq!(deck.count(), 48);
//!
//! let mut counter = 0;
//! for board in deck.boards() {
//!     assert_eq!(board.len(), 5);
//!     counter += 1;
//! }
//! assert_eq!(counter, 1_712_304);
//! ```
//!
//! Combinations are visited in lexicographic deck index order, so the same
//! sequence can be split in contiguous ranges with [Deck::split] and each
//! range iterated independently:
//!
//! ```
//! # use equilab_cards::{nck, Deck};
//! let deck = Deck::default();
//! let total = deck.split::<2>(3).map(|range| range.count()).sum::<usize>();
//! assert_eq!(total, nck(52, 2));
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number
//! of tasks, the closure `task_id` can be used to store per task data to
//! reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use equilab_cards::Deck;
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default().par_for_each::<5, _>(4, |task_id, hand| {
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 2_598_960);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardError, Combinations, Deck, Rank, Suit, nck, parse_cards};
