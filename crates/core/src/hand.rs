// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hole cards and the 169 preflop hand classes.
//!
//! The 1326 two cards starting hands are grouped in 169 classes, 13 pairs,
//! 78 suited, and 78 offsuit hands. Each class is enumerated with a single
//! representative hand, the table order and representatives are:
//!
//! ```text
//!   0..78    suited   both cards clubs, lower rank card first
//!   78..91   pairs    clubs and diamonds
//!   91..169  offsuit  lower rank clubs, higher rank diamonds
//! ```
//!
//! within each group classes are sorted by the lower rank and then by the
//! higher rank.
//!
//! Against a specific opponent hand different hands of the same class may
//! have slightly different equities because of flushes, the representative
//! hand equity is used for the whole class.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use equilab_cards::{Card, Rank, Suit, parse_cards};

use crate::{Error, Result};

/// A player two hole cards.
///
/// The cards are stored sorted so that two hands with the same cards are
/// equal regardless of the dealing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand([Card; 2]);

impl Hand {
    /// Creates a hand with two distinct cards.
    pub fn new(c1: Card, c2: Card) -> Result<Self> {
        if c1 == c2 {
            return Err(Error::DuplicateCard(c1));
        }

        Ok(Self::sorted(c1, c2))
    }

    const fn sorted(c1: Card, c2: Card) -> Self {
        if c1.id() < c2.id() {
            Self([c1, c2])
        } else {
            Self([c2, c1])
        }
    }

    /// The hand cards, lower card first.
    #[inline]
    pub fn cards(&self) -> [Card; 2] {
        self.0
    }

    /// Checks if this hand contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.0.contains(&card)
    }

    /// Checks if this hand shares any card with another hand.
    pub fn overlaps(&self, other: &Hand) -> bool {
        other.0.iter().any(|&c| self.contains(c))
    }
}

impl FromStr for Hand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_cards(s)?.as_slice() {
            [c1, c2] => Ok(Self::sorted(*c1, *c2)),
            _ => Err(Error::InvalidHand(s.to_string())),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

/// The kind of a hand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Two cards of different ranks with the same suit.
    Suited,
    /// Two cards with the same rank.
    Pair,
    /// Two cards of different ranks and suits.
    Offsuit,
}

/// The number of hand classes.
const NUM_CLASSES: usize = 169;

/// The number of suited classes, and of offsuit classes.
const NUM_UNPAIRED: usize = Rank::COUNT * (Rank::COUNT - 1) / 2;

/// One of the 169 preflop hand classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandClass {
    index: u8,
    kind: ClassKind,
    high: Rank,
    low: Rank,
}

static HAND_CLASSES: [HandClass; NUM_CLASSES] = build_classes();

const fn build_classes() -> [HandClass; NUM_CLASSES] {
    let mut table = [HandClass {
        index: 0,
        kind: ClassKind::Pair,
        high: Rank::Deuce,
        low: Rank::Deuce,
    }; NUM_CLASSES];

    let mut idx = 0;

    let mut low = 0;
    while low < Rank::COUNT {
        let mut high = low + 1;
        while high < Rank::COUNT {
            table[idx] = HandClass::make(idx, ClassKind::Suited, high, low);
            idx += 1;
            high += 1;
        }
        low += 1;
    }

    let mut rank = 0;
    while rank < Rank::COUNT {
        table[idx] = HandClass::make(idx, ClassKind::Pair, rank, rank);
        idx += 1;
        rank += 1;
    }

    let mut low = 0;
    while low < Rank::COUNT {
        let mut high = low + 1;
        while high < Rank::COUNT {
            table[idx] = HandClass::make(idx, ClassKind::Offsuit, high, low);
            idx += 1;
            high += 1;
        }
        low += 1;
    }

    assert!(idx == NUM_CLASSES && idx == 2 * NUM_UNPAIRED + Rank::COUNT);
    table
}

impl HandClass {
    const fn make(index: usize, kind: ClassKind, high: usize, low: usize) -> Self {
        Self {
            index: index as u8,
            kind,
            high: Rank::from_index(high),
            low: Rank::from_index(low),
        }
    }

    /// All the hand classes in table order.
    pub fn all() -> &'static [HandClass] {
        &HAND_CLASSES
    }

    /// Finds a class by label like `AA`, `AKs`, or `T9o`, the ranks can be
    /// in any order.
    pub fn from_label(label: &str) -> Result<HandClass> {
        let unknown = || Error::UnknownClass(label.to_string());

        let chars = label.trim().chars().collect::<Vec<_>>();
        let (r1, r2, kind) = match chars.as_slice() {
            [r1, r2] => (r1, r2, ClassKind::Pair),
            [r1, r2, 's' | 'S'] => (r1, r2, ClassKind::Suited),
            [r1, r2, 'o' | 'O'] => (r1, r2, ClassKind::Offsuit),
            _ => return Err(unknown()),
        };

        let r1 = Rank::try_from(*r1).map_err(|_| unknown())?;
        let r2 = Rank::try_from(*r2).map_err(|_| unknown())?;
        let (high, low) = (r1.max(r2), r1.min(r2));

        HAND_CLASSES
            .iter()
            .find(|c| c.kind == kind && c.high == high && c.low == low)
            .copied()
            .ok_or_else(unknown)
    }

    /// The class position in the table.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// The class kind.
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// The higher rank.
    pub fn high(&self) -> Rank {
        self.high
    }

    /// The lower rank.
    pub fn low(&self) -> Rank {
        self.low
    }

    /// The number of concrete hands in this class.
    pub fn num_hands(&self) -> usize {
        match self.kind {
            ClassKind::Suited => 4,
            ClassKind::Pair => 6,
            ClassKind::Offsuit => 12,
        }
    }

    /// The concrete hand that represents this class.
    pub fn representative(&self) -> Hand {
        let (low_suit, high_suit) = match self.kind {
            ClassKind::Suited => (Suit::Clubs, Suit::Clubs),
            ClassKind::Pair | ClassKind::Offsuit => (Suit::Clubs, Suit::Diamonds),
        };

        Hand::sorted(
            Card::new(self.low, low_suit),
            Card::new(self.high, high_suit),
        )
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ClassKind::Suited => write!(f, "{}{}s", self.high, self.low),
            ClassKind::Pair => write!(f, "{}{}", self.high, self.low),
            ClassKind::Offsuit => write!(f, "{}{}o", self.high, self.low),
        }
    }
}

impl FromStr for HandClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}
