// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! It provides a [HandValue::eval] method that computes a hand value for 5,
//! 6, or 7 cards hands, hand values are totally ordered and two hands have
//! the same value only if their best five cards have the same ranks.
//!
//! A hand value is encoded in a u32 as:
//!
//! ```text
//!   +--------+--------+--------+--------+
//!   |xxxxxxxx|xxxxcccc|aaaabbbb|ddddeeee| + kicker f in bits 16..20
//!   +--------+--------+--------+--------+
//!   c = hand category (high card=0,...,straight flush=8)
//!   a..e = ranks that break ties within the category, most significant first
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

use equilab_cards::{Card, Rank};

/// Hand categories from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    const ALL: [HandRank; 9] = [
        HandRank::HighCard,
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
    ];
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{s}")
    }
}

/// A hand value, the higher the value the stronger the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue(u32);

impl HandValue {
    const CATEGORY_SHIFT: u32 = 20;

    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the number of cards is not in 5..=7.
    pub fn eval(cards: &[Card]) -> HandValue {
        assert!(
            (5..=7).contains(&cards.len()),
            "cannot evaluate {} cards",
            cards.len()
        );

        let mut suits = [0u16; 4];
        let mut counts = [0u8; Rank::COUNT];
        for card in cards {
            let rank = card.rank() as usize;
            suits[card.suit() as usize] |= 1 << rank;
            counts[rank] += 1;
        }

        // With at most 7 cards a flush excludes quads and full houses.
        for &mask in &suits {
            if mask.count_ones() >= 5 {
                return match straight_high(mask) {
                    Some(high) => Self::new(HandRank::StraightFlush, &[high]),
                    None => Self::new(HandRank::Flush, &highest::<5>(mask)),
                };
            }
        }

        // Rank masks by multiplicity.
        let mut groups = [0u16; 5];
        for (rank, &count) in counts.iter().enumerate() {
            groups[count as usize] |= 1 << rank;
        }

        let ranks = suits.iter().fold(0, |acc, m| acc | m);
        let (quads, trips, pairs, singles) = (groups[4], groups[3], groups[2], groups[1]);

        if quads != 0 {
            let q = top(quads);
            let kicker = top(ranks & !(1 << q));
            return Self::new(HandRank::FourOfAKind, &[q, kicker]);
        }

        if trips != 0 {
            let t = top(trips);
            let rest = (trips & !(1 << t)) | pairs;
            if rest != 0 {
                return Self::new(HandRank::FullHouse, &[t, top(rest)]);
            }
        }

        if let Some(high) = straight_high(ranks) {
            return Self::new(HandRank::Straight, &[high]);
        }

        if trips != 0 {
            let t = top(trips);
            let [k1, k2] = highest::<2>(singles);
            return Self::new(HandRank::ThreeOfAKind, &[t, k1, k2]);
        }

        match pairs.count_ones() {
            0 => Self::new(HandRank::HighCard, &highest::<5>(singles)),
            1 => {
                let [k1, k2, k3] = highest::<3>(singles);
                Self::new(HandRank::OnePair, &[top(pairs), k1, k2, k3])
            }
            _ => {
                let [p1, p2] = highest::<2>(pairs);
                // The kicker may come from a third pair.
                let kicker = top(ranks & !(1 << p1) & !(1 << p2));
                Self::new(HandRank::TwoPair, &[p1, p2, kicker])
            }
        }
    }

    /// Returns the hand category.
    pub fn rank(&self) -> HandRank {
        HandRank::ALL[(self.0 >> Self::CATEGORY_SHIFT) as usize]
    }

    fn new(rank: HandRank, kickers: &[u8]) -> HandValue {
        let value = kickers
            .iter()
            .enumerate()
            .fold((rank as u32) << Self::CATEGORY_SHIFT, |v, (i, &k)| {
                v | (k as u32) << (16 - 4 * i as u32)
            });
        HandValue(value)
    }
}

/// The highest rank in a non empty mask.
#[inline]
fn top(mask: u16) -> u8 {
    debug_assert!(mask != 0);
    (15 - mask.leading_zeros()) as u8
}

/// The N highest ranks in a mask with at least N ranks.
#[inline]
fn highest<const N: usize>(mut mask: u16) -> [u8; N] {
    std::array::from_fn(|_| {
        let r = top(mask);
        mask &= !(1 << r);
        r
    })
}

/// The highest rank of a straight in the mask if any, an ace plays low in a
/// five high straight.
#[inline]
fn straight_high(mask: u16) -> Option<u8> {
    // Bit 0 is the low ace, bit i is rank i - 1.
    let ext = ((mask as u32) << 1) | ((mask as u32) >> Rank::Ace as u32 & 1);
    (4..=13)
        .rev()
        .find(|&top| (ext >> (top - 4)) & 0x1f == 0x1f)
        .map(|top| (top - 1) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashMap;
    use equilab_cards::{Deck, parse_cards};

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&parse_cards(s).unwrap())
    }

    #[test]
    fn categories() {
        assert_eq!(eval("AhKhQhJhTh").rank(), HandRank::StraightFlush);
        assert_eq!(eval("9c9d9h9s2c").rank(), HandRank::FourOfAKind);
        assert_eq!(eval("9c9d9h2s2c").rank(), HandRank::FullHouse);
        assert_eq!(eval("Ac9c7c4c2c").rank(), HandRank::Flush);
        assert_eq!(eval("5c4d3h2sAc").rank(), HandRank::Straight);
        assert_eq!(eval("9c9d9hKs2c").rank(), HandRank::ThreeOfAKind);
        assert_eq!(eval("9c9dKhKs2c").rank(), HandRank::TwoPair);
        assert_eq!(eval("9c9dKhQs2c").rank(), HandRank::OnePair);
        assert_eq!(eval("9c8dKhQs2c").rank(), HandRank::HighCard);
    }

    #[test]
    fn seven_cards() {
        // Straight flush beats a flush with higher cards.
        assert_eq!(eval("5c6c7c8c9cAcKc").rank(), HandRank::StraightFlush);
        assert!(eval("5c6c7c8c9cAcKc") > eval("AcKcQcJc9c8d8h"));

        // Two trips make a full house.
        assert_eq!(eval("9c9d9hKsKdKc2c").rank(), HandRank::FullHouse);
        assert_eq!(eval("9c9d9hKsKdKc2c"), eval("KsKdKc9c9d2h3s"));

        // Three pairs use the best kicker.
        assert_eq!(eval("9c9dKhKs2c2dQs").rank(), HandRank::TwoPair);
        assert!(eval("9c9dKhKs2c2dQs") > eval("9c9dKhKs2c2dJs"));
        assert_eq!(eval("9c9dKhKs4c4d3s"), eval("9c9dKhKs4c3d2s"));

        // Quads with a pair kicker.
        assert_eq!(eval("9c9d9h9sKcKd2s"), eval("9c9d9h9sKc3d2s"));
    }

    #[test]
    fn straights() {
        // The wheel is the lowest straight.
        assert!(eval("5c4d3h2sAc") < eval("6c5d4h3s2c"));
        assert!(eval("AcKdQhJsTc") > eval("KdQhJsTc9c"));
        assert_eq!(eval("5c4d3h2sAcKd7h").rank(), HandRank::Straight);
        assert_eq!(eval("5c4d3h2sAc"), eval("5d4c3s2hAd"));

        // No wrap around.
        assert_eq!(eval("4c3d2hAsKc").rank(), HandRank::HighCard);

        // Steel wheel.
        assert_eq!(eval("5h4h3h2hAh").rank(), HandRank::StraightFlush);
        assert!(eval("5h4h3h2hAh") < eval("6h5h4h3h2h"));
    }

    #[test]
    fn kickers() {
        assert!(eval("AcAdKhQs2c") > eval("AhAsKdJs3c"));
        assert!(eval("Ac9c7c4c3c") > eval("Ad9d7d4d2d"));
        assert!(eval("9c9d9hAsKc") > eval("9c9d9hAsQc"));
        assert_eq!(eval("AcKd9h7s5c"), eval("AdKh9s7c5d"));
    }

    #[test]
    fn all_5cards() {
        let mut counts = HashMap::default();
        for hand in Deck::default().combinations::<5>() {
            *counts.entry(HandValue::eval(&hand).rank()).or_insert(0) += 1;
        }

        assert_eq!(counts[&HandRank::HighCard], 1_302_540);
        assert_eq!(counts[&HandRank::OnePair], 1_098_240);
        assert_eq!(counts[&HandRank::TwoPair], 123_552);
        assert_eq!(counts[&HandRank::ThreeOfAKind], 54_912);
        assert_eq!(counts[&HandRank::Straight], 10_200);
        assert_eq!(counts[&HandRank::Flush], 5_108);
        assert_eq!(counts[&HandRank::FullHouse], 3_744);
        assert_eq!(counts[&HandRank::FourOfAKind], 624);
        assert_eq!(counts[&HandRank::StraightFlush], 40);
    }

    // This takes a while to run in debug mode as it goes through 133M hands.
    #[test]
    #[ignore]
    fn all_7cards() {
        let mut counts = [0usize; 9];
        for hand in Deck::default().combinations::<7>() {
            counts[HandValue::eval(&hand).rank() as usize] += 1;
        }

        assert_eq!(
            counts,
            [
                23_294_460, 58_627_800, 31_433_400, 6_461_620, 6_180_020, 4_047_644, 3_473_184,
                224_848, 41_584
            ]
        );
    }

    #[test]
    #[should_panic]
    fn too_few_cards() {
        HandValue::eval(&parse_cards("AcKd").unwrap());
    }
}
