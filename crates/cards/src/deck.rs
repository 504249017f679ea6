// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

mod combinations;
pub use combinations::{Combinations, nck};

#[cfg(feature = "parallel")]
mod parallel;

/// Card parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The rank character is not one of `23456789TJQKA`.
    #[error("invalid rank character '{0}'")]
    InvalidRank(char),
    /// The suit character is not one of `cdhs`.
    #[error("invalid suit character '{0}'")]
    InvalidSuit(char),
    /// A card must have exactly two characters.
    #[error("invalid card '{0}', expected a rank and a suit like 'Qd'")]
    InvalidLength(String),
    /// The same card appears more than once.
    #[error("duplicate card {0}")]
    Duplicate(Card),
}

/// A Poker card.
///
/// A card is represented by a single byte with value `rank * 4 + suit` so
/// that sorting cards by id sorts them by rank first and suit second:
///
/// ```text
///   rank = id / 4 (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   suit = id % 4 (clubs=0,diamonds=1,hearts=2,spades=3)
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and a suit.
    #[inline]
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(rank as u8 * Suit::COUNT as u8 + suit as u8)
    }

    /// Creates a card from its id, returns `None` if the id is not less
    /// than [Deck::SIZE].
    pub fn from_id(id: u8) -> Option<Card> {
        ((id as usize) < Deck::SIZE).then_some(Self(id))
    }

    /// This card unique id.
    #[inline]
    pub const fn id(&self) -> u8 {
        self.0
    }

    /// Returns the card suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.0 % Suit::COUNT as u8) as usize]
    }

    /// Returns the card rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        Rank::ALL[(self.0 / Suit::COUNT as u8) as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                Ok(Card::new(Rank::try_from(rank)?, Suit::try_from(suit)?))
            }
            _ => Err(CardError::InvalidLength(s.to_string())),
        }
    }
}

/// Parses a string of concatenated cards like `"QdTd"`, whitespace between
/// cards is allowed.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardError> {
    let chars = s.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>();
    if chars.len() % 2 != 0 {
        return Err(CardError::InvalidLength(s.to_string()));
    }

    let mut cards = Vec::with_capacity(chars.len() / 2);
    for pair in chars.chunks(2) {
        let card = Card::new(Rank::try_from(pair[0])?, Suit::try_from(pair[1])?);
        if cards.contains(&card) {
            return Err(CardError::Duplicate(card));
        }

        cards.push(card);
    }

    Ok(cards)
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: usize = 13;

    const ALL: [Rank; Rank::COUNT] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> + Clone {
        Self::ALL.into_iter()
    }

    /// Returns the rank with the given index.
    ///
    /// Panics if index >= 13.
    pub const fn from_index(index: usize) -> Rank {
        Self::ALL[index]
    }

    fn to_char(self) -> char {
        match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = CardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.to_char() == c.to_ascii_uppercase())
            .ok_or(CardError::InvalidRank(c))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// The number of suits.
    pub const COUNT: usize = 4;

    const ALL: [Suit; Suit::COUNT] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> + Clone {
        Self::ALL.into_iter()
    }
}

impl TryFrom<char> for Suit {
    type Error = CardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            _ => Err(CardError::InvalidSuit(c)),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// A cards deck.
///
/// The cards in the deck are always sorted by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a full deck.
    pub const SIZE: usize = 52;

    /// Creates a deck with all the cards that are not in `excluded`.
    ///
    /// This must be called again every time the set of dealt cards changes.
    pub fn excluding(excluded: &[Card]) -> Self {
        let cards = (0..Self::SIZE as u8)
            .filter_map(Card::from_id)
            .filter(|c| !excluded.contains(c))
            .collect();
        Self { cards }
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the deck contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// The cards in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns an iterator over all the k-cards combinations in the deck.
    ///
    /// Panics if K > 7.
    pub fn combinations<const K: usize>(&self) -> Combinations<'_, K> {
        self.combinations_from(0)
    }

    /// Returns an iterator over the k-cards combinations in the deck that
    /// starts at the nth combination.
    ///
    /// Panics if K > 7.
    pub fn combinations_from<const K: usize>(&self, nth: usize) -> Combinations<'_, K> {
        let total = nck(self.cards.len(), K);
        Combinations::new(&self.cards, nth, total.saturating_sub(nth))
    }

    /// Returns an iterator over all the 5-cards boards in the deck.
    pub fn boards(&self) -> Combinations<'_, 5> {
        self.combinations()
    }

    /// Splits the k-cards combinations in `num_parts` contiguous ranges, the
    /// concatenation of the ranges in order is the same sequence returned by
    /// [Deck::combinations].
    ///
    /// Panics if `num_parts` is zero or K > 7.
    pub fn split<const K: usize>(
        &self,
        num_parts: usize,
    ) -> impl Iterator<Item = Combinations<'_, K>> {
        assert!(num_parts > 0);

        let total = nck(self.cards.len(), K);
        let per_part = total.div_ceil(num_parts);

        (0..num_parts).map(move |part| {
            let start = (part * per_part).min(total);
            let len = per_part.min(total - start);
            Combinations::new(&self.cards, start, len)
        })
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::excluding(&[])
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::prelude::*;

    #[test]
    fn card_encoding() {
        let mut cards = HashSet::default();

        for rank in Rank::ranks() {
            for suit in Suit::suits() {
                let card = Card::new(rank, suit);
                assert_eq!(card.id(), rank as u8 * 4 + suit as u8);
                assert_eq!(card.rank(), rank);
                assert_eq!(card.suit(), suit);
                assert_eq!(Card::from_id(card.id()), Some(card));
                cards.insert(card.id());
            }
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);
        assert!(cards.iter().all(|&id| (id as usize) < Deck::SIZE));
        assert_eq!(Card::from_id(52), None);

        let qd = Card::new(Rank::Queen, Suit::Diamonds);
        assert_eq!(qd.id(), 41);

        let td = Card::new(Rank::Ten, Suit::Diamonds);
        assert_eq!(td.id(), 33);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");
    }

    #[test]
    fn card_from_str() {
        assert_eq!("Ah".parse(), Ok(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!("tc".parse(), Ok(Card::new(Rank::Ten, Suit::Clubs)));
        assert_eq!("2S".parse(), Ok(Card::new(Rank::Deuce, Suit::Spades)));

        assert_eq!("1h".parse::<Card>(), Err(CardError::InvalidRank('1')));
        assert_eq!("Ax".parse::<Card>(), Err(CardError::InvalidSuit('x')));
        assert!(matches!(
            "Ahh".parse::<Card>(),
            Err(CardError::InvalidLength(_))
        ));

        let cards = parse_cards("Qd Td").unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::Queen, Suit::Diamonds),
                Card::new(Rank::Ten, Suit::Diamonds)
            ]
        );

        assert_eq!(
            parse_cards("QdQd"),
            Err(CardError::Duplicate(Card::new(Rank::Queen, Suit::Diamonds)))
        );
        assert!(matches!(parse_cards("QdT"), Err(CardError::InvalidLength(_))));
    }

    #[test]
    fn deck_excluding() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);
        assert!(deck.cards().windows(2).all(|w| w[0] < w[1]));

        let mut rng = StdRng::seed_from_u64(101);
        for k in 0..=Deck::SIZE {
            let mut all = Deck::default().into_iter().collect::<Vec<_>>();
            all.shuffle(&mut rng);
            let excluded = &all[..k];

            let deck = Deck::excluding(excluded);
            assert_eq!(deck.count(), Deck::SIZE - k);
            assert!(excluded.iter().all(|&c| !deck.contains(c)));
            assert!(deck.cards().windows(2).all(|w| w[0] < w[1]));
        }

        assert!(Deck::excluding(Deck::default().cards()).is_empty());
    }

    #[test]
    fn deck_remove() {
        let mut deck = Deck::default();
        let ad = Card::new(Rank::Ace, Suit::Diamonds);
        deck.remove(ad);
        assert!(!deck.contains(ad));
        assert_eq!(deck, Deck::excluding(&[ad]));
    }

    #[test]
    fn deck_combinations() {
        let deck = Deck::default();

        let mut hands = HashSet::default();
        for cards in deck.combinations::<2>() {
            hands.insert(cards);
        }
        assert_eq!(hands.len(), 1_326);

        let mut count = 0;
        for cards in deck.combinations::<3>() {
            assert!(cards.windows(2).all(|w| w[0] < w[1]));
            count += 1;
        }
        assert_eq!(count, 22_100);
    }

    #[test]
    fn deck_boards_unique() {
        let deck = Deck::excluding(&Deck::default().cards()[20..]);
        assert_eq!(deck.count(), 20);

        let boards = deck.boards().collect::<Vec<_>>();
        assert_eq!(boards.len(), 15_504);

        // Lexicographic order implies no repeated boards.
        assert!(boards.windows(2).all(|w| w[0] < w[1]));
        assert!(boards.iter().all(|b| b.windows(2).all(|w| w[0] < w[1])));

        let unique = boards.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), boards.len());
    }

    #[test]
    fn deck_boards_48() {
        let dealt = parse_cards("AcAdQdTd").unwrap();
        let deck = Deck::excluding(&dealt);

        let mut count = 0;
        let mut prev = None;
        for board in deck.boards() {
            assert!(board.iter().all(|c| !dealt.contains(c)));
            assert!(prev.is_none_or(|p| p < board));
            prev = Some(board);
            count += 1;
        }

        assert_eq!(count, 1_712_304);
        assert_eq!(deck.boards().len(), 1_712_304);
    }

    #[test]
    fn deck_boards_restartable() {
        let deck = Deck::excluding(&Deck::default().cards()[12..]);
        let first = deck.boards().collect::<Vec<_>>();
        let second = deck.boards().collect::<Vec<_>>();
        assert_eq!(first, second);
    }

    #[test]
    fn deck_small() {
        let deck = Deck::excluding(&Deck::default().cards()[4..]);
        assert_eq!(deck.boards().count(), 0);
        assert_eq!(deck.combinations::<4>().count(), 1);

        let empty = Deck::excluding(Deck::default().cards());
        assert_eq!(empty.boards().count(), 0);
    }

    #[test]
    fn deck_split() {
        let deck = Deck::excluding(&Deck::default().cards()[18..]);
        let all = deck.boards().collect::<Vec<_>>();

        for parts in [1, 2, 3, 7, 64] {
            let joined = deck.split::<5>(parts).flatten().collect::<Vec<_>>();
            assert_eq!(joined, all, "parts={parts}");
        }

        // More parts than combinations.
        let deck = Deck::excluding(&Deck::default().cards()[6..]);
        let sizes = deck.split::<5>(10).map(|c| c.len()).collect::<Vec<_>>();
        assert_eq!(sizes.iter().sum::<usize>(), 6);
        assert_eq!(sizes.len(), 10);
    }

    #[test]
    fn deck_combinations_from() {
        let deck = Deck::excluding(&Deck::default().cards()[15..]);
        let all = deck.boards().collect::<Vec<_>>();

        for nth in [0, 1, 17, 1000, all.len() - 1, all.len()] {
            let tail = deck.combinations_from::<5>(nth).collect::<Vec<_>>();
            assert_eq!(tail, all[nth..]);
        }
    }
}
