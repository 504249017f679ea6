// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game definition loading.
//!
//! A game is described by an ACPC style definition file:
//!
//! ```text
//! GAMEDEF
//! nolimit
//! numPlayers = 2
//! numRounds = 4
//! stack = 20000 20000
//! blind = 100 50
//! firstPlayer = 2 1 1 1
//! numSuits = 4
//! numRanks = 13
//! numHoleCards = 2
//! numBoardCards = 0 3 1 1
//! END GAMEDEF
//! ```
//!
//! Only the fields that define the cards dealt are interpreted, betting
//! fields are checked for syntax and otherwise ignored.
use std::{fs, path::Path, str::FromStr};
use thiserror::Error;

use crate::{Error, Result};

/// The largest number of betting rounds.
const MAX_ROUNDS: usize = 4;

/// Game definition errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesetError {
    /// The first line is not `GAMEDEF`.
    #[error("missing GAMEDEF header")]
    MissingHeader,
    /// The definition doesn't end with `END GAMEDEF`.
    #[error("missing END GAMEDEF")]
    MissingEnd,
    /// A line cannot be parsed.
    #[error("line {line}: {msg}")]
    Syntax {
        /// The line number starting from 1.
        line: usize,
        /// What is wrong with the line.
        msg: String,
    },
    /// A required field is missing.
    #[error("missing {0}")]
    Missing(&'static str),
    /// The game is valid but cannot be enumerated.
    #[error("unsupported {what} {value}")]
    Unsupported {
        /// The field name.
        what: &'static str,
        /// The field value.
        value: String,
    },
}

/// The game betting structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Betting {
    /// Fixed raise sizes.
    Limit,
    /// Any raise size up to the stack.
    NoLimit,
}

/// The structural rules of a heads-up hold'em game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    betting: Betting,
    num_rounds: u8,
    num_board_cards: Vec<u8>,
}

impl Ruleset {
    /// The number of players.
    pub const NUM_PLAYERS: usize = 2;
    /// The number of hole cards for each player.
    pub const NUM_HOLE_CARDS: usize = 2;
    /// The number of board cards at showdown.
    pub const NUM_BOARD_CARDS: usize = 5;

    /// Creates the heads-up no-limit hold'em ruleset.
    pub fn holdem() -> Self {
        Self {
            betting: Betting::NoLimit,
            num_rounds: 4,
            num_board_cards: vec![0, 3, 1, 1],
        }
    }

    /// Loads a ruleset from a game definition file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        text.parse().map_err(|source| Error::Game {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The betting structure.
    pub fn betting(&self) -> Betting {
        self.betting
    }

    /// The number of betting rounds.
    pub fn num_rounds(&self) -> u8 {
        self.num_rounds
    }

    /// The number of board cards dealt in each round.
    pub fn num_board_cards(&self) -> &[u8] {
        &self.num_board_cards
    }

    /// The index of the last round, where hands go to showdown.
    pub fn showdown_round(&self) -> u8 {
        self.num_rounds - 1
    }
}

#[derive(Default)]
struct Fields {
    betting: Option<Betting>,
    num_players: Option<u32>,
    num_rounds: Option<u32>,
    num_suits: Option<u32>,
    num_ranks: Option<u32>,
    num_hole_cards: Option<u32>,
    num_board_cards: Option<Vec<u32>>,
}

impl FromStr for Ruleset {
    type Err = RulesetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

        match lines.next() {
            Some((_, line)) if line.eq_ignore_ascii_case("GAMEDEF") => {}
            _ => return Err(RulesetError::MissingHeader),
        }

        let mut fields = Fields::default();
        let mut ended = false;

        for (line_no, line) in lines {
            let syntax = |msg: String| RulesetError::Syntax { line: line_no, msg };

            if line.eq_ignore_ascii_case("END GAMEDEF") {
                ended = true;
                break;
            } else if line.eq_ignore_ascii_case("limit") {
                fields.betting = Some(Betting::Limit);
                continue;
            } else if line.eq_ignore_ascii_case("nolimit") {
                fields.betting = Some(Betting::NoLimit);
                continue;
            }

            let Some((key, values)) = line.split_once('=') else {
                return Err(syntax(format!("expected 'key = values' got '{line}'")));
            };

            let key = key.trim();
            let values = values
                .split_whitespace()
                .map(|v| v.parse::<u32>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| syntax(format!("{key}: {e}")))?;

            let single = match values.as_slice() {
                [v] => Some(*v),
                _ => None,
            };
            let one = || single.ok_or_else(|| syntax(format!("{key} expects one value")));

            match key.to_ascii_lowercase().as_str() {
                "numplayers" => fields.num_players = Some(one()?),
                "numrounds" => fields.num_rounds = Some(one()?),
                "numsuits" => fields.num_suits = Some(one()?),
                "numranks" => fields.num_ranks = Some(one()?),
                "numholecards" => fields.num_hole_cards = Some(one()?),
                "numboardcards" => fields.num_board_cards = Some(values),
                "stack" | "blind" | "raisesize" | "firstplayer" | "maxraises" => {}
                key => return Err(syntax(format!("unknown field '{key}'"))),
            }
        }

        if !ended {
            return Err(RulesetError::MissingEnd);
        }

        fields.validate()
    }
}

impl Fields {
    fn validate(self) -> std::result::Result<Ruleset, RulesetError> {
        fn expect(
            what: &'static str,
            value: u32,
            expected: usize,
        ) -> std::result::Result<(), RulesetError> {
            if value as usize == expected {
                Ok(())
            } else {
                Err(RulesetError::Unsupported {
                    what,
                    value: value.to_string(),
                })
            }
        }

        let betting = self.betting.ok_or(RulesetError::Missing("betting type"))?;
        let num_players = self.num_players.ok_or(RulesetError::Missing("numPlayers"))?;
        let num_rounds = self.num_rounds.ok_or(RulesetError::Missing("numRounds"))?;
        let num_suits = self.num_suits.ok_or(RulesetError::Missing("numSuits"))?;
        let num_ranks = self.num_ranks.ok_or(RulesetError::Missing("numRanks"))?;
        let num_hole_cards = self
            .num_hole_cards
            .ok_or(RulesetError::Missing("numHoleCards"))?;
        let num_board_cards = self
            .num_board_cards
            .ok_or(RulesetError::Missing("numBoardCards"))?;

        expect("numPlayers", num_players, Ruleset::NUM_PLAYERS)?;
        expect("numSuits", num_suits, equilab_cards::Suit::COUNT)?;
        expect("numRanks", num_ranks, equilab_cards::Rank::COUNT)?;
        expect("numHoleCards", num_hole_cards, Ruleset::NUM_HOLE_CARDS)?;

        if num_rounds == 0 || num_rounds as usize > MAX_ROUNDS {
            return Err(RulesetError::Unsupported {
                what: "numRounds",
                value: num_rounds.to_string(),
            });
        }

        let unsupported_board = || RulesetError::Unsupported {
            what: "numBoardCards",
            value: format!("{num_board_cards:?}"),
        };

        if num_board_cards.len() != num_rounds as usize {
            return Err(unsupported_board());
        }

        let total = num_board_cards.iter().map(|&n| n as usize).sum::<usize>();
        if total != Ruleset::NUM_BOARD_CARDS {
            return Err(unsupported_board());
        }

        Ok(Ruleset {
            betting,
            num_rounds: num_rounds as u8,
            num_board_cards: num_board_cards.iter().map(|&n| n as u8).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOLIMIT: &str = "\
# Reverse blinds heads-up no-limit hold'em.
GAMEDEF
nolimit
numPlayers = 2
numRounds = 4
stack = 20000 20000
blind = 100 50
firstPlayer = 2 1 1 1
numSuits = 4
numRanks = 13
numHoleCards = 2
numBoardCards = 0 3 1 1
END GAMEDEF
";

    #[test]
    fn parse_nolimit() {
        let ruleset = NOLIMIT.parse::<Ruleset>().unwrap();
        assert_eq!(ruleset, Ruleset::holdem());
        assert_eq!(ruleset.betting(), Betting::NoLimit);
        assert_eq!(ruleset.num_rounds(), 4);
        assert_eq!(ruleset.num_board_cards(), &[0, 3, 1, 1]);
        assert_eq!(ruleset.showdown_round(), 3);
    }

    #[test]
    fn parse_limit() {
        let def = NOLIMIT
            .replace("nolimit", "LIMIT")
            .replace("stack = 20000 20000", "raiseSize = 10 10 20 20\nmaxRaises = 3 4 4 4");
        let ruleset = def.parse::<Ruleset>().unwrap();
        assert_eq!(ruleset.betting(), Betting::Limit);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "numRounds = 4".parse::<Ruleset>(),
            Err(RulesetError::MissingHeader)
        );
        assert_eq!(
            NOLIMIT.replace("END GAMEDEF", "").parse::<Ruleset>(),
            Err(RulesetError::MissingEnd)
        );
        assert_eq!(
            NOLIMIT.replace("nolimit\n", "").parse::<Ruleset>(),
            Err(RulesetError::Missing("betting type"))
        );
        assert_eq!(
            NOLIMIT.replace("numRanks = 13\n", "").parse::<Ruleset>(),
            Err(RulesetError::Missing("numRanks"))
        );
        assert!(matches!(
            NOLIMIT.replace("numRounds = 4", "numRounds = four").parse::<Ruleset>(),
            Err(RulesetError::Syntax { line: 5, .. })
        ));
        assert!(matches!(
            NOLIMIT.replace("numRounds = 4", "numRounds 4").parse::<Ruleset>(),
            Err(RulesetError::Syntax { line: 5, .. })
        ));
        assert!(matches!(
            NOLIMIT.replace("numRounds = 4", "ante = 4").parse::<Ruleset>(),
            Err(RulesetError::Syntax { line: 5, .. })
        ));
    }

    #[test]
    fn unsupported_games() {
        let unsupported = |from: &str, to: &str| {
            matches!(
                NOLIMIT.replace(from, to).parse::<Ruleset>(),
                Err(RulesetError::Unsupported { .. })
            )
        };

        assert!(unsupported("numPlayers = 2", "numPlayers = 3"));
        assert!(unsupported("numHoleCards = 2", "numHoleCards = 4"));
        assert!(unsupported("numSuits = 4", "numSuits = 2"));
        assert!(unsupported("numBoardCards = 0 3 1 1", "numBoardCards = 0 3 1"));
        assert!(unsupported("numBoardCards = 0 3 1 1", "numBoardCards = 0 3 1 2"));
        assert!(unsupported("numRounds = 4", "numRounds = 0"));
    }

    #[test]
    fn load_missing_file() {
        let err = Ruleset::load("no/such/dir/holdem.game").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("no/such/dir/holdem.game"));
    }

    #[test]
    fn load_game_files() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../games");
        let nolimit = Ruleset::load(dir.join("holdem.nolimit.2p.reverse_blinds.game")).unwrap();
        assert_eq!(nolimit, Ruleset::holdem());

        let limit = Ruleset::load(dir.join("holdem.limit.2p.reverse_blinds.game")).unwrap();
        assert_eq!(limit.betting(), Betting::Limit);
        assert_eq!(limit.showdown_round(), 3);
    }
}
