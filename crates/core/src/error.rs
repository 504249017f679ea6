// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Error types.
use std::{io, path::PathBuf};
use thiserror::Error;

use equilab_cards::{Card, CardError};

use crate::ruleset::RulesetError;

/// Equilab errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The game file cannot be read.
    #[error("failed to open game file [{}]", path.display())]
    Io {
        /// The game file path.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: io::Error,
    },
    /// The game file cannot be parsed or describes an unsupported game.
    #[error("failed to read game file [{}]", path.display())]
    Game {
        /// The game file path.
        path: PathBuf,
        /// The parse error.
        #[source]
        source: RulesetError,
    },
    /// A card cannot be parsed.
    #[error(transparent)]
    Card(#[from] CardError),
    /// A hand doesn't have two distinct cards.
    #[error("invalid hand '{0}', expected two distinct cards like 'QdTd'")]
    InvalidHand(String),
    /// The same card is dealt more than once.
    #[error("card {0} is dealt more than once")]
    DuplicateCard(Card),
    /// A hand class label is not valid.
    #[error("unknown hand class '{0}', expected a label like 'AA', 'AKs', or 'T9o'")]
    UnknownClass(String),
    /// Invalid enumeration configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
