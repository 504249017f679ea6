// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Exhaustive showdown enumeration.
//!
//! For each hand class the class representative and the opponent hand are
//! removed from the deck and all the boards from the remaining cards are
//! evaluated. The work can be split between threads by hand class, with
//! workers pulling the next class from a shared queue, or by boards, with
//! each class boards split in contiguous ranges, one for each worker.
//!
//! In both cases each worker owns its deck and accumulator. When results are
//! retained a single buffer is allocated upfront and each class, and each
//! range of a class, writes to its own slice, so that the results are in
//! class order and then board order regardless of the number of threads or
//! of the partitioning.
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::{
    thread,
    time::{Duration, Instant},
};

use equilab_cards::{Combinations, Deck, nck};

use crate::{
    Accumulator, BoardResult, CancelToken, Card, Error, Evaluator, Hand, HandClass, Outcome, Rank,
    Result, Ruleset, Showdown, Suit, Totals,
};

/// How the enumeration is split between threads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Each worker enumerates whole hand classes.
    #[default]
    Classes,
    /// All workers enumerate a range of boards of the same hand class.
    Boards,
}

/// Enumeration configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The game rules.
    pub ruleset: Ruleset,
    /// The opponent hole cards.
    pub opponent: Hand,
    /// The classes to enumerate in order.
    pub classes: Vec<HandClass>,
    /// Number of worker threads.
    pub threads: usize,
    /// How work is split between threads.
    pub partition: Partition,
    /// Keep every board result.
    pub retain: bool,
}

impl Config {
    /// Creates a single threaded configuration for all the hand classes.
    pub fn new(ruleset: Ruleset, opponent: Hand) -> Self {
        Self {
            ruleset,
            opponent,
            classes: HandClass::all().to_vec(),
            threads: 1,
            partition: Partition::default(),
            retain: false,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::Config("threads must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// The outcome counters for a hand class.
#[derive(Debug, Clone)]
pub struct ClassReport {
    /// The hand class.
    pub class: HandClass,
    /// The class counters.
    pub totals: Totals,
}

/// The enumeration report.
#[derive(Debug)]
pub struct Report {
    /// The enumerated classes in configuration order.
    pub classes: Vec<ClassReport>,
    /// The classes that share a card with the opponent hand.
    pub skipped: Vec<HandClass>,
    /// The counters for all the enumerated classes.
    pub totals: Totals,
    /// The board results in class order and then board order, if retained.
    pub results: Option<Vec<BoardResult>>,
    /// The enumeration elapsed time.
    pub elapsed: Duration,
    /// Whether the enumeration was cancelled before all classes completed.
    pub cancelled: bool,
}

/// A class results slice, `None` if results are not retained.
type Slot<'a> = Option<&'a mut [BoardResult]>;

/// Fills the results buffer before it is written by the workers.
const UNSET: BoardResult = BoardResult {
    board: [Card::new(Rank::Deuce, Suit::Clubs); 5],
    outcome: Outcome::Tie,
};

/// Runs the enumeration.
///
/// Once the cancel token fires no new work is started, the report then
/// contains only the classes that have been fully enumerated.
pub fn run<E: Evaluator>(config: &Config, evaluator: &E, cancel: &CancelToken) -> Result<Report> {
    config.validate()?;

    let (classes, skipped): (Vec<HandClass>, Vec<HandClass>) = config
        .classes
        .iter()
        .partition(|c| !c.representative().overlaps(&config.opponent));

    for class in &skipped {
        warn!(
            "Skipping {class}, {} shares a card with opponent {}",
            class.representative(),
            config.opponent
        );
    }

    info!(
        "Enumerating {} classes against {} with {} threads by {:?}",
        classes.len(),
        config.opponent,
        config.threads,
        config.partition
    );

    let per_class = boards_per_class();
    let mut results = config.retain.then(|| {
        let boards = classes.len() * per_class;
        info!(
            "Retaining {boards} results ({} MB)",
            boards * size_of::<BoardResult>() / (1 << 20)
        );
        vec![UNSET; boards]
    });

    let now = Instant::now();

    let slots = match &mut results {
        Some(results) => results.chunks_mut(per_class).map(Some).collect(),
        None => classes.iter().map(|_| None).collect::<Vec<Slot<'_>>>(),
    };

    let reports = match config.partition {
        _ if config.threads == 1 => run_sequential(config, evaluator, cancel, &classes, slots),
        Partition::Classes => run_by_classes(config, evaluator, cancel, &classes, slots),
        Partition::Boards => run_by_boards(config, evaluator, cancel, &classes, slots),
    };

    let elapsed = now.elapsed();
    let cancelled = reports.len() < classes.len();

    // Completed classes are always a prefix of the classes.
    if let Some(results) = &mut results {
        results.truncate(reports.len() * per_class);
    }

    let totals = reports.iter().map(|r| r.totals).sum::<Totals>();

    if cancelled {
        warn!(
            "Cancelled after {} of {} classes",
            reports.len(),
            classes.len()
        );
    }

    info!(
        "Enumerated {} boards in {:.3}s",
        totals.comparisons,
        elapsed.as_secs_f64()
    );

    Ok(Report {
        classes: reports,
        skipped,
        totals,
        results,
        elapsed,
        cancelled,
    })
}

/// The number of boards for each class, all classes that don't overlap
/// with the opponent leave the same number of cards in the deck.
fn boards_per_class() -> usize {
    let dealt = Ruleset::NUM_PLAYERS * Ruleset::NUM_HOLE_CARDS;
    nck(Deck::SIZE - dealt, Ruleset::NUM_BOARD_CARDS)
}

/// The deck for a class, rebuilt for each class as the dealt cards change.
fn class_deck(class: &HandClass, opponent: &Hand) -> Deck {
    let [h1, h2] = class.representative().cards();
    let [o1, o2] = opponent.cards();
    Deck::excluding(&[h1, h2, o1, o2])
}

/// Evaluates a range of boards writing the results to `slot`.
fn enumerate_boards<E: Evaluator>(
    config: &Config,
    evaluator: &E,
    hero: Hand,
    boards: Combinations<'_, 5>,
    slot: Slot<'_>,
) -> Totals {
    let ruleset = &config.ruleset;
    let round = ruleset.showdown_round();
    let hole_cards = [hero, config.opponent];

    let mut acc = match slot {
        Some(results) => Accumulator::with_results(results),
        None => Accumulator::new(),
    };

    for board in boards {
        let showdown = Showdown {
            round,
            hole_cards,
            board,
        };

        let hero = evaluator.evaluate(ruleset, 0, &showdown);
        let villain = evaluator.evaluate(ruleset, 1, &showdown);
        acc.record(Outcome::classify(hero, villain), board);
    }

    acc.totals()
}

fn class_report(class: HandClass, totals: Totals) -> ClassReport {
    debug!(
        "{class}: wins={} losses={} ties={} equity={:.4}",
        totals.wins,
        totals.losses,
        totals.ties,
        totals.equity()
    );

    ClassReport { class, totals }
}

fn run_sequential<E: Evaluator>(
    config: &Config,
    evaluator: &E,
    cancel: &CancelToken,
    classes: &[HandClass],
    slots: Vec<Slot<'_>>,
) -> Vec<ClassReport> {
    let mut reports = Vec::with_capacity(classes.len());

    for (class, slot) in classes.iter().zip(slots) {
        if cancel.is_cancelled() {
            break;
        }

        let deck = class_deck(class, &config.opponent);
        let hero = class.representative();
        let totals = enumerate_boards(config, evaluator, hero, deck.boards(), slot);
        reports.push(class_report(*class, totals));
    }

    reports
}

fn run_by_classes<E: Evaluator>(
    config: &Config,
    evaluator: &E,
    cancel: &CancelToken,
    classes: &[HandClass],
    slots: Vec<Slot<'_>>,
) -> Vec<ClassReport> {
    // Workers take classes in order, so when cancelled the completed
    // classes are a prefix of the classes.
    let queue = Mutex::new(classes.iter().zip(slots).enumerate());

    let mut reports = thread::scope(|s| {
        let handles = (0..config.threads)
            .map(|_| {
                s.spawn(|| {
                    let mut reports = Vec::new();

                    while !cancel.is_cancelled() {
                        let Some((pos, (class, slot))) = queue.lock().next() else {
                            break;
                        };

                        let deck = class_deck(class, &config.opponent);
                        let hero = class.representative();
                        let totals = enumerate_boards(config, evaluator, hero, deck.boards(), slot);
                        reports.push((pos, class_report(*class, totals)));
                    }

                    reports
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    reports.sort_by_key(|(pos, _)| *pos);
    reports.into_iter().map(|(_, report)| report).collect()
}

fn run_by_boards<E: Evaluator>(
    config: &Config,
    evaluator: &E,
    cancel: &CancelToken,
    classes: &[HandClass],
    slots: Vec<Slot<'_>>,
) -> Vec<ClassReport> {
    let mut reports = Vec::with_capacity(classes.len());

    for (class, slot) in classes.iter().zip(slots) {
        if cancel.is_cancelled() {
            break;
        }

        let deck = class_deck(class, &config.opponent);
        let hero = class.representative();
        let ranges = deck.split::<5>(config.threads).collect::<Vec<_>>();

        // Each range writes to the slice that follows the previous range.
        let mut rest = slot;
        let range_slots = ranges
            .iter()
            .map(|range| {
                rest.take().map(|results| {
                    let (head, tail) = results.split_at_mut(range.len());
                    rest = Some(tail);
                    head
                })
            })
            .collect::<Vec<_>>();

        let totals = thread::scope(|s| {
            let handles = ranges
                .into_iter()
                .zip(range_slots)
                .map(|(boards, slot)| {
                    s.spawn(move || enumerate_boards(config, evaluator, hero, boards, slot))
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .sum::<Totals>()
        });

        reports.push(class_report(*class, totals));
    }

    reports
}
