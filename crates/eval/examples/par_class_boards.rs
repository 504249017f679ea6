// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Enumerates all the boards of pocket aces against a queen ten suited with
// a task for each board range:
//
// ```bash
// $ cargo r --release --features=parallel --example par_class_boards
// ```
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use equilab_cards::parse_cards;
use equilab_eval::*;

const NUM_TASKS: usize = 4;

/// Per task wins, losses, and ties.
type Counters = [AtomicU64; 3];

fn main() {
    let hero = parse_cards("AcAd").unwrap();
    let villain = parse_cards("QdTd").unwrap();

    let mut deck = Deck::default();
    for &card in hero.iter().chain(&villain) {
        deck.remove(card);
    }

    let counters = (0..NUM_TASKS)
        .map(|_| Counters::default())
        .collect::<Vec<_>>();

    let now = Instant::now();

    deck.par_for_each::<5, _>(NUM_TASKS, |task_id, board| {
        let [b1, b2, b3, b4, b5] = *board;
        let h = HandValue::eval(&[hero[0], hero[1], b1, b2, b3, b4, b5]);
        let v = HandValue::eval(&[villain[0], villain[1], b1, b2, b3, b4, b5]);

        let idx = match h.cmp(&v) {
            std::cmp::Ordering::Greater => 0,
            std::cmp::Ordering::Less => 1,
            std::cmp::Ordering::Equal => 2,
        };
        counters[task_id][idx].fetch_add(1, Ordering::Relaxed);
    });

    let elapsed = now.elapsed().as_secs_f64();

    let [wins, losses, ties] = std::array::from_fn(|i| {
        counters
            .iter()
            .map(|c| c[i].load(Ordering::Relaxed))
            .sum::<u64>()
    });

    let total = wins + losses + ties;
    println!("Boards:     {total}");
    println!("Elapsed:    {:.3}s", elapsed);
    println!("Boards/sec: {:.0}\n", total as f64 / elapsed);

    for (task_id, c) in counters.iter().enumerate() {
        let boards = c.iter().map(|n| n.load(Ordering::Relaxed)).sum::<u64>();
        println!("Task {task_id}:     {boards}");
    }

    println!("\nWins:       {wins}");
    println!("Losses:     {losses}");
    println!("Ties:       {ties}");
    println!(
        "Equity:     {:.4}",
        (wins as f64 + ties as f64 / 2.0) / total as f64
    );
}
