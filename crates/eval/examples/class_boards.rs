// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Enumerates all the boards of pocket aces against a queen ten suited:
//
// ```bash
// $ cargo r --release --example class_boards
// ```
use std::time::Instant;

use equilab_cards::parse_cards;
use equilab_eval::*;

fn main() {
    let hero = parse_cards("AcAd").unwrap();
    let villain = parse_cards("QdTd").unwrap();

    let mut deck = Deck::default();
    for &card in hero.iter().chain(&villain) {
        deck.remove(card);
    }

    let now = Instant::now();
    let (mut wins, mut losses, mut ties) = (0u64, 0u64, 0u64);

    for board in deck.boards() {
        let [b1, b2, b3, b4, b5] = board;
        let h = HandValue::eval(&[hero[0], hero[1], b1, b2, b3, b4, b5]);
        let v = HandValue::eval(&[villain[0], villain[1], b1, b2, b3, b4, b5]);

        match h.cmp(&v) {
            std::cmp::Ordering::Greater => wins += 1,
            std::cmp::Ordering::Less => losses += 1,
            std::cmp::Ordering::Equal => ties += 1,
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = wins + losses + ties;
    println!("Boards:     {total}");
    println!("Elapsed:    {:.3}s", elapsed);
    println!("Boards/sec: {:.0}\n", total as f64 / elapsed);

    println!("Wins:       {wins}");
    println!("Losses:     {losses}");
    println!("Ties:       {ties}");
    println!(
        "Equity:     {:.4}",
        (wins as f64 + ties as f64 / 2.0) / total as f64
    );
}
