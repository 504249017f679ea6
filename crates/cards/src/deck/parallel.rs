// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel combinations iteration.
use std::thread;

use super::{Card, Deck};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards combination.
    ///
    /// The combinations are split in `num_tasks` contiguous ranges, see
    /// [Deck::split], each range is iterated by a scoped thread. The closure
    /// takes an usize that is the task identifier (0..num_tasks) and the
    /// k-cards combination.
    ///
    /// Panics if `num_tasks` is zero or K > 7.
    pub fn par_for_each<const K: usize, F>(&self, num_tasks: usize, f: F)
    where
        F: Fn(usize, &[Card; K]) + Send + Sync,
    {
        assert!(num_tasks > 0);

        thread::scope(|s| {
            for (task_id, range) in self.split::<K>(num_tasks).enumerate() {
                let f = &f;
                s.spawn(move || {
                    for cards in range {
                        f(task_id, &cards);
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nck;
    use std::sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    };

    #[test]
    fn par_for_each_count() {
        const NUM_TASKS: usize = 4;

        let deck = Deck::excluding(&Deck::default().cards()[..4]);
        let counters = (0..NUM_TASKS)
            .map(|_| AtomicU64::new(0))
            .collect::<Vec<_>>();

        deck.par_for_each::<5, _>(NUM_TASKS, |task_id, board| {
            assert!(board.windows(2).all(|w| w[0] < w[1]));
            counters[task_id].fetch_add(1, Ordering::Relaxed);
        });

        let total = counters
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .sum::<u64>();
        assert_eq!(total as usize, nck(48, 5));
    }

    #[test]
    fn par_for_each_order() {
        const NUM_TASKS: usize = 3;

        let deck = Deck::excluding(&Deck::default().cards()[20..]);
        let outputs = (0..NUM_TASKS)
            .map(|_| Mutex::new(Vec::new()))
            .collect::<Vec<_>>();

        deck.par_for_each::<5, _>(NUM_TASKS, |task_id, board| {
            outputs[task_id].lock().unwrap().push(*board);
        });

        // Task outputs concatenated by task id give the sequential order.
        let joined = outputs
            .into_iter()
            .flat_map(|o| o.into_inner().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(joined, deck.boards().collect::<Vec<_>>());
    }
}
