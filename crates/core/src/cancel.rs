// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cooperative cancellation.
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// A token shared between the caller and the enumeration workers.
///
/// Workers check the token before taking new work, so in flight work always
/// completes and the counters never contain a partially enumerated class.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that is cancelled only by [CancelToken::cancel].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a token that is also cancelled after `timeout`.
    pub fn with_deadline(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::default(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Cancels this token and all its clones.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checks if the token has been cancelled or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
